use super::definition::Sheet;
use crate::error::ConvertError;
use std::io::Read;

/// A trait for input sources that can be turned into a `Sheet`.
///
/// This is the extension point for reading design rows from somewhere other
/// than a CSV file, such as a spreadsheet API export or an in-memory fixture.
///
/// # Example
///
/// ```rust
/// use kaiwa::error::ConvertError;
/// use kaiwa::sheet::{IntoSheet, Sheet};
///
/// struct Exported {
///     rows: Vec<(String, String, String)>,
/// }
///
/// impl IntoSheet for Exported {
///     fn into_sheet(self) -> Result<Sheet, ConvertError> {
///         let headers = vec!["Page Name".into(), "Trigger".into(), "Bot Prompt".into()];
///         let records = self
///             .rows
///             .into_iter()
///             .map(|(page, trigger, prompt)| vec![page, trigger, prompt])
///             .collect();
///         Ok(Sheet::new(headers, records))
///     }
/// }
/// ```
pub trait IntoSheet {
    /// Consumes the source and produces its header row and records.
    fn into_sheet(self) -> Result<Sheet, ConvertError>;
}

impl IntoSheet for Sheet {
    fn into_sheet(self) -> Result<Sheet, ConvertError> {
        Ok(self)
    }
}

impl<R: Read> IntoSheet for csv::Reader<R> {
    fn into_sheet(mut self) -> Result<Sheet, ConvertError> {
        let headers = self.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        let mut lines = Vec::new();
        for record in self.records() {
            let record = record?;
            // The reader skips blank lines, so positions can jump.
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(records.len() + 2);
            lines.push(line);
            records.push(record.iter().map(str::to_string).collect());
        }
        Ok(Sheet::with_lines(headers, records, lines))
    }
}

/// Builds a CSV reader configured for hand-edited design sheets:
/// ragged rows are allowed and leading whitespace is trimmed.
pub fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source)
}

/// Reads a sheet from CSV text.
pub fn sheet_from_csv_str(text: &str) -> Result<Sheet, ConvertError> {
    csv_reader(text.as_bytes()).into_sheet()
}
