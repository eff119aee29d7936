use crate::diagnostics::{Converted, Diagnostic, Severity};
use crate::document::{Document, DocumentInfo, DocumentSerializer};
use crate::error::ConvertError;
use crate::graph::FlowGraph;
use crate::parsing::webhook::{FALLBACK_PREFIX, MAX_IDENTIFIER_LEN};
use crate::parsing::{Row, parse_row};
use crate::sheet::{Column, IntoSheet, Sheet, csv_reader};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

mod builder;
mod naming;
mod passes;

use builder::GraphBuilder;

/// Flow name used when neither the options nor a file name supply one.
pub const DEFAULT_FLOW_NAME: &str = "Default Flow";

/// Tunables for a conversion. Every field has a default, so a partial JSON
/// object is a valid options file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConverterOptions {
    /// Display name of the produced flow. Falls back to the file name, then to
    /// [`DEFAULT_FLOW_NAME`].
    pub flow_name: Option<String>,
    /// Display name of the platform webhook that carries every tagged call.
    pub webhook_display_name: String,
    /// Page names never chosen as the start page while another page exists.
    pub start_page_aliases: Vec<String>,
    /// Longest webhook identifier accepted before falling back to a hashed one.
    pub max_identifier_len: usize,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            flow_name: None,
            webhook_display_name: "Dispatcher".to_string(),
            start_page_aliases: vec![
                "start".to_string(),
                "startpage".to_string(),
                "start_page".to_string(),
            ],
            max_identifier_len: MAX_IDENTIFIER_LEN,
        }
    }
}

impl ConverterOptions {
    /// Loads options from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConvertError> {
        let path = path.as_ref();
        let text =
            fs::read_to_string(path).map_err(|e| ConvertError::io(path.display().to_string(), e))?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.webhook_display_name.trim().is_empty() {
            return Err(ConvertError::InvalidOptions(
                "webhookDisplayName must not be empty".to_string(),
            ));
        }
        // Hashed fallbacks must themselves fit under the limit.
        let min_len = FALLBACK_PREFIX.len() + 12;
        if self.max_identifier_len < min_len {
            return Err(ConvertError::InvalidOptions(format!(
                "maxIdentifierLen must be at least {}, got {}",
                min_len, self.max_identifier_len
            )));
        }
        Ok(())
    }
}

/// Turns design sheets into flow documents.
///
/// A `Converter` holds only its options, so one instance can convert any
/// number of sheets; every conversion starts from a fresh graph.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConverterOptions,
}

pub struct ConverterBuilder {
    options: ConverterOptions,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self {
            options: ConverterOptions::default(),
        }
    }
    pub fn with_options(mut self, options: ConverterOptions) -> Self {
        self.options = options;
        self
    }
    pub fn with_flow_name(mut self, name: &str) -> Self {
        self.options.flow_name = Some(name.to_string());
        self
    }
    pub fn with_webhook_display_name(mut self, name: &str) -> Self {
        self.options.webhook_display_name = name.to_string();
        self
    }
    pub fn with_start_page_alias(mut self, alias: &str) -> Self {
        self.options.start_page_aliases.push(alias.to_string());
        self
    }
    pub fn with_max_identifier_len(mut self, len: usize) -> Self {
        self.options.max_identifier_len = len;
        self
    }
    pub fn build(self) -> Result<Converter, ConvertError> {
        self.options.validate()?;
        Ok(Converter {
            options: self.options,
        })
    }
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Parses every record of a sheet and builds the flow graph.
    ///
    /// Rows with a blank required cell are dropped and reported; all other
    /// problems are reported and converted as well as possible. Fails only if
    /// the source cannot be read or has no page-name column at all.
    pub fn build_graph<S: IntoSheet>(&self, source: S) -> Result<Converted<FlowGraph>, ConvertError> {
        let sheet = source.into_sheet()?;
        let (rows, row_diagnostics) = read_rows(&sheet)?;
        let converted = self.build_graph_from_rows(rows);
        Ok(merge_diagnostics(converted, row_diagnostics))
    }

    /// Builds the flow graph from rows that were already parsed.
    pub fn build_graph_from_rows(&self, rows: Vec<Row>) -> Converted<FlowGraph> {
        let mut builder = GraphBuilder::new(&self.options, &rows);
        for row in rows {
            builder.add_row(row);
        }
        builder.finish()
    }

    /// Converts a sheet into a document named by the options.
    pub fn convert<S: IntoSheet>(&self, source: S) -> Result<Converted<Document>, ConvertError> {
        let flow_name = self
            .options
            .flow_name
            .clone()
            .unwrap_or_else(|| DEFAULT_FLOW_NAME.to_string());
        self.convert_with_info(
            source,
            DocumentInfo {
                flow_name,
                source_file: None,
            },
        )
    }

    /// Converts CSV text.
    pub fn convert_str(&self, csv_text: &str) -> Result<Converted<Document>, ConvertError> {
        self.convert(csv_reader(csv_text.as_bytes()))
    }

    /// Converts a CSV file. Without a configured flow name the flow is named
    /// after the file, e.g. `dialogflow_study_help.csv` becomes `Study Help`.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<Converted<Document>, ConvertError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| ConvertError::io(path.display().to_string(), e))?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let flow_name = self
            .options
            .flow_name
            .clone()
            .unwrap_or_else(|| flow_name_from_stem(&stem));
        let info = DocumentInfo {
            flow_name,
            source_file: path.file_name().map(|n| n.to_string_lossy().into_owned()),
        };
        self.convert_with_info(csv_reader(file), info)
    }

    pub fn convert_with_info<S: IntoSheet>(
        &self,
        source: S,
        info: DocumentInfo,
    ) -> Result<Converted<Document>, ConvertError> {
        let converted = self.build_graph(source)?;
        let document = DocumentSerializer::new(&converted.value, &self.options.webhook_display_name)
            .serialize(info);
        log_summary(&document, &converted.diagnostics);
        Ok(Converted::new(document, converted.diagnostics))
    }
}

fn read_rows(sheet: &Sheet) -> Result<(Vec<Row>, Vec<Diagnostic>), ConvertError> {
    let layout = sheet.layout();
    if !layout.contains(Column::PageName) {
        return Err(ConvertError::MissingColumn(Column::PageName.header()));
    }

    let mut rows = Vec::with_capacity(sheet.len());
    let mut diagnostics = Vec::new();
    for (idx, record) in sheet.records.iter().enumerate() {
        let line = sheet.line_of(idx);
        if record.iter().all(|cell| cell.trim().is_empty()) {
            debug!("line {}: blank row skipped", line);
            continue;
        }
        match parse_row(&layout, record, line) {
            Ok(row) => rows.push(row),
            Err(err) => diagnostics.push(err.into()),
        }
    }
    Ok((rows, diagnostics))
}

/// Puts row-level diagnostics in front of graph diagnostics, ordered by line.
fn merge_diagnostics(
    converted: Converted<FlowGraph>,
    mut row_diagnostics: Vec<Diagnostic>,
) -> Converted<FlowGraph> {
    let (graph, graph_diagnostics) = converted.into_parts();
    row_diagnostics.extend(graph_diagnostics);
    row_diagnostics.sort_by_key(Diagnostic::line);
    Converted::new(graph, row_diagnostics)
}

fn log_summary(document: &Document, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        match diagnostic.severity() {
            Severity::Info => debug!("{}", diagnostic),
            Severity::Warning | Severity::Error => warn!("{}", diagnostic),
        }
    }
    info!(
        "converted flow '{}': {} pages ({} end states), {} intents, {} routes, {} webhooks",
        document.display_name,
        document.pages.len(),
        document.metadata.end_pages.len(),
        document.intents.len(),
        document.metadata.route_count,
        document.webhooks.len()
    );
}

/// `dialogflow_study_help` -> `Study Help`.
pub fn flow_name_from_stem(stem: &str) -> String {
    let stem = stem.strip_prefix("dialogflow_").unwrap_or(stem);
    let name = stem
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");
    if name.is_empty() {
        DEFAULT_FLOW_NAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_names_from_file_stems() {
        assert_eq!(flow_name_from_stem("dialogflow_study_help"), "Study Help");
        assert_eq!(flow_name_from_stem("ONBOARDING-flow"), "Onboarding Flow");
        assert_eq!(flow_name_from_stem("___"), DEFAULT_FLOW_NAME);
    }

    #[test]
    fn options_reject_tiny_identifier_limit() {
        let result = Converter::builder().with_max_identifier_len(8).build();
        assert!(matches!(result, Err(ConvertError::InvalidOptions(_))));
    }

    #[test]
    fn partial_options_json_uses_defaults() {
        let options: ConverterOptions =
            serde_json::from_str(r#"{ "flowName": "Advising" }"#).unwrap();
        assert_eq!(options.flow_name.as_deref(), Some("Advising"));
        assert_eq!(options.webhook_display_name, "Dispatcher");
        assert_eq!(options.max_identifier_len, MAX_IDENTIFIER_LEN);
    }
}
