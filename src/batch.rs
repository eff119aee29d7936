//! Converts every CSV sheet in a directory, one independent conversion per file.

use crate::compiler::Converter;
use crate::diagnostics::{Diagnostic, Severity};
use crate::error::ConvertError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Name of the output directory used when the caller does not pick one.
pub const DEFAULT_OUTPUT_DIR: &str = "dialogflow_json";

/// What happened to one sheet in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub result: Result<PathBuf, ConvertError>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() >= Severity::Warning)
            .count()
    }
}

/// Per-file results of a directory conversion.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn total_warnings(&self) -> usize {
        self.outcomes.iter().map(FileOutcome::warning_count).sum()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conversion complete: {}/{} successful, {} warnings",
            self.succeeded().count(),
            self.outcomes.len(),
            self.total_warnings()
        )?;
        for outcome in &self.outcomes {
            let name = outcome.source.display();
            match &outcome.result {
                Ok(output) => writeln!(f, "  ok   {} -> {}", name, output.display())?,
                Err(e) => writeln!(f, "  FAIL {}: {}", name, e)?,
            }
            for diagnostic in &outcome.diagnostics {
                writeln!(f, "         {}", diagnostic)?;
            }
        }
        Ok(())
    }
}

/// Lists the `.csv` files directly inside `dir`, sorted by path.
pub fn discover_csv_files(dir: &Path) -> Result<Vec<PathBuf>, ConvertError> {
    let entries = fs::read_dir(dir).map_err(|e| ConvertError::io(dir.display().to_string(), e))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| ConvertError::io(dir.display().to_string(), e))?
            .path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// `flows/study_help.csv` -> `<output_dir>/dialogflow_study_help.json`.
pub fn output_path_for(source: &Path, output_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("dialogflow_{}.json", stem))
}

/// Converts one file and writes its document next to the others.
pub fn convert_one(converter: &Converter, source: &Path, output_dir: &Path) -> FileOutcome {
    let output = output_path_for(source, output_dir);
    match converter.convert_file(source) {
        Ok(converted) => {
            let (document, diagnostics) = converted.into_parts();
            let result = document.save(&output).map(|_| output);
            FileOutcome {
                source: source.to_path_buf(),
                result,
                diagnostics,
            }
        }
        Err(e) => FileOutcome {
            source: source.to_path_buf(),
            result: Err(e),
            diagnostics: Vec::new(),
        },
    }
}

/// Converts every CSV in `input_dir`. Documents go to `output_dir`, or to
/// `input_dir/dialogflow_json` when none is given.
///
/// A sheet that fails does not stop the others; its error is kept in the report.
/// Errors are returned only when the directories themselves cannot be used.
pub fn convert_directory(
    converter: &Converter,
    input_dir: &Path,
    output_dir: Option<&Path>,
) -> Result<BatchReport, ConvertError> {
    let output_dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input_dir.join(DEFAULT_OUTPUT_DIR));
    fs::create_dir_all(&output_dir)
        .map_err(|e| ConvertError::io(output_dir.display().to_string(), e))?;

    let files = discover_csv_files(input_dir)?;
    info!("found {} CSV files in {}", files.len(), input_dir.display());

    let mut report = BatchReport::default();
    for (i, source) in files.iter().enumerate() {
        info!("converting {}/{}: {}", i + 1, files.len(), source.display());
        let outcome = convert_one(converter, source, &output_dir);
        if let Err(e) = &outcome.result {
            error!("failed to convert {}: {}", source.display(), e);
        }
        report.outcomes.push(outcome);
    }
    Ok(report)
}
