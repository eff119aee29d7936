use thiserror::Error;

/// Errors that reject a single sheet row. The rest of the sheet still converts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("Row {line}: required column '{column}' is empty")]
    RequiredFieldMissing { line: usize, column: &'static str },
}

impl RowError {
    pub fn line(&self) -> usize {
        match self {
            RowError::RequiredFieldMissing { line, .. } => *line,
        }
    }
}

/// Errors that stop a conversion outright. None of these are caused by the
/// content of individual rows.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode or decode document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sheet has no '{0}' column, so no row can be converted")]
    MissingColumn(&'static str),

    #[error("Invalid converter options: {0}")]
    InvalidOptions(String),
}

impl ConvertError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised by the webhook dispatcher when a handler cannot serve a call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("No handler is registered for webhook tag '{0}'")]
    UnknownTag(String),

    #[error("Handler '{handler}' failed: {message}")]
    HandlerFailed { handler: String, message: String },
}
