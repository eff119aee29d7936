//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the kaiwa crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use kaiwa::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let converter = Converter::builder().build()?;
//! let converted = converter.convert_file("flows/study_help.csv")?;
//! converted.value.save("out/dialogflow_study_help.json")?;
//!
//! println!("{} warnings", converted.warnings().count());
//! # Ok(())
//! # }
//! ```

// Conversion
pub use crate::compiler::{Converter, ConverterBuilder, ConverterOptions};
pub use crate::diagnostics::{Converted, Diagnostic, Severity};

// Input
pub use crate::sheet::{IntoSheet, Sheet};

// Graph and document types
pub use crate::document::{Document, PageRecord, RouteRecord};
pub use crate::graph::{FlowGraph, Page, Route, Trigger};
pub use crate::parsing::WebhookAction;

// Webhook dispatch
pub use crate::dispatch::{Dispatcher, WebhookHandler, WebhookRequest, WebhookResponse};

// Error types
pub use crate::error::{ConvertError, DispatchError, RowError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
