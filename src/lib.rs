//! # Kaiwa - Conversation Design Converter
//!
//! **Kaiwa** compiles conversation designs written as spreadsheet rows into the
//! flow documents a conversational-agent platform consumes: pages with entry
//! prompts and suggestion chips, intents with training phrases, transition
//! routes with parameter presets, and webhook tags.
//!
//! ## Core Workflow
//!
//! The converter is format-agnostic. It operates on a canonical `Sheet` of
//! header cells and records. The primary workflow is:
//!
//! 1.  **Load Your Rows**: Read a CSV file, or implement `IntoSheet` for any other tabular source.
//! 2.  **Build a Converter**: Use `Converter::builder` to set the flow name, the webhook display name and the other options.
//! 3.  **Convert**: The converter parses each row, folds the rows into a flow graph (merging rows that share a page), marks end states, checks route targets, and serializes the graph into a `Document`.
//! 4.  **Hand Off**: Save the document as JSON for the uploader, and inspect the returned diagnostics.
//!
//! Malformed rows never stop a conversion. Every problem is reported as a
//! `Diagnostic` next to a best-effort document.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaiwa::prelude::*;
//!
//! fn main() -> std::result::Result<(), ConvertError> {
//!     let csv = "\
//! Page Name,Intent Name,Trigger Type & Example,Bot Prompt,Next Page/Transition,Parameter Set,Webhook Action,Suggested Chips
//! Welcome,,Intent: User says 'hi',Hello!,Menu,,,
//! Menu,,Default,Pick an option,,,fetch upcoming assignments,
//! ";
//!
//!     let converter = Converter::builder().with_flow_name("Study Help").build()?;
//!     let converted = converter.convert_str(csv)?;
//!
//!     let document = &converted.value;
//!     assert_eq!(document.pages.len(), 2);
//!     assert!(document.page("Menu").unwrap().end_of_conversation);
//!     assert_eq!(document.webhooks[0].tag, "fetch_upcoming_assignments");
//!
//!     for diagnostic in &converted.diagnostics {
//!         println!("{}", diagnostic);
//!     }
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod compiler;
pub mod diagnostics;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod graph;
pub mod parsing;
pub mod prelude;
pub mod sheet;
