//! Parsers for a design row and for the free-text mini-grammars inside its cells.
//!
//! Each cell grammar lives in its own module and returns a plain value or a
//! tagged result, so its edge cases can be tested in isolation. None of them
//! fail: malformed text degrades and is reported to the caller instead.

pub mod chips;
pub mod parameter;
pub mod row;
pub mod text;
pub mod transition;
pub mod trigger;
pub mod webhook;

pub use chips::parse_chips;
pub use parameter::{ParsedParameters, Parameters, parse_parameters, render_parameters};
pub use row::{Row, parse_row};
pub use transition::parse_targets;
pub use trigger::{ParsedTrigger, TriggerSpec, parse_trigger};
pub use webhook::{WebhookAction, is_identifier, normalize_webhook, normalize_webhook_with_limit};
