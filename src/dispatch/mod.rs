//! Transport-free webhook dispatch.
//!
//! The converter tags every webhook call with a normalized identifier. A
//! [`Dispatcher`] maps those tags back to handlers; whatever serves HTTP only
//! has to decode a [`WebhookRequest`] and encode the [`WebhookResponse`].

pub mod registry;
pub mod types;

pub use registry::*;
pub use types::*;
