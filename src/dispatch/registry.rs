use super::types::{WebhookRequest, WebhookResponse};
use crate::error::DispatchError;
use crate::parsing::normalize_webhook;
use ahash::AHashMap;
use tracing::{error, info, warn};

/// Reply used when no handler matches a tag.
pub const DEFAULT_REPLY: &str = "I'll help you with that.";

/// Defines the contract for serving one webhook identifier.
pub trait WebhookHandler: Send + Sync {
    /// The normalized identifier this handler answers to.
    fn identifier(&self) -> &str;
    fn handle(&self, request: &WebhookRequest) -> Result<WebhookResponse, DispatchError>;
}

/// Adapts a closure into a [`WebhookHandler`].
pub struct FnHandler<F> {
    identifier: String,
    handler: F,
}

impl<F> WebhookHandler for FnHandler<F>
where
    F: Fn(&WebhookRequest) -> Result<WebhookResponse, DispatchError> + Send + Sync,
{
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn handle(&self, request: &WebhookRequest) -> Result<WebhookResponse, DispatchError> {
        (self.handler)(request)
    }
}

pub fn handler_fn<F>(identifier: &str, handler: F) -> FnHandler<F>
where
    F: Fn(&WebhookRequest) -> Result<WebhookResponse, DispatchError> + Send + Sync,
{
    FnHandler {
        identifier: identifier.to_string(),
        handler,
    }
}

/// A keyword alias: every keyword must appear in the tag for the alias to apply.
struct Alias {
    keywords: Vec<String>,
    identifier: String,
}

impl Alias {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().all(|k| text.contains(k.as_str()))
    }
}

/// Routes webhook calls to handlers keyed by normalized identifier.
pub struct Dispatcher {
    registry: AHashMap<String, Box<dyn WebhookHandler>>,
    aliases: Vec<Alias>,
}

pub struct DispatcherBuilder {
    registry: AHashMap<String, Box<dyn WebhookHandler>>,
    aliases: Vec<Alias>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            registry: AHashMap::new(),
            aliases: Vec::new(),
        }
    }
    pub fn with_handler(mut self, handler: Box<dyn WebhookHandler>) -> Self {
        self.registry
            .insert(handler.identifier().to_string(), handler);
        self
    }
    /// Sends tags containing all of `keywords` (case-insensitive) to `identifier`.
    /// Aliases are tried in the order they were added.
    pub fn with_alias(mut self, keywords: &[&str], identifier: &str) -> Self {
        self.aliases.push(Alias {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            identifier: identifier.to_string(),
        });
        self
    }
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            registry: self.registry,
            aliases: self.aliases,
        }
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    /// Finds the handler identifier for a tag.
    ///
    /// Tries the tag as an identifier, then its normalized form (so a raw
    /// free-text description still reaches its handler), then keyword aliases.
    pub fn resolve(&self, tag: &str) -> Option<&str> {
        let tag = tag.trim();
        if let Some((id, _)) = self.registry.get_key_value(tag) {
            return Some(id.as_str());
        }
        if let Some(action) = normalize_webhook(tag) {
            if let Some((id, _)) = self.registry.get_key_value(&action.identifier) {
                return Some(id.as_str());
            }
        }
        let lowered = tag.to_lowercase();
        self.aliases
            .iter()
            .filter(|alias| alias.matches(&lowered))
            .find_map(|alias| {
                self.registry
                    .get_key_value(&alias.identifier)
                    .map(|(id, _)| id.as_str())
            })
    }

    /// Runs the handler for the request's tag, reporting failures as errors.
    pub fn try_dispatch(&self, request: &WebhookRequest) -> Result<WebhookResponse, DispatchError> {
        let tag = request.tag();
        let identifier = self
            .resolve(tag)
            .ok_or_else(|| DispatchError::UnknownTag(tag.to_string()))?;
        let handler = self
            .registry
            .get(identifier)
            .ok_or_else(|| DispatchError::UnknownTag(tag.to_string()))?;
        handler.handle(request)
    }

    /// Runs the handler for the request's tag. Never fails: an unknown tag
    /// gets [`DEFAULT_REPLY`] and a failing handler gets an apology text.
    pub fn dispatch(&self, request: &WebhookRequest) -> WebhookResponse {
        info!("webhook call with tag '{}'", request.tag());
        match self.try_dispatch(request) {
            Ok(response) => response,
            Err(DispatchError::UnknownTag(tag)) => {
                warn!("no handler for tag '{}', sending default reply", tag);
                WebhookResponse::text(DEFAULT_REPLY)
            }
            Err(e) => {
                error!("{}", e);
                WebhookResponse::text(format!("I encountered an issue: {}", e))
            }
        }
    }
}
