use crate::document::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The body the platform posts to the webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    #[serde(default)]
    pub fulfillment_info: FulfillmentInfo,
    #[serde(default)]
    pub session_info: SessionInfo,
    /// The user's last utterance, when the platform sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl WebhookRequest {
    pub fn with_tag(tag: &str) -> Self {
        Self {
            fulfillment_info: FulfillmentInfo {
                tag: tag.to_string(),
            },
            ..Self::default()
        }
    }

    pub fn tag(&self) -> &str {
        &self.fulfillment_info.tag
    }

    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.session_info.parameters.get(name)
    }

    /// A session parameter as text. Strings are returned as-is, other JSON values rendered.
    pub fn parameter_str(&self, name: &str) -> Option<String> {
        self.parameter(name).map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentInfo {
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// The reply the webhook sends back to the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub fulfillment_response: FulfillmentResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_info: Option<SessionInfo>,
}

impl WebhookResponse {
    /// A response carrying a single text message.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            fulfillment_response: FulfillmentResponse {
                messages: vec![Message::text(vec![message.into()])],
            },
            session_info: None,
        }
    }

    /// Adds a session parameter to set on the platform side.
    pub fn with_parameter(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.session_info
            .get_or_insert_with(SessionInfo::default)
            .parameters
            .insert(name.to_string(), value.into());
        self
    }

    /// All text lines across the response's text messages.
    pub fn texts(&self) -> Vec<&str> {
        self.fulfillment_response
            .messages
            .iter()
            .filter_map(|m| match m {
                Message::Text(t) => Some(t.text.iter().map(String::as_str)),
                Message::Payload(_) => None,
            })
            .flatten()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    pub messages: Vec<Message>,
}
