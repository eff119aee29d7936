use serde::{Deserialize, Serialize};

fn is_false(b: &bool) -> bool {
    !*b
}

/// The flow document handed to the uploader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_page: Option<String>,
    pub pages: Vec<PageRecord>,
    #[serde(default)]
    pub intents: Vec<IntentRecord>,
    #[serde(default)]
    pub webhooks: Vec<WebhookRecord>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn page(&self, name: &str) -> Option<&PageRecord> {
        self.pages.iter().find(|p| p.display_name == name)
    }

    pub fn intent(&self, name: &str) -> Option<&IntentRecord> {
        self.intents.iter().find(|i| i.display_name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    pub display_name: String,
    pub entry_fulfillment: Fulfillment,
    #[serde(default)]
    pub transition_routes: Vec<RouteRecord>,
    /// Set on pages where the conversation ends.
    #[serde(default, skip_serializing_if = "is_false")]
    pub end_of_conversation: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

impl PageRecord {
    /// Chip labels from the page's rich-content payload, if any.
    pub fn chips(&self) -> Vec<&str> {
        self.entry_fulfillment
            .messages
            .iter()
            .filter_map(|m| match m {
                Message::Payload(p) => Some(p),
                Message::Text(_) => None,
            })
            .flat_map(|p| p.rich_content.iter().flatten())
            .flat_map(|c| match c {
                RichContent::Chips { options } => options.iter().map(|o| o.text.as_str()),
            })
            .collect()
    }

    /// Prompt texts from the page's text message, if any.
    pub fn prompts(&self) -> Vec<&str> {
        self.entry_fulfillment
            .messages
            .iter()
            .filter_map(|m| match m {
                Message::Text(t) => Some(t),
                Message::Payload(_) => None,
            })
            .flat_map(|t| t.text.iter().map(String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_tag: Option<String>,
}

/// Messages, webhook call and parameter presets attached to a page entry or a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub set_parameter_actions: Vec<ParameterAction>,
}

impl Fulfillment {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.webhook.is_none()
            && self.tag.is_none()
            && self.set_parameter_actions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Message {
    Text(TextMessage),
    Payload(PayloadMessage),
}

impl Message {
    pub fn text(lines: Vec<String>) -> Self {
        Message::Text(TextMessage { text: lines })
    }

    pub fn chips(labels: &[String]) -> Self {
        let options = labels
            .iter()
            .map(|l| ChipOption { text: l.clone() })
            .collect();
        Message::Payload(PayloadMessage {
            rich_content: vec![vec![RichContent::Chips { options }]],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMessage {
    pub text: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadMessage {
    pub rich_content: Vec<Vec<RichContent>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RichContent {
    Chips { options: Vec<ChipOption> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChipOption {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    Intent,
    Event,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub trigger: TriggerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Known target pages. Dangling targets never appear here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_pages: Vec<String>,
    /// Set instead of a target list on routes of terminal pages.
    #[serde(default, skip_serializing_if = "is_false")]
    pub end_session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_fulfillment: Option<Fulfillment>,
}

impl RouteRecord {
    pub fn webhook_tag(&self) -> Option<&str> {
        self.trigger_fulfillment.as_ref()?.tag.as_deref()
    }

    pub fn parameters(&self) -> &[ParameterAction] {
        self.trigger_fulfillment
            .as_ref()
            .map(|f| f.set_parameter_actions.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterAction {
    pub parameter: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRecord {
    pub display_name: String,
    pub training_phrases: Vec<String>,
}

/// A webhook tag used by the flow and the description it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookRecord {
    pub tag: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub end_pages: Vec<String>,
    #[serde(default)]
    pub route_count: usize,
}
