use crate::parsing::{Parameters, WebhookAction};
use std::fmt;

/// What makes a route fire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    Intent {
        intent_name: String,
        example_utterance: String,
    },
    Event {
        event_name: String,
    },
    /// Fires when no other route on the page matches.
    Default,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Intent { intent_name, .. } => write!(f, "intent {}", intent_name),
            Trigger::Event { event_name } => write!(f, "event {}", event_name),
            Trigger::Default => write!(f, "default"),
        }
    }
}

/// A guarded transition out of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub trigger: Trigger,
    /// Target page names in cell order. Empty means the route leads nowhere.
    pub targets: Vec<String>,
    pub parameters: Parameters,
    pub webhook: Option<WebhookAction>,
    /// Sheet line the route came from.
    pub line: usize,
}

impl Route {
    pub fn is_dead_end(&self) -> bool {
        self.targets.is_empty()
    }
}

/// Optional Step / Next Step annotations carried over from the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {
    pub step: Option<String>,
    pub next_step: Option<String>,
}

impl StepInfo {
    pub fn is_empty(&self) -> bool {
        self.step.is_none() && self.next_step.is_none()
    }
}

/// A single conversational state. Rows sharing a page name merge into one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    /// Entry prompts in first-seen order, without repeats.
    pub prompts: Vec<String>,
    pub routes: Vec<Route>,
    /// Suggested chips in first-seen order, without repeats.
    pub chips: Vec<String>,
    /// The first webhook action seen on any of the page's rows.
    pub webhook: Option<WebhookAction>,
    pub steps: StepInfo,
    pub is_terminal: bool,
    /// Sheet line of the row that created the page.
    pub line: usize,
}

impl Page {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            prompts: Vec::new(),
            routes: Vec::new(),
            chips: Vec::new(),
            webhook: None,
            steps: StepInfo::default(),
            is_terminal: false,
            line,
        }
    }

    pub fn add_prompt(&mut self, prompt: &str) {
        if !prompt.is_empty() && !self.prompts.iter().any(|p| p == prompt) {
            self.prompts.push(prompt.to_string());
        }
    }

    pub fn add_chips(&mut self, chips: impl IntoIterator<Item = String>) {
        for chip in chips {
            if !self.chips.contains(&chip) {
                self.chips.push(chip);
            }
        }
    }

    /// Target names across all routes, in route order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.routes
            .iter()
            .flat_map(|r| r.targets.iter().map(String::as_str))
    }
}
