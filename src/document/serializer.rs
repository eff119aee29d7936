use super::model::*;
use crate::graph::{FlowGraph, Page, Route, Trigger};
use crate::parsing::WebhookAction;
use indexmap::IndexMap;

/// Names the document and records where its rows came from.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub flow_name: String,
    pub source_file: Option<String>,
}

/// Renders a finished `FlowGraph` into the platform's document schema.
pub struct DocumentSerializer<'a> {
    graph: &'a FlowGraph,
    /// Display name of the platform webhook that carries every tagged call.
    webhook_name: &'a str,
}

impl<'a> DocumentSerializer<'a> {
    pub fn new(graph: &'a FlowGraph, webhook_name: &'a str) -> Self {
        Self {
            graph,
            webhook_name,
        }
    }

    pub fn serialize(&self, info: DocumentInfo) -> Document {
        let pages = self
            .graph
            .pages
            .values()
            .map(|page| self.page_record(page))
            .collect();

        let intents = self
            .graph
            .intents
            .values()
            .map(|intent| IntentRecord {
                display_name: intent.name.clone(),
                training_phrases: intent.training_phrases.clone(),
            })
            .collect();

        Document {
            display_name: info.flow_name,
            start_page: self.graph.start_page.clone(),
            pages,
            intents,
            webhooks: self.webhook_records(),
            metadata: DocumentMetadata {
                source_file: info.source_file,
                end_pages: self
                    .graph
                    .terminal_pages()
                    .map(|p| p.name.clone())
                    .collect(),
                route_count: self.graph.route_count(),
            },
        }
    }

    fn page_record(&self, page: &Page) -> PageRecord {
        let mut messages = Vec::new();
        if !page.prompts.is_empty() {
            messages.push(Message::text(page.prompts.clone()));
        }
        if !page.chips.is_empty() {
            messages.push(Message::chips(&page.chips));
        }

        let metadata = PageMetadata {
            step: page.steps.step.clone(),
            next_step: page.steps.next_step.clone(),
            webhook_tag: page.webhook.as_ref().map(|w| w.identifier.clone()),
        };
        let has_metadata =
            metadata.step.is_some() || metadata.next_step.is_some() || metadata.webhook_tag.is_some();

        PageRecord {
            display_name: page.name.clone(),
            entry_fulfillment: Fulfillment {
                messages,
                ..Fulfillment::default()
            },
            transition_routes: page
                .routes
                .iter()
                .map(|route| self.route_record(route, page.is_terminal))
                .collect(),
            end_of_conversation: page.is_terminal,
            metadata: has_metadata.then_some(metadata),
        }
    }

    fn route_record(&self, route: &Route, page_is_terminal: bool) -> RouteRecord {
        let (trigger, intent, event, condition) = match &route.trigger {
            Trigger::Intent { intent_name, .. } => {
                (TriggerKind::Intent, Some(intent_name.clone()), None, None)
            }
            Trigger::Event { event_name } => {
                (TriggerKind::Event, None, Some(event_name.clone()), None)
            }
            Trigger::Default => (TriggerKind::Default, None, None, Some("true".to_string())),
        };

        let target_pages = route
            .targets
            .iter()
            .filter(|t| self.graph.contains_page(t))
            .cloned()
            .collect();

        let fulfillment = Fulfillment {
            webhook: route.webhook.as_ref().map(|_| self.webhook_name.to_string()),
            tag: route.webhook.as_ref().map(|w| w.identifier.clone()),
            set_parameter_actions: route
                .parameters
                .iter()
                .map(|(name, value)| ParameterAction {
                    parameter: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            ..Fulfillment::default()
        };

        RouteRecord {
            trigger,
            intent,
            event,
            condition,
            target_pages,
            end_session: page_is_terminal,
            trigger_fulfillment: (!fulfillment.is_empty()).then_some(fulfillment),
        }
    }

    /// One record per distinct tag, in first-use order.
    fn webhook_records(&self) -> Vec<WebhookRecord> {
        let mut seen: IndexMap<&str, &WebhookAction> = IndexMap::new();
        let actions = self.graph.pages.values().flat_map(|p| {
            p.webhook
                .iter()
                .chain(p.routes.iter().filter_map(|r| r.webhook.as_ref()))
        });
        for action in actions {
            seen.entry(action.identifier.as_str()).or_insert(action);
        }
        seen.into_values()
            .map(|action| WebhookRecord {
                tag: action.identifier.clone(),
                description: action.description.clone(),
            })
            .collect()
    }
}
