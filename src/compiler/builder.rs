use super::ConverterOptions;
use super::naming::IntentNamer;
use super::passes;
use crate::diagnostics::{Converted, Diagnostic};
use crate::graph::{FlowGraph, Intent, Page, Route, StepInfo, Trigger};
use crate::parsing::{
    Row, TriggerSpec, normalize_webhook_with_limit, parse_chips, parse_parameters, parse_targets,
    parse_trigger,
};
use tracing::debug;

/// Folds valid rows into a `FlowGraph`, one row at a time.
///
/// The builder owns every page while it runs. Rows naming an existing page add
/// to it instead of creating another one.
pub(super) struct GraphBuilder<'a> {
    options: &'a ConverterOptions,
    graph: FlowGraph,
    namer: IntentNamer,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> GraphBuilder<'a> {
    /// `rows` is only scanned for user-supplied intent names, so synthesized
    /// names can avoid them even when the user name appears later in the sheet.
    pub(super) fn new(options: &'a ConverterOptions, rows: &[Row]) -> Self {
        let reserved = rows.iter().filter_map(|r| r.intent_name.clone());
        Self {
            options,
            graph: FlowGraph::default(),
            namer: IntentNamer::new(reserved),
            diagnostics: Vec::new(),
        }
    }

    pub(super) fn add_row(&mut self, row: Row) {
        let trigger = self.resolve_trigger(&row);

        let parameters = parse_parameters(&row.parameter_spec);
        for segment in parameters.skipped {
            self.diagnostics
                .push(Diagnostic::UnparseableParameterSegment {
                    line: row.line,
                    segment,
                });
        }

        let webhook = normalize_webhook_with_limit(&row.webhook_spec, self.options.max_identifier_len);
        if let Some(action) = &webhook {
            debug!(
                "line {}: webhook '{}' -> {}",
                row.line, action.description, action.identifier
            );
        }

        let route = Route {
            trigger,
            targets: parse_targets(&row.next_page_spec),
            parameters: parameters.values,
            webhook: webhook.clone(),
            line: row.line,
        };

        if self.graph.contains_page(&row.page_name) {
            self.diagnostics.push(Diagnostic::DuplicatePageMerge {
                line: row.line,
                page: row.page_name.clone(),
            });
        }
        let page = self
            .graph
            .pages
            .entry(row.page_name.clone())
            .or_insert_with(|| Page::new(&row.page_name, row.line));

        page.add_prompt(&row.bot_prompt);
        page.add_chips(parse_chips(&row.chips_spec));
        if page.webhook.is_none() {
            page.webhook = webhook;
        }
        merge_steps(&mut page.steps, &row);
        page.routes.push(route);
    }

    fn resolve_trigger(&mut self, row: &Row) -> Trigger {
        let parsed = parse_trigger(&row.trigger_spec);
        if parsed.degraded {
            self.diagnostics.push(Diagnostic::UnparseableTrigger {
                line: row.line,
                text: row.trigger_spec.clone(),
            });
        }

        match parsed.spec {
            TriggerSpec::Intent { utterance } => {
                let intent_name = match &row.intent_name {
                    Some(name) => name.clone(),
                    None => self.namer.synthesize(&row.page_name),
                };
                self.graph
                    .intents
                    .entry(intent_name.clone())
                    .or_insert_with(|| Intent::new(&intent_name))
                    .add_phrase(&utterance);
                Trigger::Intent {
                    intent_name,
                    example_utterance: utterance,
                }
            }
            TriggerSpec::Event { event_name } => {
                if let Some(name) = &row.intent_name {
                    debug!("line {}: intent name '{}' ignored on event trigger", row.line, name);
                }
                Trigger::Event { event_name }
            }
            TriggerSpec::Default => Trigger::Default,
        }
    }

    /// Runs the whole-graph passes and hands back the finished graph.
    pub(super) fn finish(mut self) -> Converted<FlowGraph> {
        passes::mark_terminal_pages(&mut self.graph);
        self.diagnostics
            .extend(passes::check_references(&self.graph));
        self.graph.start_page = passes::pick_start_page(&self.graph, &self.options.start_page_aliases);
        Converted::new(self.graph, self.diagnostics)
    }
}

fn merge_steps(steps: &mut StepInfo, row: &Row) {
    if steps.step.is_none() {
        steps.step = row.step.clone();
    }
    if steps.next_step.is_none() {
        steps.next_step = row.next_step.clone();
    }
}
