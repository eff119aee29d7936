use crate::diagnostics::Diagnostic;
use crate::graph::FlowGraph;

/// Marks a page terminal when none of its routes lead anywhere.
///
/// Targets count as written, before the reference check: a route whose only
/// target is dangling still keeps its page from being an end state.
pub(super) fn mark_terminal_pages(graph: &mut FlowGraph) {
    for page in graph.pages.values_mut() {
        page.is_terminal = page.routes.iter().all(|r| r.is_dead_end());
    }
}

/// Reports every route target that names no page.
pub(super) fn check_references(graph: &FlowGraph) -> Vec<Diagnostic> {
    graph
        .dangling_targets()
        .into_iter()
        .map(|d| Diagnostic::DanglingRouteTarget {
            line: d.line,
            page: d.page,
            target: d.target,
        })
        .collect()
}

/// The first page whose name is not a start-page placeholder, else the first page.
pub(super) fn pick_start_page(graph: &FlowGraph, aliases: &[String]) -> Option<String> {
    let is_alias = |name: &str| aliases.iter().any(|a| a.eq_ignore_ascii_case(name));
    graph
        .pages
        .keys()
        .find(|name| !is_alias(name.as_str()))
        .or_else(|| graph.pages.keys().next())
        .cloned()
}
