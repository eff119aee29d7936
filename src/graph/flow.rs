use super::page::Page;
use indexmap::IndexMap;

/// An intent and the example utterances gathered for it across the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub name: String,
    pub training_phrases: Vec<String>,
}

impl Intent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            training_phrases: Vec::new(),
        }
    }

    pub fn add_phrase(&mut self, phrase: &str) {
        if !phrase.is_empty() && !self.training_phrases.iter().any(|p| p == phrase) {
            self.training_phrases.push(phrase.to_string());
        }
    }
}

/// A route target that names no page in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingTarget {
    pub page: String,
    pub target: String,
    pub line: usize,
}

/// The complete set of pages and transitions built from one sheet.
///
/// Pages are kept in the order they first appear in the sheet, and the map
/// doubles as the name index.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    pub pages: IndexMap<String, Page>,
    pub intents: IndexMap<String, Intent>,
    pub start_page: Option<String>,
}

impl FlowGraph {
    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.get(name)
    }

    pub fn contains_page(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    pub fn terminal_pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values().filter(|p| p.is_terminal)
    }

    pub fn route_count(&self) -> usize {
        self.pages.values().map(|p| p.routes.len()).sum()
    }

    /// Every route target that does not name a page, in page and route order.
    pub fn dangling_targets(&self) -> Vec<DanglingTarget> {
        let mut dangling = Vec::new();
        for page in self.pages.values() {
            for route in &page.routes {
                for target in &route.targets {
                    if !self.contains_page(target) {
                        dangling.push(DanglingTarget {
                            page: page.name.clone(),
                            target: target.clone(),
                            line: route.line,
                        });
                    }
                }
            }
        }
        dangling
    }
}
