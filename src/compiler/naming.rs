use crate::parsing::text::slugify;
use ahash::{AHashMap, AHashSet};

/// Hands out names for intents the sheet left unnamed.
///
/// Names look like `Intent_<page_slug>_<n>`, with one counter per page name.
/// A synthesized name never equals a name the sheet supplies anywhere, nor
/// one handed out earlier; on a clash the page's counter moves on.
pub(super) struct IntentNamer {
    reserved: AHashSet<String>,
    taken: AHashSet<String>,
    counters: AHashMap<String, usize>,
}

impl IntentNamer {
    pub(super) fn new(reserved: impl IntoIterator<Item = String>) -> Self {
        Self {
            reserved: reserved.into_iter().collect(),
            taken: AHashSet::new(),
            counters: AHashMap::new(),
        }
    }

    pub(super) fn synthesize(&mut self, page_name: &str) -> String {
        let slug = match slugify(page_name) {
            s if s.is_empty() => "page".to_string(),
            s => s,
        };
        let counter = self.counters.entry(page_name.to_string()).or_insert(0);
        loop {
            *counter += 1;
            let name = format!("Intent_{}_{}", slug, counter);
            if !self.reserved.contains(&name) && self.taken.insert(name.clone()) {
                return name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_page() {
        let mut namer = IntentNamer::new(Vec::new());
        assert_eq!(namer.synthesize("Welcome"), "Intent_welcome_1");
        assert_eq!(namer.synthesize("Welcome"), "Intent_welcome_2");
        assert_eq!(namer.synthesize("Main Menu"), "Intent_main_menu_1");
    }

    #[test]
    fn skips_user_supplied_names() {
        let mut namer = IntentNamer::new(vec!["Intent_welcome_1".to_string()]);
        assert_eq!(namer.synthesize("Welcome"), "Intent_welcome_2");
    }

    #[test]
    fn pages_with_the_same_slug_do_not_collide() {
        let mut namer = IntentNamer::new(Vec::new());
        assert_eq!(namer.synthesize("Main Menu"), "Intent_main_menu_1");
        assert_eq!(namer.synthesize("main-menu"), "Intent_main_menu_2");
        assert_eq!(namer.synthesize("Main Menu"), "Intent_main_menu_3");
    }

    #[test]
    fn unsluggable_page_names_still_get_names() {
        let mut namer = IntentNamer::new(Vec::new());
        assert_eq!(namer.synthesize("¡¿!"), "Intent_page_1");
    }
}
