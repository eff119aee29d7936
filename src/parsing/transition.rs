use super::text::is_empty_indicator;
use itertools::Itertools;

/// Splits a Next Page cell into target page names.
///
/// Targets are separated by `/` or by line breaks. Parts are trimmed, empty or
/// placeholder parts are dropped, and repeats are removed keeping first order.
/// An empty result means the route leads nowhere.
pub fn parse_targets(raw: &str) -> Vec<String> {
    raw.split(['/', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty() && !is_empty_indicator(part))
        .unique()
        .map(str::to_string)
        .collect()
}
