use super::text::{is_empty_indicator, strip_wrapping_quotes};
use itertools::Itertools;

/// Splits a Suggested Chips cell into chip labels.
///
/// Chips are one per line. A single-line cell may use `;` instead. Each chip
/// loses one pair of wrapping quotes; blanks, placeholders and repeats are dropped.
pub fn parse_chips(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let parts: Vec<&str> = if raw.contains('\n') {
        raw.lines().collect()
    } else {
        raw.split(';').collect()
    };

    parts
        .into_iter()
        .map(strip_wrapping_quotes)
        .filter(|chip| !chip.is_empty() && !is_empty_indicator(chip))
        .unique()
        .map(str::to_string)
        .collect()
}
