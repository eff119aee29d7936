use indexmap::IndexMap;
use itertools::Itertools;

/// Session parameter assignments from one cell. Later duplicates overwrite earlier ones.
pub type Parameters = IndexMap<String, String>;

/// Parameters from one cell, plus the segments that had to be skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParameters {
    pub values: Parameters,
    pub skipped: Vec<String>,
}

/// Parses `key=value, key2=value2`.
///
/// Each comma-separated segment is split on its first `=`. Segments without
/// `=`, with an empty name, or that are blank are skipped and reported.
pub fn parse_parameters(raw: &str) -> ParsedParameters {
    let mut parsed = ParsedParameters::default();
    if raw.trim().is_empty() {
        return parsed;
    }

    for segment in raw.split(',') {
        let Some((name, value)) = segment.split_once('=') else {
            parsed.skipped.push(segment.trim().to_string());
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            parsed.skipped.push(segment.trim().to_string());
            continue;
        }
        parsed
            .values
            .insert(name.to_string(), value.trim().to_string());
    }
    parsed
}

/// Renders parameters back into cell syntax. `parse_parameters` reads the output back unchanged.
pub fn render_parameters(params: &Parameters) -> String {
    params
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .join(", ")
}
