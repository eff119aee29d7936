//! Cell-level text cleanup shared by the individual cell parsers.

/// Placeholders that sheet authors use to mean "nothing here".
const EMPTY_INDICATORS: [&str; 8] = ["—", "-", "_", "__", "N/A", "n/a", "nan", "None"];

pub fn is_empty_indicator(s: &str) -> bool {
    EMPTY_INDICATORS.contains(&s)
}

/// Trims a cell and maps placeholders to `""`.
///
/// Cells arrive already unescaped by the CSV reader, so quotes are kept as written.
pub fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || is_empty_indicator(trimmed) {
        return String::new();
    }
    trimmed.to_string()
}

/// Removes one pair of surrounding double quotes, if present.
pub fn strip_wrapping_quotes(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        s[1..s.len() - 1].trim()
    } else {
        s
    }
}

/// Strips a case-insensitive ASCII prefix, returning the remainder.
pub fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

/// Lower-cases and joins alphanumeric runs with `_`, e.g. `"Main Menu!"` -> `"main_menu"`.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_clean_to_empty() {
        assert_eq!(clean_cell("  —  "), "");
        assert_eq!(clean_cell("N/A"), "");
        assert_eq!(clean_cell("   "), "");
        assert_eq!(clean_cell(" Menu "), "Menu");
    }

    #[test]
    fn quotes_are_kept_as_written() {
        assert_eq!(clean_cell(r#"Say ""hi"""#), r#"Say ""hi"""#);
        assert_eq!(clean_cell(r#" mode="" "#), r#"mode="""#);
    }

    #[test]
    fn wrapping_quotes_are_removed_once() {
        assert_eq!(strip_wrapping_quotes(r#""Yes""#), "Yes");
        assert_eq!(strip_wrapping_quotes(r#""""#), "");
        assert_eq!(strip_wrapping_quotes("\"open"), "\"open");
    }

    #[test]
    fn prefix_match_ignores_case() {
        assert_eq!(strip_prefix_ignore_case("INTENT: hi", "intent:"), Some(" hi"));
        assert_eq!(strip_prefix_ignore_case("Int", "intent:"), None);
        // Multi-byte text shorter than the prefix must not panic.
        assert_eq!(strip_prefix_ignore_case("éé", "intent:"), None);
    }

    #[test]
    fn slugify_joins_words() {
        assert_eq!(slugify("Main Menu!"), "main_menu");
        assert_eq!(slugify("  Check-in / Out "), "check_in_out");
    }
}
