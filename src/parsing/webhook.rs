use itertools::Itertools;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Default upper bound on identifier length.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Prefix of identifiers derived from a hash when the description does not
/// normalize to a legal identifier.
pub const FALLBACK_PREFIX: &str = "webhook_";

/// Number of hex digits of the SHA-256 digest kept in fallback identifiers.
const FALLBACK_HASH_LEN: usize = 12;

/// A call-out to external business logic, named by a handler identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookAction {
    /// Canonical handler identifier, matching `[a-z][a-z0-9_]*`.
    pub identifier: String,
    /// The description as written in the sheet.
    pub description: String,
}

/// Normalizes a Webhook Action cell. Returns `None` for a blank cell.
pub fn normalize_webhook(raw: &str) -> Option<WebhookAction> {
    normalize_webhook_with_limit(raw, MAX_IDENTIFIER_LEN)
}

/// Like [`normalize_webhook`], with a caller-chosen identifier length limit.
pub fn normalize_webhook_with_limit(raw: &str, max_len: usize) -> Option<WebhookAction> {
    let description = raw.trim();
    if description.is_empty() {
        return None;
    }

    let identifier = match normalize_identifier(description) {
        Some(id) if id.len() <= max_len => id,
        _ => fallback_identifier(description),
    };

    Some(WebhookAction {
        identifier,
        description: description.to_string(),
    })
}

/// Lower-cases, drops punctuation, and joins words with `_`.
/// Underscores already in the text are kept, so identifiers normalize to themselves.
/// Returns `None` when the result is empty or does not start with a letter.
fn normalize_identifier(text: &str) -> Option<String> {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let identifier = kept
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|word| !word.is_empty())
        .join("_");

    match identifier.chars().next() {
        Some(first) if first.is_ascii_lowercase() => Some(identifier),
        _ => None,
    }
}

fn fallback_identifier(text: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(text.as_bytes()));
    format!("{}{}", FALLBACK_PREFIX, &digest[..FALLBACK_HASH_LEN])
}

/// Returns true if `s` is a legal handler identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_description() {
        let action = normalize_webhook("fetch upcoming assignments").unwrap();
        assert_eq!(action.identifier, "fetch_upcoming_assignments");
        assert_eq!(action.description, "fetch upcoming assignments");
    }

    #[test]
    fn punctuation_and_spacing_are_folded() {
        let action = normalize_webhook("  Check  Calendar-Conflicts (today)! ").unwrap();
        assert_eq!(action.identifier, "check_calendarconflicts_today");
    }

    #[test]
    fn identifiers_normalize_to_themselves() {
        let action = normalize_webhook("fetch_upcoming__assignments_").unwrap();
        assert_eq!(action.identifier, "fetch_upcoming_assignments");
        let again = normalize_webhook(&action.identifier).unwrap();
        assert_eq!(again.identifier, action.identifier);
    }

    #[test]
    fn blank_cell_has_no_action() {
        assert!(normalize_webhook("   ").is_none());
    }

    #[test]
    fn punctuation_only_falls_back_to_hash() {
        let action = normalize_webhook("?!?").unwrap();
        assert!(action.identifier.starts_with(FALLBACK_PREFIX));
        assert_eq!(action.identifier.len(), FALLBACK_PREFIX.len() + 12);
        assert!(is_identifier(&action.identifier));
        assert_eq!(action.description, "?!?");
    }

    #[test]
    fn fallback_is_deterministic() {
        let a = normalize_webhook("¿¿").unwrap();
        let b = normalize_webhook("¿¿").unwrap();
        assert_eq!(a.identifier, b.identifier);
        assert_ne!(a.identifier, normalize_webhook("!!").unwrap().identifier);
    }

    #[test]
    fn leading_digit_falls_back() {
        let action = normalize_webhook("3 day forecast").unwrap();
        assert!(action.identifier.starts_with(FALLBACK_PREFIX));
    }

    #[test]
    fn overlong_falls_back() {
        let long = "word ".repeat(30);
        let action = normalize_webhook(&long).unwrap();
        assert!(action.identifier.len() <= MAX_IDENTIFIER_LEN);
        assert!(action.identifier.starts_with(FALLBACK_PREFIX));

        let short_limit = normalize_webhook_with_limit("fetch grades", 5).unwrap();
        assert!(short_limit.identifier.starts_with(FALLBACK_PREFIX));
    }

    #[test]
    fn identifier_pattern() {
        assert!(is_identifier("fetch_x1"));
        assert!(!is_identifier("1fetch"));
        assert!(!is_identifier("Fetch"));
        assert!(!is_identifier(""));
    }
}
