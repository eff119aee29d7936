use super::text::{strip_prefix_ignore_case, strip_wrapping_quotes};

/// The trigger written in a row's trigger cell, before intent names are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerSpec {
    /// `Intent: User says '...'`. The utterance may be empty.
    Intent { utterance: String },
    /// `Event: name`.
    Event { event_name: String },
    /// Fires when no other route on the page matches.
    Default,
}

/// Outcome of reading a trigger cell. `degraded` is set when the text could
/// not be understood and was read as a default trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTrigger {
    pub spec: TriggerSpec,
    pub degraded: bool,
}

impl ParsedTrigger {
    fn exact(spec: TriggerSpec) -> Self {
        Self {
            spec,
            degraded: false,
        }
    }

    fn fallback() -> Self {
        Self {
            spec: TriggerSpec::Default,
            degraded: true,
        }
    }
}

/// Phrases authors put in front of the quoted example.
const LEAD_INS: [&str; 4] = [
    "user says",
    "user responds with",
    "user accepts",
    "user denies",
];

/// Parses a trigger cell. Never fails: unknown text degrades to `Default`.
pub fn parse_trigger(raw: &str) -> ParsedTrigger {
    let text = raw.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("default") {
        return ParsedTrigger::exact(TriggerSpec::Default);
    }

    if let Some(rest) = strip_prefix_ignore_case(text, "intent:") {
        return ParsedTrigger::exact(TriggerSpec::Intent {
            utterance: extract_utterance(rest),
        });
    }

    if let Some(rest) = strip_prefix_ignore_case(text, "event:") {
        let event_name = rest.trim();
        if event_name.is_empty() {
            return ParsedTrigger::fallback();
        }
        return ParsedTrigger::exact(TriggerSpec::Event {
            event_name: event_name.to_string(),
        });
    }

    ParsedTrigger::fallback()
}

/// Pulls the example utterance out of the text after `Intent:`.
///
/// The first apostrophe-quoted span wins. A closing apostrophe must be followed
/// by the end of the text or by a non-alphanumeric character, so `'I'm done'`
/// keeps its inner apostrophe.
fn extract_utterance(rest: &str) -> String {
    if let Some(span) = first_quoted_span(rest) {
        return span.trim().to_string();
    }

    let mut body = rest.trim();
    for lead in LEAD_INS {
        if let Some(stripped) = strip_prefix_ignore_case(body, lead) {
            body = stripped.trim_start();
            break;
        }
    }
    strip_wrapping_quotes(body).to_string()
}

/// An opening apostrophe must start the text or follow a non-alphanumeric
/// character, so contractions before the quote (`doesn't`) are skipped.
fn first_quoted_span(s: &str) -> Option<&str> {
    let mut prev: Option<char> = None;
    for (idx, c) in s.char_indices() {
        if c == '\'' && !prev.is_some_and(char::is_alphanumeric) {
            if let Some(span) = closed_span(&s[idx + 1..]) {
                return Some(span);
            }
        }
        prev = Some(c);
    }
    None
}

/// The text up to the first closing apostrophe in `body`.
fn closed_span(body: &str) -> Option<&str> {
    let mut chars = body.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if c != '\'' {
            continue;
        }
        let closes = match chars.peek() {
            None => true,
            Some((_, next)) => !next.is_alphanumeric(),
        };
        if closes {
            return Some(&body[..idx]);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(utterance: &str) -> TriggerSpec {
        TriggerSpec::Intent {
            utterance: utterance.to_string(),
        }
    }

    #[test]
    fn intent_with_quoted_example() {
        let parsed = parse_trigger("Intent: User says 'hi'");
        assert_eq!(parsed.spec, intent("hi"));
        assert!(!parsed.degraded);
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert_eq!(parse_trigger("INTENT: user says 'Yo'").spec, intent("Yo"));
        assert_eq!(
            parse_trigger("event: WELCOME").spec,
            TriggerSpec::Event {
                event_name: "WELCOME".to_string()
            }
        );
    }

    #[test]
    fn inner_apostrophes_stay_in_the_utterance() {
        assert_eq!(
            parse_trigger("Intent: User says 'I'm done'").spec,
            intent("I'm done")
        );
    }

    #[test]
    fn contraction_before_the_quote_is_not_an_opening() {
        assert_eq!(
            parse_trigger("Intent: User doesn't know 'help'").spec,
            intent("help")
        );
        assert_eq!(
            parse_trigger("Intent: User's reply is 'can't log in'").spec,
            intent("can't log in")
        );
    }

    #[test]
    fn first_span_wins_when_several_are_quoted() {
        assert_eq!(
            parse_trigger("Intent: User says 'yes' or 'sure'").spec,
            intent("yes")
        );
    }

    #[test]
    fn unbalanced_quote_uses_whole_remainder() {
        let parsed = parse_trigger("Intent: User says 'show my grades");
        assert_eq!(parsed.spec, intent("'show my grades"));
        assert!(!parsed.degraded);
    }

    #[test]
    fn unquoted_example_drops_lead_in() {
        assert_eq!(
            parse_trigger("Intent: User responds with \"maybe later\"").spec,
            intent("maybe later")
        );
    }

    #[test]
    fn blank_and_default_are_default() {
        assert_eq!(parse_trigger("").spec, TriggerSpec::Default);
        assert_eq!(parse_trigger("Default").spec, TriggerSpec::Default);
        assert!(!parse_trigger("default").degraded);
    }

    #[test]
    fn unknown_text_degrades() {
        let parsed = parse_trigger("when the moon is full");
        assert_eq!(parsed.spec, TriggerSpec::Default);
        assert!(parsed.degraded);
    }

    #[test]
    fn event_without_name_degrades() {
        let parsed = parse_trigger("Event:   ");
        assert_eq!(parsed.spec, TriggerSpec::Default);
        assert!(parsed.degraded);
    }
}
