//! Unit tests for errors, diagnostics, and options.
mod common;
use kaiwa::diagnostics::Severity;
use kaiwa::error::{ConvertError, DispatchError, RowError};
use kaiwa::prelude::*;
use std::fs;

#[test]
fn test_row_error_display() {
    let err = RowError::RequiredFieldMissing {
        line: 7,
        column: "Bot Prompt",
    };
    assert_eq!(err.to_string(), "Row 7: required column 'Bot Prompt' is empty");
    assert_eq!(err.line(), 7);
}

#[test]
fn test_convert_error_display() {
    let err = ConvertError::MissingColumn("Page Name");
    assert_eq!(
        err.to_string(),
        "Sheet has no 'Page Name' column, so no row can be converted"
    );

    let err = ConvertError::InvalidOptions("maxIdentifierLen too small".to_string());
    assert!(err.to_string().contains("maxIdentifierLen"));
}

#[test]
fn test_dispatch_error_display() {
    let err = DispatchError::UnknownTag("order_pizza".to_string());
    assert_eq!(
        err.to_string(),
        "No handler is registered for webhook tag 'order_pizza'"
    );
}

#[test]
fn test_diagnostic_display_and_severity() {
    let dangling = Diagnostic::DanglingRouteTarget {
        line: 5,
        page: "Main Menu".to_string(),
        target: "Fallback".to_string(),
    };
    assert_eq!(
        dangling.to_string(),
        "line 5: route on 'Main Menu' targets unknown page 'Fallback'"
    );
    assert_eq!(dangling.severity(), Severity::Warning);
    assert_eq!(dangling.line(), 5);

    let merge = Diagnostic::DuplicatePageMerge {
        line: 4,
        page: "Main Menu".to_string(),
    };
    assert_eq!(merge.severity(), Severity::Info);

    let missing: Diagnostic = RowError::RequiredFieldMissing {
        line: 3,
        column: "Trigger Type & Example",
    }
    .into();
    assert_eq!(missing.severity(), Severity::Error);
    assert!(Severity::Error > Severity::Warning);
}

#[test]
fn test_diagnostic_json() {
    let diagnostic = Diagnostic::UnparseableParameterSegment {
        line: 5,
        segment: "oops".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&diagnostic).unwrap(),
        serde_json::json!({ "kind": "unparseableParameterSegment", "line": 5, "segment": "oops" })
    );
}

#[test]
fn test_converted_helpers() {
    let converted = Converted::new(
        2,
        vec![
            Diagnostic::DuplicatePageMerge {
                line: 4,
                page: "Menu".to_string(),
            },
            Diagnostic::UnparseableTrigger {
                line: 6,
                text: "??".to_string(),
            },
        ],
    );
    assert_eq!(converted.warnings().count(), 1);

    let doubled = converted.map(|n| n * 2);
    let (value, diagnostics) = doubled.into_parts();
    assert_eq!(value, 4);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_options_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kaiwa.json");
    fs::write(
        &path,
        r#"{ "flowName": "Advising", "webhookDisplayName": "AdvisingHooks", "startPageAliases": ["intro"] }"#,
    )
    .unwrap();

    let options = ConverterOptions::from_file(&path).unwrap();
    assert_eq!(options.flow_name.as_deref(), Some("Advising"));
    assert_eq!(options.webhook_display_name, "AdvisingHooks");
    assert_eq!(options.start_page_aliases, vec!["intro"]);

    let converter = Converter::builder().with_options(options).build().unwrap();
    let document = converter.convert_str(common::WELCOME_MENU_CSV).unwrap().value;
    assert_eq!(document.display_name, "Advising");
}

#[test]
fn test_options_validation() {
    let result = Converter::builder().with_webhook_display_name("  ").build();
    assert!(matches!(result, Err(ConvertError::InvalidOptions(_))));

    let bad_json = ConverterOptions::from_file("missing/options.json");
    assert!(matches!(bad_json, Err(ConvertError::Io { .. })));
}
