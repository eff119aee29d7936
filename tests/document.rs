//! Integration tests for the serialized flow document.
mod common;
use common::*;
use kaiwa::document::TriggerKind;
use kaiwa::prelude::*;
use serde_json::json;

#[test]
fn test_document_pages_and_messages() {
    let document = convert(STUDY_HELP_CSV).value;

    assert_eq!(document.display_name, "Default Flow");
    assert_eq!(document.start_page.as_deref(), Some("Main Menu"));
    assert_eq!(document.pages.len(), 5);

    let menu = document.page("Main Menu").unwrap();
    assert_eq!(menu.prompts(), vec!["What would you like to do?"]);
    assert_eq!(menu.chips(), vec!["Check grades", "View schedule"]);

    let metadata = menu.metadata.as_ref().expect("Main Menu has metadata");
    assert_eq!(metadata.step.as_deref(), Some("2"));
    assert_eq!(
        metadata.webhook_tag.as_deref(),
        Some("fetch_upcoming_assignments")
    );
}

#[test]
fn test_route_records() {
    let document = convert(STUDY_HELP_CSV).value;

    let start = document.page("StartPage").unwrap();
    assert_eq!(start.transition_routes[0].trigger, TriggerKind::Event);
    assert_eq!(start.transition_routes[0].event.as_deref(), Some("welcome"));

    let menu = document.page("Main Menu").unwrap();
    let first = &menu.transition_routes[0];
    assert_eq!(first.trigger, TriggerKind::Intent);
    assert_eq!(first.intent.as_deref(), Some("Intent_main_menu_1"));
    assert_eq!(first.target_pages, vec!["Grades"]);
    assert_eq!(first.parameters()[0].parameter, "topic");
    assert_eq!(first.parameters()[0].value, "grades");
    assert_eq!(first.webhook_tag(), None);

    let second = &menu.transition_routes[1];
    assert_eq!(second.webhook_tag(), Some("fetch_upcoming_assignments"));
    let fulfillment = second.trigger_fulfillment.as_ref().unwrap();
    assert_eq!(fulfillment.webhook.as_deref(), Some("Dispatcher"));

    let fallback = &menu.transition_routes[2];
    assert_eq!(fallback.trigger, TriggerKind::Default);
    assert_eq!(fallback.condition.as_deref(), Some("true"));
    assert!(fallback.trigger_fulfillment.is_none());
}

#[test]
fn test_dangling_targets_are_omitted() {
    let document = convert(STUDY_HELP_CSV).value;

    let menu = document.page("Main Menu").unwrap();
    assert!(menu.transition_routes[2].target_pages.is_empty());
    assert!(!menu.transition_routes[2].end_session);
    assert!(!menu.end_of_conversation);

    let assignments = document.page("Assignments").unwrap();
    assert_eq!(
        assignments.transition_routes[0].target_pages,
        vec!["Goodbye", "Main Menu"]
    );
}

#[test]
fn test_end_markers() {
    let document = convert(STUDY_HELP_CSV).value;

    let goodbye = document.page("Goodbye").unwrap();
    assert!(goodbye.end_of_conversation);
    assert!(goodbye.transition_routes.iter().all(|r| r.end_session));
    assert_eq!(document.metadata.end_pages, vec!["Goodbye"]);
    assert_eq!(document.metadata.route_count, 7);
}

#[test]
fn test_intents_and_webhooks() {
    let document = convert(STUDY_HELP_CSV).value;

    assert_eq!(document.intents.len(), 4);
    assert_eq!(
        document.intent("Check_Grades").unwrap().training_phrases,
        vec!["show grades"]
    );

    let tags: Vec<&str> = document.webhooks.iter().map(|w| w.tag.as_str()).collect();
    assert_eq!(tags, vec!["fetch_upcoming_assignments", "check_grades"]);
    assert_eq!(document.webhooks[1].description, "check grades");
}

#[test]
fn test_json_shape() {
    let document = convert(WELCOME_MENU_CSV).value;
    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(value["displayName"], "Default Flow");
    assert_eq!(value["startPage"], "Welcome");

    let welcome = &value["pages"][0];
    assert_eq!(welcome["displayName"], "Welcome");
    assert_eq!(
        welcome["entryFulfillment"]["messages"][0],
        json!({ "text": { "text": ["Hello!"] } })
    );
    assert_eq!(
        welcome["transitionRoutes"][0],
        json!({
            "trigger": "intent",
            "intent": "Intent_welcome_1",
            "targetPages": ["Menu"]
        })
    );
    assert!(welcome.get("endOfConversation").is_none());

    let menu = &value["pages"][1];
    assert_eq!(menu["endOfConversation"], true);
    assert_eq!(
        menu["transitionRoutes"][0],
        json!({ "trigger": "default", "condition": "true", "endSession": true })
    );

    assert_eq!(
        value["intents"][0],
        json!({ "displayName": "Intent_welcome_1", "trainingPhrases": ["hi"] })
    );
}

#[test]
fn test_chips_payload_shape() {
    let document = convert(STUDY_HELP_CSV).value;
    let value = serde_json::to_value(document.page("Grades").unwrap()).unwrap();

    assert_eq!(
        value["entryFulfillment"]["messages"][1],
        json!({
            "payload": {
                "richContent": [[
                    { "type": "chips", "options": [{ "text": "Yes" }, { "text": "No" }] }
                ]]
            }
        })
    );
}

#[test]
fn test_custom_webhook_display_name() {
    let converter = Converter::builder()
        .with_flow_name("Study Help")
        .with_webhook_display_name("StudyHooks")
        .build()
        .unwrap();
    let document = converter.convert_str(STUDY_HELP_CSV).unwrap().value;

    assert_eq!(document.display_name, "Study Help");
    let grades = document.page("Grades").unwrap();
    let fulfillment = grades.transition_routes[0]
        .trigger_fulfillment
        .as_ref()
        .unwrap();
    assert_eq!(fulfillment.webhook.as_deref(), Some("StudyHooks"));
    assert_eq!(fulfillment.tag.as_deref(), Some("check_grades"));
}

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let document = convert(STUDY_HELP_CSV).value;

    let path = dir.path().join("nested").join("dialogflow_study_help.json");
    document.save(&path).expect("Failed to save document");
    let loaded = Document::from_file(&path).expect("Failed to load document");

    assert_eq!(loaded, document);
}

#[test]
fn test_convert_file_names_flow_after_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sheet(dir.path(), "dialogflow_study_help.csv", STUDY_HELP_CSV);

    let document = Converter::default().convert_file(&path).unwrap().value;
    assert_eq!(document.display_name, "Study Help");
    assert_eq!(
        document.metadata.source_file.as_deref(),
        Some("dialogflow_study_help.csv")
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Converter::default().convert_file("does/not/exist.csv");
    assert!(matches!(result, Err(ConvertError::Io { .. })));
}
