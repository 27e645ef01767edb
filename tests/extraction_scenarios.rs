// tests/extraction_scenarios.rs
use event_scout::persist::sanitize_event_name;
use event_scout::{events_from_response, extract, materialize, ExtractError, TrendingEvent};
use serde_json::json;

#[test]
fn fenced_json_after_prose_yields_one_event() {
    let raw = "Here you go:\n```json\n{\"events\":[{\"title\":\"Port strike\",\"description\":\"Dockers walk out\",\"location\":\"Rotterdam\",\"emoji\":\"📍\"}]}\n```";
    let events = events_from_response(raw).unwrap();
    assert_eq!(
        events,
        vec![TrendingEvent {
            title: "Port strike".into(),
            description: "Dockers walk out".into(),
            location: "Rotterdam".into(),
            emoji: "📍".into(),
            index: 1,
        }]
    );
}

#[test]
fn empty_events_list_is_not_an_error() {
    assert!(events_from_response(r#"{"events":[]}"#).unwrap().is_empty());
}

#[test]
fn plain_prose_fails_with_preview() {
    let err = extract("not json at all").unwrap_err();
    match &err {
        ExtractError::Parse { preview, .. } => assert_eq!(preview, "not json at all"),
        other => panic!("expected parse error, got {other:?}"),
    }
    assert_eq!(err.preview(), Some("not json at all"));
}

#[test]
fn preview_is_capped() {
    let raw = format!("{{{}", "x".repeat(2_000));
    let err = extract(&raw).unwrap_err();
    assert_eq!(err.preview().unwrap().chars().count(), 500);
}

#[test]
fn generic_fence_and_brace_span_are_tried_in_order() {
    let fenced = "```\n{\"events\":[{\"title\":\"A\"}]}\n```";
    assert_eq!(extract(fenced).unwrap()["events"][0]["title"], "A");

    let loose = "Result follows {\"events\":[{\"title\":\"B\"}]} hope that helps";
    assert_eq!(extract(loose).unwrap()["events"][0]["title"], "B");
}

#[test]
fn partial_failures_keep_dense_indices() {
    let entries = vec![
        json!({"title": "first"}),
        json!("not an object"),
        json!({"title": ["bad"]}),
        json!({"title": "second", "location": null}),
        json!({"title": 42, "emoji": true}),
    ];
    let events = materialize(&entries);
    assert_eq!(events.len(), 3);
    assert_eq!(
        events.iter().map(|e| e.index).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(events[1].location, "Unknown Location");
    assert_eq!(events[2].title, "42");
    assert_eq!(events[2].emoji, "true");
}

#[test]
fn event_names_become_file_safe_slugs() {
    assert_eq!(
        sanitize_event_name("Event With Spaces & Special!"),
        "Event_With_Spaces_Special"
    );
}
