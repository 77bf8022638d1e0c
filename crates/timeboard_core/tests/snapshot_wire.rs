use timeboard_core::{Category, GoalTimer, Session, TimeRange, TrackingSnapshot};
use uuid::Uuid;

#[test]
fn snapshot_deserializes_from_store_json() {
    let value = serde_json::json!({
        "categories": [
            {
                "id": "11111111-2222-4333-8444-555555555555",
                "name": "Work",
                "color": "#ff8800",
                "goal_pct": 60.0,
                "icon": null,
                "parent_id": null
            }
        ],
        "sessions": [
            {
                "id": "21111111-2222-4333-8444-555555555555",
                "category_id": "11111111-2222-4333-8444-555555555555",
                "start": 1_700_000_000_000_i64,
                "end": null
            }
        ]
    });

    let snapshot: TrackingSnapshot = serde_json::from_value(value).unwrap();
    assert_eq!(snapshot.categories.len(), 1);
    assert!(!snapshot.categories[0].exclude_from_goals);
    assert_eq!(snapshot.categories[0].goal_pct, Some(60.0));
    assert!(snapshot.goal_timers.is_empty());
    assert!(snapshot.running_session().is_some());
    snapshot.validate().unwrap();
}

#[test]
fn records_serialize_with_snake_case_fields() {
    let category_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let category = Category::with_id(category_id, "Study").excluded_from_goals();
    let timer = GoalTimer::resumed(category_id, 42, 1_700_000_000_000);
    let session = Session::closed(category_id, 1, 2);

    let category_json = serde_json::to_value(&category).unwrap();
    assert_eq!(category_json["exclude_from_goals"], true);
    assert_eq!(category_json["parent_id"], serde_json::Value::Null);

    let timer_json = serde_json::to_value(&timer).unwrap();
    assert_eq!(timer_json["accumulated_seconds"], 42);
    assert_eq!(timer_json["last_resume"], 1_700_000_000_000_i64);
    assert_eq!(timer_json["category_id"], category_id.to_string());

    let session_json = serde_json::to_value(&session).unwrap();
    assert_eq!(session_json["end"], 2);

    assert_eq!(serde_json::to_value(TimeRange::Month).unwrap(), "month");
}
