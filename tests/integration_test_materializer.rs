mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Duration, Utc, Weekday};
use common::{fmt, next_weekday, parse_body, TestApp};
use serde_json::json;

fn open_days_in_window(window: i64) -> u32 {
    let today = Utc::now().date_naive();
    (0..window)
        .filter(|offset| (today + Duration::days(*offset)).weekday() != Weekday::Sun)
        .count() as u32
}

#[tokio::test]
async fn creates_schedule_rows_for_every_open_day() {
    let app = TestApp::new().await;
    app.create_barber("Fabio", "standard").await;

    let res = app
        .post("/api/v1/admin/materialize?days=10", json!({}))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let summary = parse_body(res).await;
    assert_eq!(
        summary["days_created"].as_u64().unwrap() as u32,
        open_days_in_window(10)
    );
    assert_eq!(summary["closures_created"], 0);
    assert_eq!(summary["pairs_failed"], 0);
}

#[tokio::test]
async fn second_run_is_a_no_op() {
    let app = TestApp::new().await;
    app.create_barber("Fabio", "standard").await;
    app.create_barber("Michele", "late_monday").await;

    let first = parse_body(
        app.post("/api/v1/admin/materialize?days=14", json!({}))
            .await,
    )
    .await;
    assert!(first["days_created"].as_u64().unwrap() > 0);

    let second = parse_body(
        app.post("/api/v1/admin/materialize?days=14", json!({}))
            .await,
    )
    .await;
    assert_eq!(second["days_created"], 0);
    assert_eq!(second["closures_created"], 0);
}

#[tokio::test]
async fn inactive_barbers_are_skipped() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;

    let res = app
        .put(
            &format!("/api/v1/barbers/{}", barber_id),
            json!({ "active": false }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let summary = parse_body(
        app.post("/api/v1/admin/materialize?days=10", json!({}))
            .await,
    )
    .await;
    assert_eq!(summary["days_created"], 0);
}

#[tokio::test]
async fn recurring_rules_become_system_auto_closures() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;

    // Monday mornings closed, every week
    app.post(
        &format!("/api/v1/barbers/{}/recurring-closures", barber_id),
        json!({ "weekday": 0, "closure_type": "MORNING" }),
    )
    .await;

    let summary = parse_body(
        app.post("/api/v1/admin/materialize?days=14", json!({}))
            .await,
    )
    .await;
    assert!(summary["closures_created"].as_u64().unwrap() >= 1);

    let monday = next_weekday(Weekday::Mon);
    let closures = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/closures?start={}&end={}",
            barber_id,
            fmt(monday),
            fmt(monday)
        ))
        .await,
    )
    .await;
    let rows = closures.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["closure_type"], "MORNING");
    assert_eq!(rows[0]["created_by"], "system-auto");
}

#[tokio::test]
async fn manual_edits_survive_rematerialization() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    app.post("/api/v1/admin/materialize?days=14", json!({}))
        .await;

    app.put(
        &format!("/api/v1/barbers/{}/schedule/{}", barber_id, date),
        json!({ "unavailable_slots": ["09:00"] }),
    )
    .await;

    app.post("/api/v1/admin/materialize?days=14", json!({}))
        .await;

    let body = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await,
    )
    .await;
    assert_eq!(body["available_count"], 13);
}

#[tokio::test]
async fn removed_auto_closure_is_never_recreated() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;

    app.post(
        &format!("/api/v1/barbers/{}/recurring-closures", barber_id),
        json!({ "weekday": 2, "closure_type": "FULL" }),
    )
    .await;
    app.post("/api/v1/admin/materialize?days=14", json!({}))
        .await;

    let wednesday = fmt(next_weekday(Weekday::Wed));
    app.delete(&format!(
        "/api/v1/barbers/{}/closures/{}/FULL",
        barber_id, wednesday
    ))
    .await;

    for _ in 0..3 {
        app.post("/api/v1/admin/materialize?days=14", json!({}))
            .await;
    }

    let closures = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/closures?start={}&end={}",
            barber_id, wednesday, wednesday
        ))
        .await,
    )
    .await;
    assert!(
        closures.as_array().unwrap().is_empty(),
        "ledgered closure came back"
    );
}
