mod common;

use axum::http::StatusCode;
use chrono::Weekday;
use common::{fmt, next_weekday, parse_body, TestApp};
use serde_json::Value;

#[tokio::test]
async fn plain_tuesday_has_fourteen_open_slots() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["available_count"], 14);
    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 14);
    assert_eq!(slots[0]["time"], "09:00");
    assert_eq!(slots[13]["time"], "17:30");
    assert!(slots.iter().all(|s| s["available"] == true));
}

#[tokio::test]
async fn monday_is_afternoon_only() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Michele", "standard").await;
    let date = fmt(next_weekday(Weekday::Mon));

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await;
    let body = parse_body(res).await;

    assert_eq!(body["available_count"], 6);
    let times: Vec<&str> = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["time"].as_str().unwrap())
        .collect();
    assert_eq!(
        times,
        vec!["15:00", "15:30", "16:00", "16:30", "17:00", "17:30"]
    );
}

#[tokio::test]
async fn sunday_has_no_slots() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Sun));

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["available_count"], 0);
    assert!(body["slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn booked_slot_becomes_unavailable() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let res = app.book(&barber_id, &date, "10:00", "Mario").await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["available_count"], 13);

    let ten = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["time"] == "10:00")
        .unwrap();
    assert_eq!(ten["available"], false);
}

#[tokio::test]
async fn manually_blocked_slot_is_unavailable() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Wed));

    let res = app
        .put(
            &format!("/api/v1/barbers/{}/schedule/{}", barber_id, date),
            serde_json::json!({ "unavailable_slots": ["09:00", "16:00"] }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["available_count"], 12);
}

#[tokio::test]
async fn day_off_blocks_the_whole_day() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Thu));

    app.put(
        &format!("/api/v1/barbers/{}/schedule/{}", barber_id, date),
        serde_json::json!({ "day_off": true }),
    )
    .await;

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await;
    let body = parse_body(res).await;
    assert_eq!(body["available_count"], 0);
}

#[tokio::test]
async fn resolves_without_materialized_schedule() {
    // dates far outside any materialized window fall back to live base
    // slots instead of erroring
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let far = fmt(next_weekday(Weekday::Tue) + chrono::Duration::days(210));

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, far
        ))
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["available_count"], 14);
}

#[tokio::test]
async fn materialized_and_live_paths_agree() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Fri));

    let before = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await,
    )
    .await;

    let res = app
        .post("/api/v1/admin/materialize?days=14", serde_json::json!({}))
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let after = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/availability?date={}",
            barber_id, date
        ))
        .await,
    )
    .await;

    assert_eq!(before["slots"], after["slots"]);
}

#[tokio::test]
async fn range_matches_per_date_resolution() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;

    let start = next_weekday(Weekday::Mon);
    let end = start + chrono::Duration::days(6);

    // make the week non-trivial: a closure, a booking, a manual block
    app.post(
        &format!("/api/v1/barbers/{}/closures", barber_id),
        serde_json::json!({ "date": fmt(start + chrono::Duration::days(1)), "closure_type": "MORNING" }),
    )
    .await;
    app.book(
        &barber_id,
        &fmt(start + chrono::Duration::days(2)),
        "09:30",
        "Mario",
    )
    .await;
    app.put(
        &format!(
            "/api/v1/barbers/{}/schedule/{}",
            barber_id,
            fmt(start + chrono::Duration::days(3))
        ),
        serde_json::json!({ "unavailable_slots": ["15:00"] }),
    )
    .await;

    let range_body = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/availability/range?start={}&end={}",
            barber_id,
            fmt(start),
            fmt(end)
        ))
        .await,
    )
    .await;
    let days = range_body["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);

    for day in days {
        let date = day["date"].as_str().unwrap();
        let single: Value = parse_body(
            app.get(&format!(
                "/api/v1/barbers/{}/availability?date={}",
                barber_id, date
            ))
            .await,
        )
        .await;

        assert_eq!(
            day["available_count"], single["available_count"],
            "count drift on {}",
            date
        );
        assert_eq!(day["slots"], single["slots"], "slot drift on {}", date);
    }
}

#[tokio::test]
async fn invalid_inputs_are_rejected() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability?date=not-a-date",
            barber_id
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .get(&format!("/api/v1/barbers/{}/availability", barber_id))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app
        .get("/api/v1/barbers/no-such-barber/availability?date=2030-01-07")
        .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app
        .get(&format!(
            "/api/v1/barbers/{}/availability/range?start=2030-01-10&end=2030-01-05",
            barber_id
        ))
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
