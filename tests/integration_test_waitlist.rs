mod common;

use axum::http::StatusCode;
use chrono::Weekday;
use common::{fmt, next_weekday, parse_body, TestApp};
use serde_json::json;

async fn join(app: &TestApp, barber_id: &str, date: &str, customer: &str) -> serde_json::Value {
    let res = app
        .post(
            &format!("/api/v1/barbers/{}/waitlist", barber_id),
            json!({
                "date": date,
                "customer_name": customer,
                "customer_phone": "3339998888"
            }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn entries_queue_in_fifo_positions() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let first = join(&app, &barber_id, &date, "Anna").await;
    let second = join(&app, &barber_id, &date, "Bruno").await;
    let third = join(&app, &barber_id, &date, "Carla").await;

    assert_eq!(first["position"], 1);
    assert_eq!(second["position"], 2);
    assert_eq!(third["position"], 3);
}

#[tokio::test]
async fn broadcast_notifies_all_waiting_in_order() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let booking = parse_body(app.book(&barber_id, &date, "10:00", "Mario").await).await;
    join(&app, &barber_id, &date, "Anna").await;
    join(&app, &barber_id, &date, "Bruno").await;

    let res = app
        .post(
            &format!("/api/v1/bookings/{}/cancel", booking["id"].as_str().unwrap()),
            json!({}),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let sent = app.notifications.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].customer_name, "Anna");
    assert_eq!(sent[1].customer_name, "Bruno");
    assert!(sent.iter().all(|n| n.time == "10:00" && n.date == date));

    let entries = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/waitlist?date={}",
            barber_id, date
        ))
        .await,
    )
    .await;
    assert!(entries
        .as_array()
        .unwrap()
        .iter()
        .all(|e| e["status"] == "NOTIFIED"));
}

#[tokio::test]
async fn broadcast_first_accept_wins_the_slot() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let booking = parse_body(app.book(&barber_id, &date, "16:00", "Mario").await).await;
    let anna = join(&app, &barber_id, &date, "Anna").await;
    let bruno = join(&app, &barber_id, &date, "Bruno").await;

    app.post(
        &format!("/api/v1/bookings/{}/cancel", booking["id"].as_str().unwrap()),
        json!({}),
    )
    .await;

    let res = app
        .post(
            &format!("/api/v1/waitlist/{}/respond", anna["id"].as_str().unwrap()),
            json!({ "action": "ACCEPT" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["booking"]["time"], "16:00");
    assert_eq!(body["booking"]["customer_name"], "Anna");

    // Bruno was notified too, but the slot is gone
    let res = app
        .post(
            &format!("/api/v1/waitlist/{}/respond", bruno["id"].as_str().unwrap()),
            json!({ "action": "ACCEPT" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn single_offer_walks_the_queue_head_by_head() {
    let app = TestApp::with_waitlist_mode("SINGLE_OFFER").await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let booking = parse_body(app.book(&barber_id, &date, "09:30", "Mario").await).await;
    let anna = join(&app, &barber_id, &date, "Anna").await;
    join(&app, &barber_id, &date, "Bruno").await;
    join(&app, &barber_id, &date, "Carla").await;

    app.post(
        &format!("/api/v1/bookings/{}/cancel", booking["id"].as_str().unwrap()),
        json!({}),
    )
    .await;

    // only the head got the offer
    assert_eq!(app.notifications.lock().unwrap().len(), 1);
    assert_eq!(app.notifications.lock().unwrap()[0].customer_name, "Anna");

    let entries = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/waitlist?date={}",
            barber_id, date
        ))
        .await,
    )
    .await;
    let statuses: Vec<(&str, &str, i64)> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| {
            (
                e["customer_name"].as_str().unwrap(),
                e["status"].as_str().unwrap(),
                e["position"].as_i64().unwrap(),
            )
        })
        .collect();
    assert!(statuses.contains(&("Anna", "OFFERED", 1)));
    // remaining queue compacted behind the departed head
    assert!(statuses.contains(&("Bruno", "WAITING", 1)));
    assert!(statuses.contains(&("Carla", "WAITING", 2)));

    // Anna declines; the offer falls through to Bruno
    let res = app
        .post(
            &format!("/api/v1/waitlist/{}/respond", anna["id"].as_str().unwrap()),
            json!({ "action": "DECLINE" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    let sent = app.notifications.lock().unwrap().clone();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].customer_name, "Bruno");

    let entries = parse_body(
        app.get(&format!(
            "/api/v1/barbers/{}/waitlist?date={}",
            barber_id, date
        ))
        .await,
    )
    .await;
    let bruno_entry = entries
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["customer_name"] == "Bruno")
        .unwrap()
        .clone();
    assert_eq!(bruno_entry["status"], "OFFERED");
    assert_eq!(bruno_entry["offer_time"], "09:30");

    // Bruno accepts and gets the booking
    let res = app
        .post(
            &format!(
                "/api/v1/waitlist/{}/respond",
                bruno_entry["id"].as_str().unwrap()
            ),
            json!({ "action": "ACCEPT" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["booking"]["time"], "09:30");
}

#[tokio::test]
async fn responding_without_an_offer_is_rejected() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let anna = join(&app, &barber_id, &date, "Anna").await;

    // still WAITING, nothing was offered yet
    let res = app
        .post(
            &format!("/api/v1/waitlist/{}/respond", anna["id"].as_str().unwrap()),
            json!({ "action": "ACCEPT" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = app
        .post(
            &format!("/api/v1/waitlist/{}/respond", anna["id"].as_str().unwrap()),
            json!({ "action": "MAYBE" }),
        )
        .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cancel_with_empty_waitlist_notifies_nobody() {
    let app = TestApp::new().await;
    let barber_id = app.create_barber("Fabio", "standard").await;
    let date = fmt(next_weekday(Weekday::Tue));

    let booking = parse_body(app.book(&barber_id, &date, "12:00", "Mario").await).await;
    app.post(
        &format!("/api/v1/bookings/{}/cancel", booking["id"].as_str().unwrap()),
        json!({}),
    )
    .await;

    assert!(app.notifications.lock().unwrap().is_empty());
}
