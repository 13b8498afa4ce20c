use chrono::{Datelike, Duration as ChronoDuration, Utc, Weekday};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::Client;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const BASE_URL: &str = "http://localhost:3000";

struct Target {
    name: &'static str,
    url: String,
}

#[tokio::main]
async fn main() {
    println!("{}", "Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", BASE_URL);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", BASE_URL)).send().await.is_err() {
        eprintln!(
            "{}",
            "Server is NOT reachable at localhost:3000. Please start it first."
                .red()
                .bold()
        );
        return;
    }

    println!("\n{}", "Setting up benchmark data...".yellow());
    let barber_id = setup_barber(&client).await;
    materialize(&client).await;

    println!("{}", "Data created successfully.".green());
    println!("   Barber ID: {}", barber_id);

    let date = next_tuesday();
    let range_end = date_plus(&date, 14);

    let targets = vec![
        Target {
            name: "Health Check",
            url: format!("{}/health", BASE_URL),
        },
        Target {
            name: "Single-Day Availability (Hot Read)",
            url: format!(
                "{}/api/v1/barbers/{}/availability?date={}",
                BASE_URL, barber_id, date
            ),
        },
        Target {
            name: "14-Day Range Availability (Bulk Read)",
            url: format!(
                "{}/api/v1/barbers/{}/availability/range?start={}&end={}",
                BASE_URL, barber_id, date, range_end
            ),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!(
            "{:<10} | {:<15} | {:<15} | {:<15}",
            "RPS", "Mean (ms)", "P99 (ms)", "Success Rate"
        );
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

fn next_tuesday() -> String {
    let mut date = Utc::now().date_naive() + ChronoDuration::days(1);
    while date.weekday() != Weekday::Tue {
        date += ChronoDuration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}

fn date_plus(date: &str, days: i64) -> String {
    let parsed = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    (parsed + ChronoDuration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

async fn setup_barber(client: &Client) -> String {
    let res = client
        .post(format!("{}/api/v1/barbers", BASE_URL))
        .json(&json!({
            "name": format!("Bench Barber {}", Uuid::new_v4()),
            "email": "bench@example.com",
            "pattern_preset": "standard"
        }))
        .send()
        .await
        .expect("Failed to send barber create request");

    if !res.status().is_success() {
        panic!("Failed to create barber: status {}", res.status());
    }

    let body: Value = res.json().await.expect("Failed to parse barber response");
    body["id"].as_str().expect("No barber id").to_string()
}

async fn materialize(client: &Client) {
    let res = client
        .post(format!("{}/api/v1/admin/materialize?days=30", BASE_URL))
        .send()
        .await
        .expect("Failed to trigger materializer");

    if !res.status().is_success() {
        panic!("Materializer trigger failed: status {}", res.status());
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(Quota::per_second(
        NonZeroU32::new(rps).unwrap(),
    )));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = client.get(&url).send().await;
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success {
            successes += 1;
        }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 {
        (successes as f64 / total as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps, mean_ms, p99_ms, success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
