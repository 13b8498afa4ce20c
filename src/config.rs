use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub notifier_url: String,
    pub notifier_token: String,
    pub shop_timezone: String,
    pub materialize_window_days: i64,
    pub waitlist_mode: String,
    pub offer_expiry_min: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            notifier_url: env::var("NOTIFIER_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api/v1/notify".to_string()),
            notifier_token: env::var("NOTIFIER_TOKEN")
                .unwrap_or_else(|_| "test-token-1".to_string()),
            shop_timezone: env::var("SHOP_TIMEZONE")
                .unwrap_or_else(|_| "Europe/Rome".to_string()),
            materialize_window_days: env::var("MATERIALIZE_WINDOW_DAYS")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("MATERIALIZE_WINDOW_DAYS must be a number"),
            waitlist_mode: env::var("WAITLIST_MODE").unwrap_or_else(|_| "BROADCAST".to_string()),
            offer_expiry_min: env::var("OFFER_EXPIRY_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .expect("OFFER_EXPIRY_MIN must be a number"),
        }
    }
}
