use crate::domain::models::waitlist::{SlotFreed, WaitlistEntry};
use crate::domain::ports::NotificationDispatcher;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::error;

/// Hands freed-slot notifications to the external notification channel over
/// HTTP. What the channel does with them (push, SMS, whatever) is its
/// business.
pub struct HttpNotifier {
    client: Client,
    api_url: String,
    api_key: String,
}

impl HttpNotifier {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct SlotFreedPayload {
    recipient_name: String,
    recipient_phone: String,
    barber_id: String,
    date: String,
    time: String,
}

#[async_trait]
impl NotificationDispatcher for HttpNotifier {
    async fn notify_slot_freed(
        &self,
        entry: &WaitlistEntry,
        freed: &SlotFreed,
    ) -> Result<(), AppError> {
        let payload = SlotFreedPayload {
            recipient_name: entry.customer_name.clone(),
            recipient_phone: entry.customer_phone.clone(),
            barber_id: freed.barber_id.clone(),
            date: freed.date.to_string(),
            time: freed.time.clone(),
        };

        let res = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Notifier connection error: {}", e);
                error!("{}", msg);
                AppError::InternalWithMsg(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Notifier failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::InternalWithMsg(msg));
        }

        Ok(())
    }
}
