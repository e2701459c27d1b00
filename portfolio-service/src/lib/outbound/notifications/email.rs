use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::errors::DeliveryError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::ports::NotificationSender;

/// Resend API request payload
#[derive(Debug, Serialize)]
struct ResendPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResendSuccessResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ResendErrorResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Sends plain-text mail through the Resend HTTP API.
pub struct ResendEmailSender {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl ResendEmailSender {
    pub fn new(
        api_url: String,
        api_key: String,
        from: String,
        timeout: Duration,
    ) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url,
            api_key,
            from,
        })
    }
}

#[async_trait]
impl NotificationSender for ResendEmailSender {
    async fn send(
        &self,
        to: &EmailAddress,
        subject: &str,
        body: &str,
    ) -> Result<(), DeliveryError> {
        let payload = ResendPayload {
            from: &self.from,
            to: [to.as_str()],
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Mail provider request failed");
                DeliveryError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ResendErrorResponse>(&error_text)
                .ok()
                .and_then(|err| err.message.or(err.name))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

            tracing::error!(status = status.as_u16(), reason = %reason, "Mail provider rejected message");
            return Err(DeliveryError::Rejected(reason));
        }

        match response.json::<ResendSuccessResponse>().await {
            Ok(sent) => tracing::info!(message_id = %sent.id, "Mail sent"),
            Err(e) => tracing::warn!(error = %e, "Mail sent but provider response was unreadable"),
        }

        Ok(())
    }
}
