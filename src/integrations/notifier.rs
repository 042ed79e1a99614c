use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::AppError;

/// Outbound contact channels for courier notifications. Both channels are
/// best-effort from the dispatcher's point of view; errors returned here are
/// logged by the caller, never propagated to assignment.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn sms(&self, phone: &str, text: &str) -> Result<(), AppError>;

    async fn email(&self, to: &str, subject: &str, text: &str) -> Result<(), AppError>;
}

/// Webhook-style gateways for the SMS/WhatsApp and email channels. A channel
/// without a configured URL logs the message and reports success, which is
/// the local-dev mode.
pub struct HttpNotifier {
    client: reqwest::Client,
    sms_gateway_url: Option<String>,
    email_gateway_url: Option<String>,
}

impl HttpNotifier {
    pub fn new(
        client: reqwest::Client,
        sms_gateway_url: Option<String>,
        email_gateway_url: Option<String>,
    ) -> Self {
        Self {
            client,
            sms_gateway_url,
            email_gateway_url,
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn sms(&self, phone: &str, text: &str) -> Result<(), AppError> {
        let Some(url) = &self.sms_gateway_url else {
            debug!(phone, "sms gateway not configured; dropping message");
            return Ok(());
        };

        self.client
            .post(url)
            .json(&json!({ "to": phone, "message": text }))
            .send()
            .await
            .map_err(|err| AppError::Notification(format!("sms send failed: {err}")))?
            .error_for_status()
            .map_err(|err| AppError::Notification(format!("sms gateway rejected: {err}")))?;

        Ok(())
    }

    async fn email(&self, to: &str, subject: &str, text: &str) -> Result<(), AppError> {
        let Some(url) = &self.email_gateway_url else {
            debug!(to, "email gateway not configured; dropping message");
            return Ok(());
        };

        self.client
            .post(url)
            .json(&json!({ "to": to, "subject": subject, "body": text }))
            .send()
            .await
            .map_err(|err| AppError::Notification(format!("email send failed: {err}")))?
            .error_for_status()
            .map_err(|err| AppError::Notification(format!("email gateway rejected: {err}")))?;

        Ok(())
    }
}
