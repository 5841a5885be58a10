use crate::config::ResendConfig;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Outbound email channel. Callers must check `is_configured` before
/// relying on `send`; an unconfigured channel is a configuration error,
/// not a delivery error.
#[async_trait]
pub trait Mailer: Send + Sync {
    fn is_configured(&self) -> bool;
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    config: ResendConfig,
}

impl ResendMailer {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty() && !self.config.from_email.is_empty()
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));

        let body = SendEmailRequest {
            from: &self.config.from_email,
            to: [to],
            subject,
            html,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::DeliveryError(format!("Email request failed: {e}")))?;

        if response.status().is_success() {
            match response.json::<SendEmailResponse>().await {
                Ok(r) => log::info!("Email sent to {to} (provider id {})", r.id),
                Err(_) => log::info!("Email sent to {to}"),
            }
            Ok(())
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Email send failed for {to}: {status} {error_text}");
            Err(AppError::DeliveryError(format!(
                "Email provider returned {status}: {error_text}"
            )))
        }
    }
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Recording double used by service tests.
#[cfg(test)]
pub struct MockMailer {
    configured: bool,
    fail_sending: bool,
    sent: std::sync::Mutex<Vec<SentEmail>>,
}

#[cfg(test)]
impl MockMailer {
    pub fn new() -> Self {
        Self {
            configured: true,
            fail_sending: false,
            sent: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_sending: true,
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for MockMailer {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        if self.fail_sending {
            return Err(AppError::DeliveryError("mock mailer set to fail".into()));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}
