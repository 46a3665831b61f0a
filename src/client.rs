use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::{SubmitError, DEFAULT_REJECTION_MESSAGE};
use crate::models::form::RentalForm;

/// Something that accepts a rental form and reports whether it was taken.
#[async_trait]
pub trait SubmissionEndpoint: Send + Sync {
    async fn submit(&self, form: &RentalForm) -> Result<(), SubmitError>;
}

/// Client for the remote bike rental endpoint
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionEndpoint for HttpSubmissionClient {
    async fn submit(&self, form: &RentalForm) -> Result<(), SubmitError> {
        info!("Submitting rental for bike {}", form.bike_id);
        debug!("API URL: {}", self.endpoint);
        debug!("Form: {:?}", form);

        let res = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(form)
            .send()
            .await
            .map_err(SubmitError::network)?;

        let status = res.status();
        info!("Response received with status: {}", status);

        let body = res.text().await.map_err(SubmitError::network)?;

        if !status.is_success() {
            // An unreadable error body still counts as a rejection
            let data = serde_json::from_str::<Value>(&body).unwrap_or(Value::Null);
            return Err(SubmitError::Rejected {
                status,
                message: rejection_message(&data),
            });
        }

        serde_json::from_str::<Value>(&body)?;
        Ok(())
    }
}

/// Pick the user-facing text out of an error body: `message`, then `error`,
/// then a generic line.
///
/// A field counts when it is truthy in the JavaScript sense (anything but
/// `null`, `false`, `0` and `""`), and is turned into text the way
/// JavaScript's `String()` would.
pub fn rejection_message(data: &Value) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| data.get(key))
        .find(|value| is_truthy(value))
        .map(js_string)
        .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn js_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(js_string).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
