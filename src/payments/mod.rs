//! Client for the hosted payment-session API.
//!
//! Sessions are created with a form-encoded `POST /v1/checkout/sessions` authenticated by
//! the secret key, and answer with the hosted page URL the shopper is redirected to.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// A priced line on the hosted checkout page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLineItem {
    pub quantity: u32,
    pub unit_amount_cents: i64,
    pub currency: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parameters for one hosted payment session.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub line_items: Vec<CheckoutLineItem>,
    pub success_url: String,
    pub cancel_url: String,
}

impl SessionRequest {
    /// Flatten into the bracketed form fields the session API expects.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), self.success_url.clone()),
            ("cancel_url".to_string(), self.cancel_url.clone()),
        ];

        for (i, item) in self.line_items.iter().enumerate() {
            let prefix = format!("line_items[{}]", i);
            fields.push((format!("{}[quantity]", prefix), item.quantity.to_string()));
            fields.push((
                format!("{}[price_data][currency]", prefix),
                item.currency.clone(),
            ));
            fields.push((
                format!("{}[price_data][unit_amount]", prefix),
                item.unit_amount_cents.to_string(),
            ));
            fields.push((
                format!("{}[price_data][product_data][name]", prefix),
                item.name.clone(),
            ));
            if let Some(description) = item.description.as_ref().filter(|d| !d.is_empty()) {
                fields.push((
                    format!("{}[price_data][product_data][description]", prefix),
                    description.clone(),
                ));
            }
        }

        fields
    }
}

/// Session returned by the payment API.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// Errors from the payment API layer.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("payment API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The session was created without a hosted page URL.
    #[error("session {0} has no redirect URL")]
    MissingUrl(String),
}

/// HTTP client for the payment session API.
pub struct PaymentClient {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

impl PaymentClient {
    pub fn new(api_base: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_base, secret_key)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(
        client: reqwest::Client,
        api_base: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
        }
    }

    /// Build a client from configuration, or `None` when no secret key is set.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Option<Self> {
        config
            .payment_secret_key
            .as_ref()
            .map(|key| Self::with_client(client, config.payment_api_base.clone(), key.clone()))
    }

    /// Create a hosted checkout session and return it.
    pub async fn create_session(
        &self,
        request: &SessionRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&request.form_fields())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PaymentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let session: CheckoutSession = response.json().await?;
        Ok(session)
    }

    /// Create a session and return the URL to redirect the shopper to.
    pub async fn create_session_url(&self, request: &SessionRequest) -> Result<String, PaymentError> {
        let session = self.create_session(request).await?;
        match session.url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(PaymentError::MissingUrl(session.id)),
        }
    }
}
