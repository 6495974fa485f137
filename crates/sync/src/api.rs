//! HTTP client for the Lustre server's cart and favorites endpoints.
//!
//! The cart endpoints live at `/cart` and take one line per request; the
//! favorites endpoint lives at `/api/favorites` and replaces the whole
//! list on every save.

use lustre_core::{Email, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable naming the server base URL.
const API_URL_VAR: &str = "LUSTRE_API_URL";

/// Errors that can occur when talking to the Lustre server.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// The configured base URL is not a valid URL.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// A required environment variable is missing.
    #[error("missing environment variable: {0}")]
    MissingEnv(String),
}

#[derive(Serialize)]
struct CartLinePayload<'a> {
    email: &'a str,
    #[serde(rename = "productID")]
    product_id: ProductId,
    quantity: i64,
}

#[derive(Serialize)]
struct CartRemovePayload<'a> {
    email: &'a str,
    #[serde(rename = "productID")]
    product_id: ProductId,
}

#[derive(Serialize)]
struct FavoritesPayload<'a> {
    email: &'a str,
    #[serde(rename = "productIDs")]
    product_ids: &'a [ProductId],
}

/// Acknowledgement body returned by mutation endpoints.
#[derive(Deserialize)]
struct Ack {
    success: bool,
}

/// Client for the server-side cart and favorites stores.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Create a new API client for the given server base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base_url.as_str().trim_end_matches('/').to_owned(),
        }
    }

    /// Create an API client from the `LUSTRE_API_URL` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MissingEnv`] when the variable is unset and
    /// [`SyncError::BaseUrl`] when it does not parse as a URL.
    pub fn from_env() -> Result<Self, SyncError> {
        let raw = std::env::var(API_URL_VAR)
            .map_err(|_| SyncError::MissingEnv(API_URL_VAR.to_owned()))?;
        Ok(Self::new(Url::parse(&raw)?))
    }

    /// The server base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Save one cart line for the user.
    ///
    /// The server treats the quantity as the stored value for the line, so
    /// this call backs both incremental adds and absolute updates.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure or a non-2xx response.
    pub async fn save_cart_line(
        &self,
        email: &Email,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), SyncError> {
        let url = format!("{}/cart", self.base);
        let response = self
            .client
            .post(&url)
            .json(&CartLinePayload {
                email: email.as_str(),
                product_id,
                quantity,
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        read_ack(response).await
    }

    /// Remove one cart line for the user.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure or a non-2xx response.
    pub async fn delete_cart_line(
        &self,
        email: &Email,
        product_id: ProductId,
    ) -> Result<(), SyncError> {
        let url = format!("{}/cart", self.base);
        let response = self
            .client
            .delete(&url)
            .json(&CartRemovePayload {
                email: email.as_str(),
                product_id,
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        read_ack(response).await
    }

    /// Fetch the full cart snapshot for the user.
    ///
    /// The payload is returned as raw JSON; the session decides how to
    /// interpret unexpected shapes.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure, a non-2xx response, or
    /// a body that is not JSON at all.
    pub async fn fetch_cart(&self, email: &Email) -> Result<serde_json::Value, SyncError> {
        let url = format!("{}/cart", self.base);
        let response = self
            .client
            .get(&url)
            .query(&[("email", email.as_str())])
            .send()
            .await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))
    }

    /// Replace the user's favorites list with the given set.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure or a non-2xx response.
    pub async fn save_favorites(
        &self,
        email: &Email,
        product_ids: &[ProductId],
    ) -> Result<(), SyncError> {
        let url = format!("{}/api/favorites", self.base);
        let response = self
            .client
            .post(&url)
            .json(&FavoritesPayload {
                email: email.as_str(),
                product_ids,
            })
            .send()
            .await?;
        let response = check_status(response).await?;
        read_ack(response).await
    }

    /// Fetch the full favorites list for the user, as raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure, a non-2xx response, or
    /// a body that is not JSON at all.
    pub async fn fetch_favorites(&self, email: &Email) -> Result<serde_json::Value, SyncError> {
        let url = format!("{}/api/favorites", self.base);
        let response = self
            .client
            .get(&url)
            .query(&[("email", email.as_str())])
            .send()
            .await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))
    }
}

/// Read a mutation response body and require a positive acknowledgement.
async fn read_ack(response: reqwest::Response) -> Result<(), SyncError> {
    let value = response
        .json()
        .await
        .map_err(|e| SyncError::Parse(e.to_string()))?;
    parse_ack(value)
}

fn parse_ack(value: serde_json::Value) -> Result<(), SyncError> {
    let ack: Ack =
        serde_json::from_value(value).map_err(|e| SyncError::Parse(e.to_string()))?;
    if ack.success {
        Ok(())
    } else {
        Err(SyncError::Parse(
            "server did not acknowledge the mutation".to_owned(),
        ))
    }
}

/// Turn a non-2xx response into [`SyncError::Api`], pulling the message
/// from the server's `{"error": ...}` body when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or(body);

    Err(SyncError::Api {
        status: status.as_u16(),
        message,
    })
}
