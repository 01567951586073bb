//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making requests.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_error::ApiError;
use crate::system::auth::storage;

/// Path prefix of the pay API
pub const API_PREFIX: &str = "/api/v1";

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location, so the
/// front end always talks to the pay API served from its own origin.
///
/// # Returns
/// - API base URL like "https://pay.example.com/api/v1"
/// - Just the prefix if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return API_PREFIX.to_string(),
    };
    let origin = window.location().origin().unwrap_or_default();
    format!("{}{}", origin, API_PREFIX)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/eft-shortnames");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Append a serialized query string to `url`; empty params add nothing
pub fn with_query<Q: Serialize>(url: &str, params: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(params)?;
    if qs.is_empty() {
        Ok(url.to_string())
    } else {
        Ok(format!("{}?{}", url, qs))
    }
}

/// `Authorization` header value for `token`, if any
pub fn bearer_header(token: Option<&str>) -> Option<String> {
    token.map(|t| format!("Bearer {}", t))
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    let builder = builder.header("Accept", "application/json");
    let token = storage::get_access_token();
    match bearer_header(token.as_deref()) {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::status(response.status(), response.status_text()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET `url` with `params` as query string and decode the JSON answer
pub async fn get_json<Q, T>(url: &str, params: &Q) -> Result<T, ApiError>
where
    Q: Serialize,
    T: DeserializeOwned,
{
    let url = with_query(url, params)?;
    log::debug!("GET {}", url);

    let response = authorized(Request::get(&url))
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(response).await
}

/// POST `body` as JSON to `url` and decode the JSON answer
pub async fn post_json<B, T>(url: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    log::debug!("POST {}", url);

    let response = authorized(Request::post(url))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    decode(response).await
}
