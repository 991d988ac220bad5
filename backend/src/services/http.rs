use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{constants::API_REQUEST_TIMEOUT_SECS, error::ApiError};

/// Sends `request` and decodes a JSON body, treating non-2xx statuses as errors.
pub(crate) async fn send_json<T: DeserializeOwned>(service: &'static str, request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .timeout(Duration::from_secs(API_REQUEST_TIMEOUT_SECS))
        .send()
        .await
        .map_err(|source| ApiError::Request { service, source })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status { service, status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| ApiError::Request { service, source })
}
