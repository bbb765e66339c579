use crate::error::BackendError;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

pub(crate) fn client(backend: &'static str, timeout: Option<Duration>) -> Result<Client, BackendError> {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| BackendError::configuration(backend, format!("HTTP client: {}", e)))
}

/// Send a request and decode a JSON body, turning non-2xx replies into `Status`.
pub(crate) fn send_json(backend: &'static str, request: RequestBuilder) -> Result<Value, BackendError> {
    let resp = request
        .send()
        .map_err(|source| BackendError::Request { backend, source })?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(BackendError::Status {
            backend,
            status: status.as_u16(),
            body,
        });
    }

    resp.json::<Value>()
        .map_err(|e| BackendError::malformed(backend, e.to_string()))
}
