//! HTTP plumbing shared by auth and the road client.
//!
//! Transfers run on curl, pushed onto the blocking pool so callers can
//! keep the surface interactive while a fetch is in flight. No retries
//! and no timeouts here; a failed transfer surfaces once per attempt.

use curl::easy::{Easy, List};
use thiserror::Error;

pub mod auth;
pub mod client;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transfer failed: {0}")]
    Transfer(#[from] curl::Error),

    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u32, message: String },

    #[error("unexpected response payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("response body is not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("background transfer failed: {0}")]
    Background(#[from] tokio::task::JoinError),

    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Config(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
    Put,
    Delete,
}

pub(crate) async fn request(
    method: Method,
    url: String,
    token: Option<String>,
    form_body: Option<String>,
) -> Result<Vec<u8>, ApiError> {
    tokio::task::spawn_blocking(move || {
        perform(method, &url, token.as_deref(), form_body.as_deref())
    })
    .await?
}

fn perform(
    method: Method,
    url: &str,
    token: Option<&str>,
    form_body: Option<&str>,
) -> Result<Vec<u8>, ApiError> {
    let mut handle = Easy::new();
    handle.url(url)?;

    match method {
        Method::Get => handle.get(true)?,
        Method::Post => handle.post(true)?,
        Method::Put => handle.custom_request("PUT")?,
        Method::Delete => handle.custom_request("DELETE")?,
    }

    let mut headers = List::new();
    if let Some(token) = token {
        headers.append(&format!("Authorization: Bearer {}", token))?;
    }
    if form_body.is_some() {
        headers.append("Content-Type: application/x-www-form-urlencoded")?;
    }
    handle.http_headers(headers)?;

    if let Some(body) = form_body {
        handle.post_fields_copy(body.as_bytes())?;
    }

    let mut buffer = Vec::new();
    {
        let mut transfer = handle.transfer();
        transfer.write_function(|data| {
            buffer.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let status = handle.response_code()?;
    if !(200..300).contains(&status) {
        return Err(ApiError::Rejected {
            status,
            message: rejection_message(&buffer),
        });
    }

    Ok(buffer)
}

// The server wraps errors as { meta: { message } }; fall back to the raw
// body when it sends something else
fn rejection_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(message) = value.pointer("/meta/message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }

    String::from_utf8_lossy(body).trim().chars().take(120).collect()
}

/// Form-urlencodes key/value pairs the way the API expects its bodies.
pub(crate) fn form_encode(fields: &[(&str, &str)]) -> String {
    let mut handle = Easy::new();

    fields
        .iter()
        .map(|(key, value)| format!("{}={}", key, handle.url_encode(value.as_bytes())))
        .collect::<Vec<_>>()
        .join("&")
}
