//! HTTP error mapping utilities

use crate::providers::error::ProviderError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

/// Map HTTP status code and response body to a ProviderError
pub fn map_http_error(
    status: StatusCode,
    headers: Option<&HeaderMap>,
    body: Option<String>,
    request_id: Uuid,
) -> ProviderError {
    // Try to parse error details from response body
    let error_details = body
        .as_ref()
        .and_then(|b| serde_json::from_str::<Value>(b).ok())
        .and_then(|v| extract_error_details(&v));

    let error_message = error_details
        .as_ref()
        .map(|d| d.message.clone())
        .or_else(|| body.clone().filter(|b| !b.trim().is_empty()))
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

    // Include request ID in error message
    let message_with_id = format!("{} [request_id: {}]", error_message, request_id);

    let error_code = error_details.as_ref().and_then(|d| d.code.clone());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Authentication(message_with_id)
        }

        StatusCode::TOO_MANY_REQUESTS => {
            if error_code.as_deref() == Some("insufficient_quota") {
                return ProviderError::InsufficientQuota(message_with_id);
            }

            let retry_after_secs = headers
                .and_then(|h| h.get(RETRY_AFTER))
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after)
                .map(|d| d.as_secs())
                .or_else(|| error_details.as_ref().and_then(|d| d.retry_after_seconds));

            ProviderError::RateLimit {
                message: message_with_id,
                retry_after_secs,
            }
        }

        StatusCode::BAD_REQUEST => ProviderError::InvalidRequest(message_with_id),

        StatusCode::NOT_FOUND => ProviderError::ModelNotFound(
            extract_model_from_error(&error_message).unwrap_or(message_with_id),
        ),

        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::ServiceUnavailable(message_with_id)
        }

        status if status.is_server_error() => ProviderError::ServiceUnavailable(message_with_id),

        _ => ProviderError::Provider {
            code: error_code.unwrap_or_else(|| format!("HTTP_{}", status.as_u16())),
            message: message_with_id,
        },
    }
}

/// Error details extracted from response body
struct ErrorDetails {
    message: String,
    code: Option<String>,
    retry_after_seconds: Option<u64>,
}

/// Extract error details from JSON response
fn extract_error_details(json: &Value) -> Option<ErrorDetails> {
    // OpenAI format: { "error": { "message": "...", "type": "...", "code": "..." } }
    if let Some(error) = json.get("error") {
        if let Some(message) = error.get("message").and_then(|v| v.as_str()) {
            let code = error
                .get("code")
                .and_then(|v| v.as_str())
                .or_else(|| error.get("type").and_then(|v| v.as_str()))
                .map(str::to_string);
            return Some(ErrorDetails {
                message: message.to_string(),
                code,
                retry_after_seconds: error.get("retry_after").and_then(|v| v.as_u64()),
            });
        }
    }

    // Generic format: { "message": "...", "error": "..." }
    if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
        return Some(ErrorDetails {
            message: message.to_string(),
            code: None,
            retry_after_seconds: json.get("retry_after").and_then(|v| v.as_u64()),
        });
    }

    if let Some(error) = json.get("error").and_then(|v| v.as_str()) {
        return Some(ErrorDetails {
            message: error.to_string(),
            code: None,
            retry_after_seconds: None,
        });
    }

    None
}

/// Try to extract model name from error message
fn extract_model_from_error(message: &str) -> Option<String> {
    // Look for common patterns like "model 'gpt-4' not found"
    for (open, close) in [("model '", '\''), ("model \"", '"'), ("model `", '`')] {
        if let Some(start) = message.find(open) {
            let start = start + open.len();
            if let Some(end) = message[start..].find(close) {
                return Some(message[start..start + end].to_string());
            }
        }
    }

    None
}

/// Parse Retry-After header value
pub fn parse_retry_after(header_value: &str) -> Option<Duration> {
    // HTTP dates are not handled; seconds only
    header_value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
