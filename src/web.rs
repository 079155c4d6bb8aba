//! Web layer helpers
//!
//! Framework-neutral pieces shared by HTTP front ends: API error payloads,
//! flash message builders, redirect validation and API token generation.
//! Nothing here depends on a specific web framework; front ends map these
//! onto their own response types.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;
use serde_json::json;
use url::Url;

use crate::types::{JsonObject, JsonValue};

/// Length of generated API tokens
pub const API_TOKEN_LENGTH: usize = 32;

// ============================================================================
// API Errors
// ============================================================================

/// Client-facing API error with an HTTP status
///
/// Carried separately from [`crate::Error`]: that one describes what went
/// wrong internally, this one describes what the client is told.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Message shown to the client
    pub message: String,
    /// HTTP status to respond with
    pub status: u16,
    /// Extra fields merged into the response body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<JsonValue>,
}

impl ApiError {
    /// Error with an explicit status
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
            payload: None,
        }
    }

    /// Generic invalid-usage error, status 400
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(message, 400)
    }

    /// Entity already exists, status 400
    pub fn duplicate(entity: &str) -> Self {
        Self::new(format!("{entity} already exists."), 400)
    }

    /// Entity does not exist, status 404
    pub fn not_found(entity: &str) -> Self {
        Self::new(format!("{entity} not found."), 404)
    }

    /// Caller may not do this, status 403
    pub fn permission_denied() -> Self {
        Self::new("Permission denied.", 403)
    }

    /// Required input is absent, status 400
    pub fn missing_data(data: &str) -> Self {
        Self::new(format!("Missing {data}."), 400)
    }

    /// Attach extra response fields
    #[must_use]
    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Response body: the payload fields plus a `message` key
    ///
    /// The `message` key wins over a payload field of the same name.
    pub fn to_value(&self) -> JsonValue {
        let mut fields = match &self.payload {
            Some(JsonValue::Object(fields)) => fields.clone(),
            Some(other) => {
                let mut fields = JsonObject::new();
                fields.insert("payload".to_string(), other.clone());
                fields
            }
            None => JsonObject::new(),
        };
        fields.insert("message".to_string(), json!(self.message));
        JsonValue::Object(fields)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

// ============================================================================
// Flash Messages
// ============================================================================

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashCategory {
    /// Shown as an error
    Error,
    /// Shown as a warning
    Warning,
    /// Shown as plain information
    Info,
}

impl fmt::Display for FlashCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        };
        f.write_str(label)
    }
}

/// One flash message queued for the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    /// Message text
    pub message: String,
    /// Message severity
    pub category: FlashCategory,
}

impl Flash {
    /// Flash with an explicit category
    pub fn new(message: impl Into<String>, category: FlashCategory) -> Self {
        Self {
            message: message.into(),
            category,
        }
    }

    /// Permission-denied flash; `extra` is appended verbatim
    pub fn permission_denied(extra: &str) -> Self {
        Self::new(format!("Permission denied.{extra}"), FlashCategory::Error)
    }

    /// Duplicate-entity flash, quoting the offending value when given
    pub fn duplicate(entity: &str, value: Option<&str>, extra: &str) -> Self {
        let message = match value {
            Some(value) => format!("{entity}: \"{value}\" already exists.{extra}"),
            None => format!("{entity} already exists.{extra}"),
        };
        Self::new(message, FlashCategory::Error)
    }

    /// Not-found flash, quoting the missing value when given
    pub fn not_found(entity: &str, value: Option<&str>, extra: &str) -> Self {
        let message = match value {
            Some(value) => format!("{entity}: \"{value}\" not found.{extra}"),
            None => format!("{entity} not found.{extra}"),
        };
        Self::new(message, FlashCategory::Error)
    }
}

// ============================================================================
// Redirects and Tokens
// ============================================================================

/// Whether `target` is safe to redirect to from a page on `host_url`
///
/// Relative targets resolve against `host_url`. Safe means the resolved URL
/// is http or https and stays on the same host and port; anything that does
/// not parse is unsafe.
pub fn is_safe_redirect(host_url: &str, target: &str) -> bool {
    let Ok(base) = Url::parse(host_url) else {
        return false;
    };
    let Ok(resolved) = base.join(target) else {
        return false;
    };

    matches!(resolved.scheme(), "http" | "https")
        && resolved.host_str() == base.host_str()
        && resolved.port_or_known_default() == base.port_or_known_default()
}

/// Random alphanumeric API token of `length` characters
pub fn api_token(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // ApiError Tests
    // ========================================================================

    #[test]
    fn test_api_error_statuses() {
        assert_eq!(ApiError::invalid("bad input").status, 400);
        assert_eq!(ApiError::duplicate("User").status, 400);
        assert_eq!(ApiError::not_found("User").status, 404);
        assert_eq!(ApiError::permission_denied().status, 403);
        assert_eq!(ApiError::missing_data("token").status, 400);
    }

    #[test]
    fn test_api_error_messages() {
        assert_eq!(ApiError::duplicate("User").message, "User already exists.");
        assert_eq!(ApiError::not_found("User").message, "User not found.");
        assert_eq!(
            ApiError::permission_denied().message,
            "Permission denied."
        );
        assert_eq!(ApiError::missing_data("token").message, "Missing token.");
    }

    #[test]
    fn test_api_error_body_merges_payload() {
        let error = ApiError::not_found("User").with_payload(json!({"id": 42}));
        let body = error.to_value();

        assert_eq!(body["id"], json!(42));
        assert_eq!(body["message"], json!("User not found."));
    }

    #[test]
    fn test_api_error_message_wins_over_payload() {
        let error = ApiError::invalid("real message").with_payload(json!({"message": "fake"}));
        assert_eq!(error.to_value()["message"], json!("real message"));
    }

    #[test]
    fn test_api_error_body_without_payload() {
        let body = ApiError::invalid("bad input").to_value();
        assert_eq!(body, json!({"message": "bad input"}));
    }

    // ========================================================================
    // Flash Tests
    // ========================================================================

    #[test]
    fn test_flash_quotes_value_when_given() {
        let flash = Flash::duplicate("User", Some("alice"), "");
        assert_eq!(flash.message, "User: \"alice\" already exists.");
        assert_eq!(flash.category, FlashCategory::Error);

        let flash = Flash::duplicate("User", None, "");
        assert_eq!(flash.message, "User already exists.");
    }

    #[test]
    fn test_flash_appends_extra_verbatim() {
        let flash = Flash::not_found("Task", Some("42"), " Try refreshing.");
        assert_eq!(flash.message, "Task: \"42\" not found. Try refreshing.");

        let flash = Flash::permission_denied(" Ask an admin.");
        assert_eq!(flash.message, "Permission denied. Ask an admin.");
    }

    #[test]
    fn test_flash_category_labels() {
        assert_eq!(FlashCategory::Error.to_string(), "error");
        assert_eq!(FlashCategory::Warning.to_string(), "warning");
        assert_eq!(FlashCategory::Info.to_string(), "info");
    }

    // ========================================================================
    // Redirect Tests
    // ========================================================================

    #[test]
    fn test_relative_redirects_are_safe() {
        assert!(is_safe_redirect("http://example.com/login", "/home"));
        assert!(is_safe_redirect("http://example.com/login", "page?next=1"));
    }

    #[test]
    fn test_same_host_absolute_redirect_is_safe() {
        assert!(is_safe_redirect(
            "http://example.com/login",
            "http://example.com/home"
        ));
    }

    #[test]
    fn test_foreign_host_redirect_is_unsafe() {
        assert!(!is_safe_redirect(
            "http://example.com/login",
            "http://evil.example.net/home"
        ));
    }

    #[test]
    fn test_non_http_scheme_is_unsafe() {
        assert!(!is_safe_redirect(
            "http://example.com/login",
            "javascript:alert(1)"
        ));
        assert!(!is_safe_redirect(
            "http://example.com/login",
            "ftp://example.com/file"
        ));
    }

    #[test]
    fn test_port_change_is_unsafe() {
        assert!(!is_safe_redirect(
            "http://example.com/login",
            "http://example.com:8080/home"
        ));
    }

    #[test]
    fn test_unparseable_host_is_unsafe() {
        assert!(!is_safe_redirect("not a url", "/home"));
    }

    // ========================================================================
    // Token Tests
    // ========================================================================

    #[test]
    fn test_api_token_shape() {
        let token = api_token(API_TOKEN_LENGTH);
        assert_eq!(token.len(), API_TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_api_tokens_differ() {
        assert_ne!(api_token(API_TOKEN_LENGTH), api_token(API_TOKEN_LENGTH));
    }
}
