//! # actions-error
//!
//! Error taxonomy and retry classification for destination actions.
//!
//! Every failure a destination raises is one of the [`IntegrationError`] variants, each
//! carrying:
//! - a human-readable message surfaced to the operator
//! - a machine-readable [`ErrorCode`] for triage and aggregation
//! - an HTTP-like status used by the execution engine's retry policy
//!
//! Retryability is never stored; it is derived from the variant and status through
//! [`classification::is_retryable_status`].

pub mod classification;
mod code;
mod convert;

pub use classification::{
    is_retryable_status, should_retry, InvalidRetryableStatus, RetryableErrorExt,
    RetryableStatus,
};
pub use code::{codes, ErrorCategory, ErrorCode};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The error raised by destination operations.
///
/// Values are built once where the failure is detected and propagate unchanged to
/// the execution engine, which is the only place retry decisions are made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrationError {
    /// Misconfiguration or otherwise unspecified failure. Retried only if `status`
    /// is retryable under the classification rule.
    Integration {
        #[serde(default)]
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<ErrorCode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<u16>,
    },

    /// Transient failure; the engine retries it with its own backoff.
    Retryable {
        #[serde(default)]
        message: String,
        #[serde(default)]
        status: RetryableStatus,
    },

    /// Stored credentials are no longer valid. Never retried; the user has to
    /// re-authenticate or rotate a key.
    InvalidAuthentication {
        #[serde(default)]
        message: String,
        #[serde(default = "default_auth_code")]
        code: ErrorCode,
    },

    /// The payload failed schema or business validation.
    PayloadValidation {
        #[serde(default)]
        message: String,
    },

    /// The destination's API rejected the call and the destination wants its own message.
    ApiCall {
        #[serde(default)]
        message: String,
    },
}

fn default_auth_code() -> ErrorCode {
    ErrorCode::InvalidAuthentication
}

/// Discriminant of [`IntegrationError`], used as a log field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Integration,
    Retryable,
    InvalidAuthentication,
    PayloadValidation,
    ApiCall,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integration => "integration",
            Self::Retryable => "retryable",
            Self::InvalidAuthentication => "invalid_authentication",
            Self::PayloadValidation => "payload_validation",
            Self::ApiCall => "api_call",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IntegrationError {
    /// Create a generic integration error with optional code and status.
    ///
    /// Nothing is validated; `code` and `status` are advisory metadata.
    pub fn new(message: impl Into<String>, code: Option<ErrorCode>, status: Option<u16>) -> Self {
        Self::Integration {
            message: message.into(),
            code,
            status,
        }
    }

    /// Create a generic integration error with only a message
    pub fn integration(message: impl Into<String>) -> Self {
        Self::new(message, None, None)
    }

    /// Create a retryable error with the default status (500)
    pub fn retryable(message: impl Into<String>) -> Self {
        Self::retryable_with_status(message, RetryableStatus::default())
    }

    /// Create a retryable error with an allow-listed status
    pub fn retryable_with_status(message: impl Into<String>, status: RetryableStatus) -> Self {
        Self::Retryable {
            message: message.into(),
            status,
        }
    }

    /// Create a retryable error from a raw status, failing if the status is not allow-listed.
    pub fn try_retryable(
        message: impl Into<String>,
        status: u16,
    ) -> std::result::Result<Self, InvalidRetryableStatus> {
        let status = RetryableStatus::try_from(status)?;
        Ok(Self::retryable_with_status(message, status))
    }

    /// Create an invalid authentication error with the default code
    pub fn invalid_authentication(message: impl Into<String>) -> Self {
        Self::invalid_authentication_with_code(message, ErrorCode::InvalidAuthentication)
    }

    /// Create an invalid authentication error with a more specific code
    /// (e.g. [`ErrorCode::RefreshTokenExpired`]).
    pub fn invalid_authentication_with_code(
        message: impl Into<String>,
        code: impl Into<ErrorCode>,
    ) -> Self {
        Self::InvalidAuthentication {
            message: message.into(),
            code: code.into(),
        }
    }

    /// Create a payload validation error
    pub fn payload_validation(message: impl Into<String>) -> Self {
        Self::PayloadValidation {
            message: message.into(),
        }
    }

    /// Create an API call error
    pub fn api_call(message: impl Into<String>) -> Self {
        Self::ApiCall {
            message: message.into(),
        }
    }

    /// Set the code on a generic or invalid-authentication error.
    ///
    /// Variants with a fixed code are returned unchanged.
    pub fn with_code(mut self, new_code: impl Into<ErrorCode>) -> Self {
        match &mut self {
            Self::Integration { code, .. } => *code = Some(new_code.into()),
            Self::InvalidAuthentication { code, .. } => *code = new_code.into(),
            _ => {}
        }
        self
    }

    /// Set the status on a generic integration error.
    ///
    /// Variants with a fixed or allow-listed status are returned unchanged.
    pub fn with_status(mut self, new_status: u16) -> Self {
        if let Self::Integration { status, .. } = &mut self {
            *status = Some(new_status);
        }
        self
    }

    /// Human-readable message
    pub fn message(&self) -> &str {
        match self {
            Self::Integration { message, .. }
            | Self::Retryable { message, .. }
            | Self::InvalidAuthentication { message, .. }
            | Self::PayloadValidation { message }
            | Self::ApiCall { message } => message,
        }
    }

    /// Machine-readable code, fixed for all variants except [`IntegrationError::Integration`]
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Integration { code, .. } => code.clone(),
            Self::Retryable { .. } => Some(ErrorCode::RetryableError),
            Self::InvalidAuthentication { code, .. } => Some(code.clone()),
            Self::PayloadValidation { .. } => Some(ErrorCode::PayloadValidationFailed),
            Self::ApiCall { .. } => Some(ErrorCode::ApiCallFailed),
        }
    }

    /// HTTP-like status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Integration { status, .. } => *status,
            Self::Retryable { status, .. } => Some(status.as_u16()),
            Self::InvalidAuthentication { .. } => Some(401),
            Self::PayloadValidation { .. } | Self::ApiCall { .. } => Some(400),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Integration { .. } => ErrorKind::Integration,
            Self::Retryable { .. } => ErrorKind::Retryable,
            Self::InvalidAuthentication { .. } => ErrorKind::InvalidAuthentication,
            Self::PayloadValidation { .. } => ErrorKind::PayloadValidation,
            Self::ApiCall { .. } => ErrorKind::ApiCall,
        }
    }

    /// Get the triage category of this error's code
    pub fn category(&self) -> ErrorCategory {
        self.code()
            .map(|code| code.category())
            .unwrap_or(ErrorCategory::Unclassified)
    }

    /// Flat view of the error for logs and API responses
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            message: self.message().to_string(),
            code: self.code(),
            status: self.status(),
            retryable: self.is_retryable(),
        }
    }

    /// Serialize the flat report to JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.report()).unwrap_or_else(|e| {
            tracing::warn!("Failed to serialize IntegrationError: {}", e);
            format!(
                r#"{{"kind":"{}","message":"Serialization failed","retryable":{}}}"#,
                self.kind(),
                self.is_retryable()
            )
        })
    }

    /// Serialize the flat report to pretty JSON for logging
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.report()).unwrap_or_else(|_| self.to_json())
    }

    /// Emit this error on the `errors` tracing target with its classification fields.
    pub fn log(&self) {
        let code = self.code();
        tracing::warn!(
            target: "errors",
            kind = %self.kind(),
            code = code.as_ref().map(ErrorCode::as_str),
            status = self.status(),
            retryable = self.is_retryable(),
            "{}",
            self.message()
        );
    }
}

impl RetryableErrorExt for IntegrationError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Integration { status, .. } => should_retry(*status),
            Self::Retryable { .. } => true,
            Self::InvalidAuthentication { .. } | Self::PayloadValidation { .. } | Self::ApiCall { .. } => {
                false
            }
        }
    }
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.code() {
            write!(f, "[{}] ", code)?;
        }
        f.write_str(self.message())?;
        if let Some(status) = self.status() {
            write!(f, " (status {})", status)?;
        }
        Ok(())
    }
}

impl std::error::Error for IntegrationError {}

/// Flat, serializable summary of an [`IntegrationError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub retryable: bool,
}

/// Result type alias for destination operations
pub type Result<T> = std::result::Result<T, IntegrationError>;
