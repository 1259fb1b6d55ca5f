use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known machine-readable codes, as string constants.
///
/// These are the same strings [`ErrorCode`] serializes to. Destinations that need
/// a code outside this set use [`ErrorCode::Other`].
pub mod codes {
    /// Invalid API key or access token
    pub const INVALID_AUTHENTICATION: &str = "INVALID_AUTHENTICATION";
    /// Payload is missing a field or has an invalid value
    pub const PAYLOAD_VALIDATION_FAILED: &str = "PAYLOAD_VALIDATION_FAILED";
    /// Currency code is not in valid ISO format
    pub const INVALID_CURRENCY_CODE: &str = "INVALID_CURRENCY_CODE";
    /// Generic retryable error
    pub const RETRYABLE_ERROR: &str = "RETRYABLE_ERROR";
    /// Refresh token has expired
    pub const REFRESH_TOKEN_EXPIRED: &str = "REFRESH_TOKEN_EXPIRED";
    /// OAuth refresh failed
    pub const OAUTH_REFRESH_FAILED: &str = "OAUTH_REFRESH_FAILED";
    /// Integration API call failed
    pub const API_CALL_FAILED: &str = "API_CALL_FAILED";
}

/// Machine-readable error code.
///
/// The registry is open: the named variants are the centrally defined codes used
/// for log aggregation across destinations, and [`ErrorCode::Other`] carries any
/// code a destination mints itself. Uniqueness of custom codes is by convention.
///
/// Serializes as its plain string form (e.g. `"API_CALL_FAILED"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ErrorCode {
    InvalidAuthentication,
    PayloadValidationFailed,
    InvalidCurrencyCode,
    RetryableError,
    RefreshTokenExpired,
    OAuthRefreshFailed,
    ApiCallFailed,
    /// Destination-specific code not in the shared registry
    Other(String),
}

impl ErrorCode {
    /// Get the string form of the code
    pub fn as_str(&self) -> &str {
        match self {
            Self::InvalidAuthentication => codes::INVALID_AUTHENTICATION,
            Self::PayloadValidationFailed => codes::PAYLOAD_VALIDATION_FAILED,
            Self::InvalidCurrencyCode => codes::INVALID_CURRENCY_CODE,
            Self::RetryableError => codes::RETRYABLE_ERROR,
            Self::RefreshTokenExpired => codes::REFRESH_TOKEN_EXPIRED,
            Self::OAuthRefreshFailed => codes::OAUTH_REFRESH_FAILED,
            Self::ApiCallFailed => codes::API_CALL_FAILED,
            Self::Other(code) => code,
        }
    }

    /// Whether this code is part of the shared registry
    pub fn is_well_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Get the triage category for this code
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidAuthentication | Self::RefreshTokenExpired | Self::OAuthRefreshFailed => {
                ErrorCategory::Auth
            }
            Self::PayloadValidationFailed | Self::InvalidCurrencyCode => ErrorCategory::Validation,
            Self::RetryableError => ErrorCategory::Transient,
            Self::ApiCallFailed => ErrorCategory::Api,
            Self::Other(_) => ErrorCategory::Unclassified,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> String {
        match code {
            ErrorCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(s: &str) -> Self {
        match s {
            codes::INVALID_AUTHENTICATION => Self::InvalidAuthentication,
            codes::PAYLOAD_VALIDATION_FAILED => Self::PayloadValidationFailed,
            codes::INVALID_CURRENCY_CODE => Self::InvalidCurrencyCode,
            codes::RETRYABLE_ERROR => Self::RetryableError,
            codes::REFRESH_TOKEN_EXPIRED => Self::RefreshTokenExpired,
            codes::OAUTH_REFRESH_FAILED => Self::OAuthRefreshFailed,
            codes::API_CALL_FAILED => Self::ApiCallFailed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(s: String) -> Self {
        match ErrorCode::from(s.as_str()) {
            Self::Other(_) => Self::Other(s),
            known => known,
        }
    }
}

/// High-level error category for triage dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCategory {
    Auth,
    Validation,
    Transient,
    Api,
    Unclassified,
}
