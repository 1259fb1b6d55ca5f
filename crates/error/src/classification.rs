//! # Retry Classification
//!
//! HTTP-status based retry policy shared by every destination.
//!
//! - 4xx responses are not retried, except 408 (timeout), 423 (locked) and 429 (rate limited).
//! - 5xx responses are retried, except 501 (not implemented).
//! - An absent status is never retried; callers opt in with a retryable error.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Returns `true` when the engine should retry an operation that failed with `status`.
pub fn is_retryable_status(status: u16) -> bool {
    match status {
        408 | 423 | 429 => true,
        400..=499 => false,
        501 => false,
        500..=599 => true,
        _ => false,
    }
}

/// Same as [`is_retryable_status`], treating an absent status as non-retryable.
pub fn should_retry(status: Option<u16>) -> bool {
    status.is_some_and(is_retryable_status)
}

/// Status codes a retryable error may carry.
///
/// The set is closed: a retryable error cannot be built with a status the
/// classification rule would not retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum RetryableStatus {
    RequestTimeout = 408,
    Locked = 423,
    TooManyRequests = 429,
    #[default]
    InternalServerError = 500,
    BadGateway = 502,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
    HttpVersionNotSupported = 505,
    VariantAlsoNegotiates = 506,
    InsufficientStorage = 507,
    LoopDetected = 508,
    BandwidthLimitExceeded = 509,
    NotExtended = 510,
    NetworkAuthenticationRequired = 511,
    NetworkReadTimeout = 598,
    NetworkConnectTimeout = 599,
}

impl RetryableStatus {
    /// The full allow-list, in ascending order.
    pub const ALL: [RetryableStatus; 16] = [
        Self::RequestTimeout,
        Self::Locked,
        Self::TooManyRequests,
        Self::InternalServerError,
        Self::BadGateway,
        Self::ServiceUnavailable,
        Self::GatewayTimeout,
        Self::HttpVersionNotSupported,
        Self::VariantAlsoNegotiates,
        Self::InsufficientStorage,
        Self::LoopDetected,
        Self::BandwidthLimitExceeded,
        Self::NotExtended,
        Self::NetworkAuthenticationRequired,
        Self::NetworkReadTimeout,
        Self::NetworkConnectTimeout,
    ];

    /// Get the numeric status value
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for RetryableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

impl From<RetryableStatus> for u16 {
    fn from(status: RetryableStatus) -> u16 {
        status.as_u16()
    }
}

/// A status outside the retryable allow-list was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("status {0} is not a retryable status code")]
pub struct InvalidRetryableStatus(pub u16);

impl TryFrom<u16> for RetryableStatus {
    type Error = InvalidRetryableStatus;

    fn try_from(n: u16) -> std::result::Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_u16() == n)
            .ok_or(InvalidRetryableStatus(n))
    }
}

/// Extension trait for classifying errors as retryable or fatal.
///
/// Implementors only define [`is_retryable`](RetryableErrorExt::is_retryable);
/// anything it does not recognise should report `false`.
pub trait RetryableErrorExt {
    /// Returns `true` if the operation may succeed on retry without user intervention.
    fn is_retryable(&self) -> bool;

    /// Returns `true` if the failure is permanent.
    fn is_fatal(&self) -> bool {
        !self.is_retryable()
    }
}

impl RetryableErrorExt for RetryableStatus {
    fn is_retryable(&self) -> bool {
        true
    }
}

#[cfg(feature = "reqwest")]
impl RetryableErrorExt for reqwest::StatusCode {
    fn is_retryable(&self) -> bool {
        is_retryable_status(self.as_u16())
    }
}
