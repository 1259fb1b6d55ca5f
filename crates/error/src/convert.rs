use crate::{ErrorCode, IntegrationError, RetryableStatus};

impl IntegrationError {
    /// Classify a raw HTTP failure status into the matching variant.
    ///
    /// 401 becomes an invalid-authentication error, allow-listed statuses become
    /// retryable, 400 becomes an API call error, and everything else keeps its
    /// status on a generic error coded `HTTP_<status>`.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status == 401 {
            return Self::invalid_authentication(message);
        }
        if let Ok(retryable) = RetryableStatus::try_from(status) {
            return Self::retryable_with_status(message, retryable);
        }
        if status == 400 {
            return Self::api_call(message);
        }
        Self::new(
            message,
            Some(ErrorCode::Other(format!("HTTP_{}", status))),
            Some(status),
        )
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for IntegrationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::retryable_with_status(err.to_string(), RetryableStatus::RequestTimeout);
        }
        if err.is_connect() {
            return Self::retryable_with_status(
                err.to_string(),
                RetryableStatus::ServiceUnavailable,
            );
        }
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), err.to_string());
        }
        if err.is_decode() {
            return Self::api_call(format!("Failed to decode response: {}", err));
        }
        Self::integration(err.to_string())
    }
}

impl From<serde_json::Error> for IntegrationError {
    fn from(err: serde_json::Error) -> Self {
        IntegrationError::payload_validation(err.to_string())
    }
}
