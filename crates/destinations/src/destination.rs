use actions_error::{IntegrationError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Destination-level settings configured once per installation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationSettings {
    #[serde(default)]
    pub engage_space_id: String,
    #[serde(default)]
    pub mdm_id: String,
    #[serde(default)]
    pub customer_desc: String,
}

/// Per-audience settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudienceSettings {
    #[serde(default)]
    pub audience_key: String,
    #[serde(default)]
    pub audience_id: String,
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAudienceInput {
    pub settings: DestinationSettings,
    #[serde(default)]
    pub audience_name: String,
    pub audience_settings: AudienceSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAudienceResult {
    pub external_id: String,
}

#[async_trait]
pub trait AudienceDestination: Send + Sync {
    /// Returns the destination's slug (e.g., "yahoo_audiences")
    fn name(&self) -> &'static str;

    /// Creates the audience in the partner platform and returns its external id
    async fn create_audience(&self, input: &CreateAudienceInput) -> Result<CreateAudienceResult>;
}

/// Fails with a payload validation error if `value` is blank.
pub fn require_setting<'a>(operation: &str, field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        let err = IntegrationError::payload_validation(format!(
            "{}: missing required setting '{}'",
            operation, field
        ));
        err.log();
        return Err(err);
    }
    Ok(value)
}
