//! Yahoo Audiences destination.
//!
//! Audiences are registered as segment nodes under the customer's engage space in the
//! Yahoo DataX taxonomy. The node id is the Segment audience id, which is also what we
//! hand back to the engine as the external id.

use crate::destination::{
    require_setting, AudienceDestination, CreateAudienceInput, CreateAudienceResult,
};
use crate::http::{build_client, check_response};
use actions_common::config::{DestinationCredentials, HttpSettings, YAHOO_TAXONOMY_ENV_PREFIX};
use actions_error::{ErrorCode, IntegrationError, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Serialize;

pub const DEFAULT_TAXONOMY_BASE_URL: &str = "https://datax.yahooapis.com";

const CREATE_AUDIENCE: &str = "Create Audience";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaxonomyNode<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    node_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    users: Option<TaxonomyUsers<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sub_taxonomy: Vec<TaxonomyNode<'a>>,
}

#[derive(Debug, Serialize)]
struct TaxonomyUsers<'a> {
    include: Vec<&'a str>,
}

pub struct YahooAudiences {
    client: reqwest::Client,
    base_url: url::Url,
    credentials: DestinationCredentials,
}

impl YahooAudiences {
    pub fn new(credentials: DestinationCredentials, http: &HttpSettings) -> Result<Self> {
        let base_url = parse_base_url(DEFAULT_TAXONOMY_BASE_URL)?;
        Ok(Self {
            client: build_client(http)?,
            base_url,
            credentials,
        })
    }

    /// Build the destination with taxonomy credentials from the environment.
    ///
    /// Missing or blank credentials are an invalid authentication error: nothing will
    /// succeed until an operator provides them.
    pub fn from_env(http: &HttpSettings) -> Result<Self> {
        let credentials = DestinationCredentials::from_env(YAHOO_TAXONOMY_ENV_PREFIX)
            .map_err(|e| {
                IntegrationError::invalid_authentication(format!(
                    "Yahoo taxonomy API credentials are not configured: {:#}",
                    e
                ))
            })?;
        Self::new(credentials, http)
    }

    /// Point the destination at another taxonomy API host.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    fn append_url(&self, engage_space_id: &str) -> Result<url::Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                IntegrationError::integration(format!(
                    "Taxonomy base URL '{}' cannot be a base",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["v1", "taxonomy", "append", engage_space_id]);
        Ok(url)
    }
}

fn parse_base_url(base_url: &str) -> Result<url::Url> {
    url::Url::parse(base_url).map_err(|e| {
        IntegrationError::new(
            format!("Invalid taxonomy base URL '{}': {}", base_url, e),
            Some(ErrorCode::Other("INVALID_CONFIGURATION".to_string())),
            Some(400),
        )
    })
}

#[async_trait]
impl AudienceDestination for YahooAudiences {
    fn name(&self) -> &'static str {
        "yahoo_audiences"
    }

    async fn create_audience(&self, input: &CreateAudienceInput) -> Result<CreateAudienceResult> {
        let audience_id = require_setting(
            CREATE_AUDIENCE,
            "audience_id",
            &input.audience_settings.audience_id,
        )?;
        let audience_key = require_setting(
            CREATE_AUDIENCE,
            "audience_key",
            &input.audience_settings.audience_key,
        )?;
        let engage_space_id = require_setting(
            CREATE_AUDIENCE,
            "engage_space_id",
            &input.settings.engage_space_id,
        )?;

        let customer_desc = Some(input.settings.customer_desc.as_str()).filter(|d| !d.is_empty());
        let audience_desc = Some(input.audience_name.as_str()).filter(|d| !d.is_empty());
        let users = Some(input.settings.mdm_id.as_str())
            .filter(|id| !id.is_empty())
            .map(|id| TaxonomyUsers { include: vec![id] });

        let node = TaxonomyNode {
            id: engage_space_id,
            name: engage_space_id,
            node_type: "SEGMENT",
            description: customer_desc,
            users,
            sub_taxonomy: vec![TaxonomyNode {
                id: audience_id,
                name: audience_key,
                node_type: "SEGMENT",
                description: audience_desc,
                users: None,
                sub_taxonomy: Vec::new(),
            }],
        };

        let url = self.append_url(engage_space_id)?;
        tracing::info!(
            engage_space_id,
            audience_id,
            audience_key,
            "Appending audience to Yahoo taxonomy"
        );

        let response = self
            .client
            .put(url)
            .basic_auth(
                &self.credentials.client_id,
                Some(self.credentials.client_secret.expose_secret()),
            )
            .json(&node)
            .send()
            .await
            .map_err(|e| {
                let err = IntegrationError::from(e);
                err.log();
                err
            })?;

        check_response(response).await?;

        tracing::debug!(audience_id, "Audience created");
        Ok(CreateAudienceResult {
            external_id: audience_id.to_string(),
        })
    }
}
