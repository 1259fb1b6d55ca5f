//! Destination actions.
//!
//! Each destination implements [`AudienceDestination`] and reports every failure as an
//! [`actions_error::IntegrationError`], so the execution engine can decide on retries
//! without knowing anything about the partner API.
//!
//! # Destinations
//!
//! | Destination | Implementation | Partner API |
//! |-------------|----------------|-------------|
//! | `yahoo_audiences` | `YahooAudiences` | Yahoo DataX taxonomy API |

pub mod destination;
pub mod http;
pub mod yahoo_audiences;

pub use destination::{
    AudienceDestination, AudienceSettings, CreateAudienceInput, CreateAudienceResult,
    DestinationSettings,
};
pub use yahoo_audiences::YahooAudiences;
