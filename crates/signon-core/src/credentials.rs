//! Application credential records

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Provider name used when none is configured
pub const DEFAULT_PROVIDER_NAME: &str = "OpenIDConnect";

/// Capability contract for application credential records
///
/// A record carries the application-chosen user identifier derived from the
/// provider subject, plus whatever extra fields the application fills from
/// claims during enrichment. Records must round-trip through JSON unchanged;
/// see the mapper's serialize/deserialize pair.
pub trait CredentialRecord: Serialize + DeserializeOwned + Send + Sync {
    /// Construct the base record for a provider and derived user id
    fn new(provider: &str, user_id: String) -> Self;

    /// The provider this record was mapped from
    fn provider(&self) -> &str;

    /// The derived application user identifier
    fn user_id(&self) -> &str;
}

/// Default credential record: provider name plus derived user id
///
/// Applications that need claim-derived fields define their own record type
/// and enrich it through the mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcCredentials {
    /// Name of the provider that authenticated the user
    pub provider: String,

    /// Application user identifier derived from the provider subject
    pub user_id: String,
}

impl CredentialRecord for OidcCredentials {
    fn new(provider: &str, user_id: String) -> Self {
        Self {
            provider: provider.to_string(),
            user_id,
        }
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
