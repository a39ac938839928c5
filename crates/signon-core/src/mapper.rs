//! Credential mapping
//!
//! Maps a validated provider identity (provider name, subject, claims) to an
//! application credential record, and round-trips records through JSON for
//! storage.

use serde_json::Value;

use crate::claims::ClaimSet;
use crate::credentials::{CredentialRecord, DEFAULT_PROVIDER_NAME};
use crate::error::{CredentialError, Result};

/// Deterministic derivation of the application user id
///
/// Supplied by the host. The same (provider, subject) pair must always map
/// to the same user id. Implemented for plain closures:
///
/// ```
/// use signon_core::UserIdDeriver;
///
/// let deriver = |provider: &str, subject: &str| format!("{}:{}", provider, subject);
/// assert_eq!(deriver.derive("OpenIDConnect", "user-123"), "OpenIDConnect:user-123");
/// ```
pub trait UserIdDeriver: Send + Sync {
    /// Derive the application user id for a provider subject
    fn derive(&self, provider: &str, subject: &str) -> String;
}

impl<F> UserIdDeriver for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn derive(&self, provider: &str, subject: &str) -> String {
        self(provider, subject)
    }
}

type EnrichFn<C> = Box<dyn Fn(&mut C, &ClaimSet) + Send + Sync>;

/// Maps provider identities to application credential records
///
/// Base construction is sealed: the user id comes from the injected deriver.
/// Applications customize records through the enrichment closure, which may
/// copy claim values onto fields of their own record type.
pub struct CredentialMapper<C: CredentialRecord> {
    provider_name: String,
    enrich: Option<EnrichFn<C>>,
}

impl<C: CredentialRecord> CredentialMapper<C> {
    /// Create a mapper for the default provider name
    pub fn new() -> Self {
        Self {
            provider_name: DEFAULT_PROVIDER_NAME.to_string(),
            enrich: None,
        }
    }

    /// Override the provider name
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Set the enrichment step run after base construction
    pub fn with_enrichment<F>(mut self, enrich: F) -> Self
    where
        F: Fn(&mut C, &ClaimSet) + Send + Sync + 'static,
    {
        self.enrich = Some(Box::new(enrich));
        self
    }

    /// The provider name records are mapped under
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Build a record for a validated subject
    ///
    /// Derives the user id from (provider name, subject), constructs the
    /// base record, then runs the enrichment step against the claim set.
    ///
    /// # Errors
    /// * `CredentialError::EmptySubject` if the subject is empty
    pub fn build(
        &self,
        subject: &str,
        claims: &ClaimSet,
        deriver: &dyn UserIdDeriver,
    ) -> Result<C> {
        if subject.trim().is_empty() {
            return Err(CredentialError::EmptySubject);
        }

        let user_id = deriver.derive(&self.provider_name, subject);
        let mut record = C::new(&self.provider_name, user_id);
        if let Some(enrich) = &self.enrich {
            enrich(&mut record, claims);
        }
        Ok(record)
    }

    /// Serialize a record to a JSON document
    pub fn serialize(&self, record: &C) -> Result<Value> {
        serde_json::to_value(record).map_err(|e| CredentialError::Serialization(e.to_string()))
    }

    /// Reconstruct a record from a JSON document
    ///
    /// Inverse of [`serialize`](Self::serialize): any document produced
    /// there deserializes back to an equal record.
    pub fn deserialize(&self, document: Value) -> Result<C> {
        serde_json::from_value(document).map_err(|e| CredentialError::Deserialization(e.to_string()))
    }
}

impl<C: CredentialRecord> Default for CredentialMapper<C> {
    fn default() -> Self {
        Self::new()
    }
}
