//! Session issuance boundary
//!
//! The bridge never mints session tokens itself. The host supplies an
//! issuer; the exchange hands it the mapped credential record, the
//! requested lifetime, and the master key, and returns its output
//! unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use signon_core::CredentialRecord;

use crate::config::MasterKey;
use crate::error::BoxError;

/// Everything an issuer needs to mint a session token
#[derive(Debug)]
pub struct IssuanceRequest<'a, C> {
    /// The mapped application credential record
    pub credentials: &'a C,

    /// Requested session lifetime
    pub lifetime: Duration,

    /// Opaque signing secret supplied by the host, forwarded untouched
    pub master_key: &'a MasterKey,
}

/// An issued, time-bounded session token
///
/// The token payload is opaque to the bridge; its format belongs to the
/// issuer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Opaque session token payload
    pub token: String,

    /// The application user the session belongs to
    pub user_id: String,

    /// When the session expires
    pub expires_at: DateTime<Utc>,
}

/// Host-supplied boundary that turns credential records into session tokens
#[async_trait]
pub trait SessionIssuer<C: CredentialRecord>: Send + Sync {
    /// Mint a session token for a mapped credential record
    async fn issue(&self, request: IssuanceRequest<'_, C>) -> Result<SessionToken, BoxError>;
}
