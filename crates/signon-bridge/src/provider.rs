//! OIDC provider client
//!
//! Talks to the external provider over two fixed endpoints: token validation
//! (`/connect/accesstokenvalidation`) and userinfo (`/connect/userinfo`).
//! Validation tells the bridge whether the token is good and who it belongs
//! to; userinfo supplies the claims that become the user's attribute set.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

use signon_core::ClaimSet;

use crate::config::ProviderConfig;
use crate::error::ProviderError;

const VALIDATION_PATH: &str = "/connect/accesstokenvalidation";
const USERINFO_PATH: &str = "/connect/userinfo";

/// The two provider calls a login exchange depends on
///
/// The exchange depends on this trait rather than on the HTTP client so
/// tests can substitute doubles and count calls.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Ask the provider whether a bearer token is valid
    ///
    /// # Arguments
    /// * `raw_token` - The bearer token as received from the caller; must
    ///   be non-empty (the exchange rejects empty tokens before calling)
    ///
    /// # Returns
    /// * `Ok(ValidatedToken)` - The token is valid and names a subject
    /// * `Err(ProviderError)` - Transport failure or unusable response
    async fn validate_token(&self, raw_token: &str) -> Result<ValidatedToken, ProviderError>;

    /// Fetch the user's claims for a validated bearer token
    async fn fetch_claims(&self, raw_token: &str) -> Result<ClaimSet, ProviderError>;
}

/// Outcome of a successful token validation
///
/// The subject is always present and non-empty; everything else is
/// diagnostic data the provider may or may not return. A failed or
/// malformed validation never produces a partially filled value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedToken {
    /// Provider-side subject identifier (the `sub` claim)
    pub subject: String,

    /// Token issuer
    pub issuer: Option<String>,

    /// Audience the token was minted for
    pub audience: Option<String>,

    /// Client the token was issued to
    pub client_id: Option<String>,

    /// Upstream identity provider, for federated sign-ons
    pub idp: Option<String>,

    /// Authentication method reference
    pub amr: Option<String>,

    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,

    /// Token not valid before this instant
    pub not_before: Option<DateTime<Utc>>,

    /// When the user authenticated at the provider
    pub auth_time: Option<DateTime<Utc>>,

    /// Scopes granted to the token
    pub scopes: Vec<String>,
}

impl ValidatedToken {
    /// Create a validated token for a subject, with no diagnostics set
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            issuer: None,
            audience: None,
            client_id: None,
            idp: None,
            amr: None,
            expires_at: None,
            not_before: None,
            auth_time: None,
            scopes: Vec::new(),
        }
    }

    /// Set the issuer
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Set the expiry
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Set the granted scopes
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }
}

/// Validation endpoint response document
#[derive(Debug, Deserialize)]
struct ValidationResponse {
    client_id: Option<String>,
    sub: Option<String>,
    amr: Option<String>,
    auth_time: Option<i64>,
    idp: Option<String>,
    iss: Option<String>,
    aud: Option<String>,
    exp: Option<i64>,
    nbf: Option<i64>,
    #[serde(default)]
    scope: Vec<String>,
}

impl ValidationResponse {
    /// Promote the wire document to a validated token
    ///
    /// A response without a non-empty `sub` is unusable regardless of what
    /// else it carries.
    fn into_validated(self) -> Result<ValidatedToken, ProviderError> {
        let subject = match self.sub {
            Some(s) if !s.is_empty() => s,
            _ => {
                return Err(ProviderError::InvalidResponse(
                    "validation response is missing the sub field".into(),
                ))
            }
        };

        Ok(ValidatedToken {
            subject,
            issuer: self.iss,
            audience: self.aud,
            client_id: self.client_id,
            idp: self.idp,
            amr: self.amr,
            expires_at: self.exp.and_then(epoch_seconds_to_utc),
            not_before: self.nbf.and_then(epoch_seconds_to_utc),
            auth_time: self.auth_time.and_then(epoch_seconds_to_utc),
            scopes: self.scope,
        })
    }
}

fn epoch_seconds_to_utc(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

/// Convert one userinfo member to a claim value
///
/// Strings pass through raw; every other JSON value keeps its compact JSON
/// form, so `42` becomes "42" and `["a","b"]` becomes "[\"a\",\"b\"]".
fn claim_value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a userinfo body into a claim set
///
/// The body must be a flat JSON object; each member becomes one claim.
fn parse_claims(body: &str) -> Result<ClaimSet, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
    let object = value.as_object().ok_or_else(|| {
        ProviderError::InvalidResponse("userinfo body is not a JSON object".into())
    })?;

    let mut claims = ClaimSet::new();
    for (name, value) in object {
        claims.insert(name.clone(), claim_value_to_string(value));
    }
    Ok(claims)
}

/// Reqwest-backed provider client
pub struct ProviderClient {
    config: ProviderConfig,
    http: reqwest::Client,
}

impl ProviderClient {
    /// Create a client for a provider
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for ProviderClient {
    async fn validate_token(&self, raw_token: &str) -> Result<ValidatedToken, ProviderError> {
        let url = format!("{}{}", self.config.base_url, VALIDATION_PATH);
        debug!(url = %url, "Validating token against provider");

        // The token travels as a query parameter, URL-encoded
        let response = self
            .http
            .get(&url)
            .query(&[("token", raw_token)])
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;
        let parsed: ValidationResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        parsed.into_validated()
    }

    async fn fetch_claims(&self, raw_token: &str) -> Result<ClaimSet, ProviderError> {
        let url = format!("{}{}", self.config.base_url, USERINFO_PATH);
        debug!(url = %url, "Fetching user claims");

        let response = self
            .http
            .get(&url)
            .bearer_auth(raw_token)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;

        // Non-2xx keeps its HTTP shape (status code + reason phrase)
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Unreachable(e.to_string()))?;
        parse_claims(&body)
    }
}
