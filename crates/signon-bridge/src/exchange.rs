//! Login exchange - turns an external bearer token into a session token
//!
//! The exchange is a short linear pipeline: validate the token with the
//! provider, fetch claims, run the optional post-authentication hook, map
//! to a credential record, then hand off to the issuance boundary. Each
//! step either produces what the next one needs or aborts the exchange.

use std::sync::Arc;

use tracing::{debug, info, warn};

use signon_core::{ClaimSet, CredentialMapper, CredentialRecord, UserIdDeriver};

use crate::config::ExchangeConfig;
use crate::error::{ExchangeError, Result};
use crate::hooks::AuthenticatedHook;
use crate::issuer::{IssuanceRequest, SessionIssuer, SessionToken};
use crate::provider::IdentityProvider;

/// Orchestrates one kind of login exchange
///
/// Holds no per-call state: concurrent `execute` calls are independent,
/// and the whole exchange can be cancelled by dropping its future (for
/// example under `tokio::time::timeout`).
pub struct LoginExchange<C: CredentialRecord> {
    provider: Arc<dyn IdentityProvider>,
    mapper: CredentialMapper<C>,
    deriver: Arc<dyn UserIdDeriver>,
    issuer: Arc<dyn SessionIssuer<C>>,
    hook: Option<Arc<dyn AuthenticatedHook>>,
    config: ExchangeConfig,
}

impl<C: CredentialRecord> LoginExchange<C> {
    /// Create an exchange from its collaborators
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        mapper: CredentialMapper<C>,
        deriver: Arc<dyn UserIdDeriver>,
        issuer: Arc<dyn SessionIssuer<C>>,
        config: ExchangeConfig,
    ) -> Self {
        Self {
            provider,
            mapper,
            deriver,
            issuer,
            hook: None,
            config,
        }
    }

    /// Register a post-authentication hook
    pub fn with_hook(mut self, hook: Arc<dyn AuthenticatedHook>) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Exchange a bearer token for a session token
    ///
    /// # Arguments
    /// * `raw_token` - The bearer token minted by the external provider
    ///
    /// # Returns
    /// * `Ok(SessionToken)` - The issuer's output, returned unchanged
    /// * `Err(ExchangeError)` - Which step failed and why
    pub async fn execute(&self, raw_token: &str) -> Result<SessionToken> {
        // Step 1: reject empty input before touching the network
        if raw_token.trim().is_empty() {
            warn!("Login exchange rejected: empty token");
            return Err(ExchangeError::BadRequest);
        }

        // Step 2: ask the provider whether the token is valid
        let validated = match self.provider.validate_token(raw_token).await {
            Ok(validated) => validated,
            Err(e) => {
                warn!(error = %e, "Token validation failed");
                return Err(ExchangeError::TokenInvalid { source: e });
            }
        };
        debug!(subject = %validated.subject, "Token accepted by provider");

        // Step 3: fetch the user's claims; a failed fetch is fatal, an
        // empty claim set is never substituted for it
        let mut claims = match self.provider.fetch_claims(raw_token).await {
            Ok(claims) => claims,
            Err(e) => {
                warn!(subject = %validated.subject, error = %e, "Claims fetch failed");
                return Err(ExchangeError::ClaimsUnavailable { source: e });
            }
        };

        // Step 4: the validated subject out-ranks any `sub` the userinfo
        // body carried
        claims.insert(ClaimSet::SUBJECT, validated.subject.clone());

        // Step 5: post-authentication hook; a later mapping failure must
        // not hide the login from the host
        if let Some(hook) = &self.hook {
            if let Err(e) = hook.on_authenticated(&validated.subject, &claims).await {
                if self.config.abort_on_hook_failure {
                    warn!(subject = %validated.subject, error = %e, "Post-authentication hook failed, aborting");
                    return Err(ExchangeError::HookFailed(e));
                }
                warn!(subject = %validated.subject, error = %e, "Post-authentication hook failed, continuing");
            }
        }

        // Step 6: map to the application credential record
        let record = self
            .mapper
            .build(&validated.subject, &claims, self.deriver.as_ref())?;

        // Step 7: hand off to the issuance boundary
        let request = IssuanceRequest {
            credentials: &record,
            lifetime: self.config.token_lifetime,
            master_key: &self.config.master_key,
        };
        let session = self
            .issuer
            .issue(request)
            .await
            .map_err(ExchangeError::IssuanceFailed)?;

        info!(
            subject = %validated.subject,
            user_id = %session.user_id,
            claim_count = claims.len(),
            "Login exchange completed"
        );
        Ok(session)
    }
}
