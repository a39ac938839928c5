//! Post-authentication hook

use async_trait::async_trait;

use signon_core::ClaimSet;

use crate::error::BoxError;

/// Invoked after the provider accepts a login, before the credential record
/// is built or a session is issued
///
/// Hosts use this for side effects such as provisioning the user record or
/// recording the sign-on. The claim set already contains the validated
/// subject under [`ClaimSet::SUBJECT`]. By default a failure here aborts
/// the exchange; see `ExchangeConfig::with_abort_on_hook_failure`.
#[async_trait]
pub trait AuthenticatedHook: Send + Sync {
    /// Run after validation and claims retrieval succeed
    async fn on_authenticated(&self, subject: &str, claims: &ClaimSet) -> Result<(), BoxError>;
}
