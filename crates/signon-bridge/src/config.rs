//! Bridge configuration

use std::fmt;
use std::time::Duration;

/// Default per-call timeout for provider requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default session lifetime requested from the issuer (30 days)
pub fn default_token_lifetime() -> chrono::Duration {
    chrono::Duration::days(30)
}

/// Configuration for talking to the OIDC provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider, e.g. "https://login.example.com/identity"
    pub base_url: String,

    /// Per-call timeout applied to every provider request; expiry is
    /// reported as the provider being unreachable
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Create a configuration for a provider base URL
    ///
    /// A trailing slash is dropped so endpoint paths can be appended
    /// verbatim.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-call timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Opaque signing secret for the session issuer
///
/// The bridge never reads the key; it is forwarded to the issuance boundary
/// as-is. Debug output is redacted so the secret cannot reach logs.
#[derive(Clone)]
pub struct MasterKey(String);

impl MasterKey {
    /// Wrap a master key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key material
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MasterKey(..)")
    }
}

/// Settings governing a login exchange
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// Opaque signing secret forwarded to the issuer
    pub master_key: MasterKey,

    /// Session lifetime requested from the issuer (default 30 days)
    pub token_lifetime: chrono::Duration,

    /// Whether a failing post-authentication hook aborts the exchange
    /// (default true)
    pub abort_on_hook_failure: bool,
}

impl ExchangeConfig {
    /// Create a configuration with the default lifetime and hook policy
    pub fn new(master_key: MasterKey) -> Self {
        Self {
            master_key,
            token_lifetime: default_token_lifetime(),
            abort_on_hook_failure: true,
        }
    }

    /// Request a different session lifetime
    pub fn with_token_lifetime(mut self, lifetime: chrono::Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Control whether a failing hook aborts the exchange
    pub fn with_abort_on_hook_failure(mut self, abort: bool) -> Self {
        self.abort_on_hook_failure = abort;
        self
    }
}
