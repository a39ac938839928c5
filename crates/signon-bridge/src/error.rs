//! Error types for the sign-on bridge

use thiserror::Error;

use signon_core::CredentialError;

/// Boxed error type carried across host-supplied boundaries
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias using ExchangeError
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Failures while talking to the OIDC provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider could not be reached, timed out, or its validation
    /// endpoint answered with a failing status
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a body the bridge cannot use
    #[error("provider response invalid: {0}")]
    InvalidResponse(String),

    /// The claims endpoint rejected the request
    #[error("claims endpoint returned {status} {reason}")]
    Http {
        /// HTTP status code
        status: u16,
        /// HTTP reason phrase
        reason: String,
    },
}

/// Failures of a login exchange
///
/// `Display` output and source chains are diagnostics for logs and may name
/// infrastructure; `client_message` is the only text meant for callers.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// The supplied login token was empty; detected before any network call
    #[error("login token must not be empty")]
    BadRequest,

    /// The provider did not accept the token, or could not be asked.
    /// Callers see one category for both so infrastructure state never
    /// leaks through the failure kind.
    #[error("unable to validate token: {source}")]
    TokenInvalid {
        /// What went wrong at the validation endpoint
        source: ProviderError,
    },

    /// The token was valid but the user's claims could not be retrieved
    #[error("unable to retrieve user claims: {source}")]
    ClaimsUnavailable {
        /// What went wrong at the claims endpoint
        source: ProviderError,
    },

    /// Mapping the validated identity to a credential record failed
    #[error("credential mapping failed: {0}")]
    Mapping(#[from] CredentialError),

    /// The post-authentication hook failed and the exchange is configured
    /// to abort
    #[error("post-authentication hook failed: {0}")]
    HookFailed(#[source] BoxError),

    /// The session issuance boundary failed
    #[error("session issuance failed: {0}")]
    IssuanceFailed(#[source] BoxError),
}

impl ExchangeError {
    /// HTTP-equivalent status code for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            ExchangeError::BadRequest => 400,
            ExchangeError::TokenInvalid { .. } => 400,
            ExchangeError::ClaimsUnavailable { .. } => 502,
            ExchangeError::Mapping(_) => 500,
            ExchangeError::HookFailed(_) => 500,
            ExchangeError::IssuanceFailed(_) => 500,
        }
    }

    /// Stable machine-readable key for this failure
    pub fn error_key(&self) -> &'static str {
        match self {
            ExchangeError::BadRequest => "bad_request",
            ExchangeError::TokenInvalid { .. } => "token_invalid",
            ExchangeError::ClaimsUnavailable { .. } => "claims_unavailable",
            ExchangeError::Mapping(_) => "mapping_error",
            ExchangeError::HookFailed(_) => "hook_failed",
            ExchangeError::IssuanceFailed(_) => "issuance_failed",
        }
    }

    /// Safe text for callers; never names hosts, endpoints, or claim data
    pub fn client_message(&self) -> &'static str {
        match self {
            ExchangeError::BadRequest => "login token must not be empty",
            ExchangeError::TokenInvalid { .. } => "Unable to validate token",
            ExchangeError::ClaimsUnavailable { .. } => "unable to retrieve user claims",
            ExchangeError::Mapping(_)
            | ExchangeError::HookFailed(_)
            | ExchangeError::IssuanceFailed(_) => "login could not be completed",
        }
    }
}
