//! Sign-On Bridge
//!
//! The Sign-On Bridge exchanges bearer tokens minted by an external OIDC
//! provider for application session tokens. It validates the token with the
//! provider, fetches the user's claims, maps them to an application
//! credential record, and hands the record to a caller-supplied issuance
//! boundary.
//!
//! ## Architecture
//!
//! A login exchange is a short linear pipeline:
//!
//! 1. Reject empty tokens before any network traffic
//! 2. Validate the token against `/connect/accesstokenvalidation`
//! 3. Fetch claims from `/connect/userinfo` (bearer auth)
//! 4. Overwrite the `sub` claim with the validated subject
//! 5. Run the optional post-authentication hook
//! 6. Map subject + claims to a credential record
//! 7. Issue the session token through the `SessionIssuer` boundary
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use signon_bridge::{ExchangeConfig, LoginExchange, MasterKey, ProviderClient, ProviderConfig};
//! use signon_core::{CredentialMapper, OidcCredentials};
//!
//! let provider = Arc::new(ProviderClient::new(ProviderConfig::new(
//!     "https://login.example.com/identity",
//! )));
//! let exchange: LoginExchange<OidcCredentials> = LoginExchange::new(
//!     provider,
//!     CredentialMapper::new(),
//!     Arc::new(|provider: &str, subject: &str| format!("{}:{}", provider, subject)),
//!     issuer,
//!     ExchangeConfig::new(MasterKey::new(master_key)),
//! );
//!
//! let session = exchange.execute(bearer_token).await?;
//! println!("Issued until {}", session.expires_at);
//! ```

pub mod config;
pub mod error;
pub mod exchange;
pub mod hooks;
pub mod issuer;
pub mod provider;

pub use config::{ExchangeConfig, MasterKey, ProviderConfig, DEFAULT_TIMEOUT};
pub use error::{BoxError, ExchangeError, ProviderError, Result};
pub use exchange::LoginExchange;
pub use hooks::AuthenticatedHook;
pub use issuer::{IssuanceRequest, SessionIssuer, SessionToken};
pub use provider::{IdentityProvider, ProviderClient, ValidatedToken};
