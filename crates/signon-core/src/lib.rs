//! # Signon Core
//!
//! Claim sets and credential mapping for the sign-on bridge: the pure data
//! half of exchanging an external OpenID Connect login for an application
//! session.
//!
//! ## Key Concepts
//!
//! - **ClaimSet**: insertion-ordered name/value claims from the provider
//! - **CredentialRecord**: application-defined record carrying the derived user id
//! - **CredentialMapper**: builds records from validated subjects and claims
//! - **UserIdDeriver**: host-supplied deterministic (provider, subject) -> user id
//!
//! ## Invariants
//!
//! 1. The same (provider, subject) pair always derives the same user id
//! 2. serialize followed by deserialize returns an equal record
//! 3. Claim iteration order equals insertion order

pub mod claims;
pub mod credentials;
pub mod error;
pub mod mapper;

pub use claims::ClaimSet;
pub use credentials::{CredentialRecord, OidcCredentials, DEFAULT_PROVIDER_NAME};
pub use error::{CredentialError, Result};
pub use mapper::{CredentialMapper, UserIdDeriver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
