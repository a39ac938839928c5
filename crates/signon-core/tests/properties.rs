//! Property-Based Tests for Credential Mapping Invariants
//!
//! These tests verify the mapping laws hold for arbitrary inputs:
//! 1. DETERMINISM: the same (provider, subject) always derives the same user id
//! 2. ROUND-TRIP: serialize followed by deserialize returns an equal record
//! 3. ORDER: claim iteration order equals insertion order
//!
//! Uses proptest for property-based testing with arbitrary inputs.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use signon_core::{ClaimSet, CredentialMapper, CredentialRecord, OidcCredentials};
use std::collections::HashSet;

/// A richer record than the default, for exercising round-trips over
/// optional and repeated fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DirectoryCredentials {
    provider: String,
    user_id: String,
    email: Option<String>,
    display_name: Option<String>,
    roles: Vec<String>,
}

impl CredentialRecord for DirectoryCredentials {
    fn new(provider: &str, user_id: String) -> Self {
        Self {
            provider: provider.to_string(),
            user_id,
            email: None,
            display_name: None,
            roles: Vec::new(),
        }
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}

fn pipe_deriver(provider: &str, subject: &str) -> String {
    format!("{}|{}", provider, subject)
}

// =============================================================================
// INVARIANT 1: DETERMINISM - derived ids are reproducible
// =============================================================================

proptest! {
    /// The same (provider, subject) derives the same id across mapper
    /// instances and repeated calls
    #[test]
    fn prop_derived_id_deterministic(
        provider in "[A-Za-z]{3,12}",
        subject in "[a-z0-9-]{1,20}",
    ) {
        let mapper_a: CredentialMapper<OidcCredentials> =
            CredentialMapper::new().with_provider_name(provider.clone());
        let mapper_b: CredentialMapper<OidcCredentials> =
            CredentialMapper::new().with_provider_name(provider.clone());

        let first = mapper_a
            .build(&subject, &ClaimSet::new(), &pipe_deriver)
            .expect("build should succeed");
        let second = mapper_b
            .build(&subject, &ClaimSet::new(), &pipe_deriver)
            .expect("build should succeed");
        let third = mapper_a
            .build(&subject, &ClaimSet::new(), &pipe_deriver)
            .expect("build should succeed");

        prop_assert_eq!(&first.user_id, &second.user_id);
        prop_assert_eq!(&first.user_id, &third.user_id);
        prop_assert_eq!(first.user_id, format!("{}|{}", provider, subject));
    }

    /// The provider name configured on the mapper is what reaches the deriver
    #[test]
    fn prop_provider_name_reaches_deriver(
        provider in "[A-Za-z]{3,12}",
        subject in "[a-z0-9-]{1,20}",
    ) {
        let mapper: CredentialMapper<OidcCredentials> =
            CredentialMapper::new().with_provider_name(provider.clone());
        let record = mapper
            .build(&subject, &ClaimSet::new(), &pipe_deriver)
            .expect("build should succeed");

        prop_assert_eq!(record.provider, provider.clone());
        prop_assert!(record.user_id.starts_with(&provider));
    }
}

// =============================================================================
// INVARIANT 2: ROUND-TRIP - serialize then deserialize is identity
// =============================================================================

proptest! {
    /// Default records survive a serialize/deserialize round-trip
    #[test]
    fn prop_default_record_round_trip(
        provider in "[A-Za-z]{3,12}",
        subject in "[a-z0-9-]{1,20}",
    ) {
        let mapper: CredentialMapper<OidcCredentials> =
            CredentialMapper::new().with_provider_name(provider);
        let record = mapper
            .build(&subject, &ClaimSet::new(), &pipe_deriver)
            .expect("build should succeed");

        let document = mapper.serialize(&record).expect("serialize should succeed");
        let restored = mapper.deserialize(document).expect("deserialize should succeed");

        prop_assert_eq!(restored, record);
    }

    /// Records with optional and repeated fields survive the round-trip,
    /// including a pass through JSON text
    #[test]
    fn prop_directory_record_round_trip(
        subject in "[a-z0-9-]{1,16}",
        email in prop::option::of("[ -~]{0,24}"),
        display_name in prop::option::of("[ -~]{0,24}"),
        roles in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let mapper: CredentialMapper<DirectoryCredentials> = CredentialMapper::new();
        let record = DirectoryCredentials {
            provider: "OpenIDConnect".to_string(),
            user_id: format!("uid-{}", subject),
            email,
            display_name,
            roles,
        };

        let document = mapper.serialize(&record).expect("serialize should succeed");
        let restored = mapper
            .deserialize(document.clone())
            .expect("deserialize should succeed");
        prop_assert_eq!(&restored, &record);

        // Same law through the printed JSON text
        let text = document.to_string();
        let reparsed: serde_json::Value =
            serde_json::from_str(&text).expect("document text should parse");
        let restored = mapper.deserialize(reparsed).expect("deserialize should succeed");
        prop_assert_eq!(restored, record);
    }
}

// =============================================================================
// INVARIANT 3: ORDER - claim iteration matches insertion
// =============================================================================

proptest! {
    /// Iteration yields first-insertion order; repeated names keep their
    /// position and take the last written value
    #[test]
    fn prop_claim_iteration_matches_insertion(
        entries in prop::collection::vec(("[a-z]{1,8}", "[ -~]{0,16}"), 0..12),
    ) {
        let mut expected_order: Vec<String> = Vec::new();
        let mut claims = ClaimSet::new();
        for (name, value) in &entries {
            if !expected_order.contains(name) {
                expected_order.push(name.clone());
            }
            claims.insert(name.clone(), value.clone());
        }

        let actual: Vec<String> = claims.iter().map(|(name, _)| name.to_string()).collect();
        prop_assert_eq!(actual, expected_order);

        // Last write wins for every repeated name
        let mut seen = HashSet::new();
        for (name, value) in entries.iter().rev() {
            if seen.insert(name.clone()) {
                prop_assert_eq!(claims.get(name), Some(value.as_str()));
            }
        }
    }

    /// Claim sets survive a serde round-trip with order intact
    #[test]
    fn prop_claim_set_serde_round_trip(
        entries in prop::collection::vec(("[a-z]{1,8}", "[ -~]{0,16}"), 0..12),
    ) {
        let mut claims = ClaimSet::new();
        for (name, value) in &entries {
            claims.insert(name.clone(), value.clone());
        }

        let value = serde_json::to_value(&claims).expect("claims should serialize");
        let restored: ClaimSet = serde_json::from_value(value).expect("claims should deserialize");

        prop_assert_eq!(&restored, &claims);
        let original_order: Vec<&str> = claims.iter().map(|(name, _)| name).collect();
        let restored_order: Vec<&str> = restored.iter().map(|(name, _)| name).collect();
        prop_assert_eq!(restored_order, original_order);
    }
}

// =============================================================================
// ADDITIONAL UNIT TESTS (non-proptest)
// =============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_empty_subject_rejected() {
        let mapper: CredentialMapper<OidcCredentials> = CredentialMapper::new();
        assert!(mapper.build("", &ClaimSet::new(), &pipe_deriver).is_err());
    }

    #[test]
    fn test_validated_subject_claim_overrides_fetched_one() {
        // Userinfo bodies may carry their own "sub"; inserting the validated
        // subject afterwards must win while keeping the original position.
        let mut claims = ClaimSet::new();
        claims.insert(ClaimSet::SUBJECT, "spoofed");
        claims.insert("email", "a@b.com");
        claims.insert(ClaimSet::SUBJECT, "user-123");

        assert_eq!(claims.get(ClaimSet::SUBJECT), Some("user-123"));
        let order: Vec<&str> = claims.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["sub", "email"]);
    }

    #[test]
    fn test_enrichment_runs_after_base_construction() {
        let mapper: CredentialMapper<DirectoryCredentials> = CredentialMapper::new()
            .with_enrichment(|record: &mut DirectoryCredentials, claims: &ClaimSet| {
                record.email = claims.get("email").map(String::from);
                record.display_name = claims.get("name").map(String::from);
            });

        let claims = ClaimSet::new()
            .with_claim("email", "a@b.com")
            .with_claim("name", "A B");
        let record = mapper.build("user-123", &claims, &pipe_deriver).unwrap();

        assert_eq!(record.user_id, "OpenIDConnect|user-123");
        assert_eq!(record.email, Some("a@b.com".to_string()));
        assert_eq!(record.display_name, Some("A B".to_string()));
    }
}
