//! Ordered claim sets
//!
//! Claims are name/value string pairs, typically fetched from the provider's
//! userinfo endpoint. Insertion order is preserved so iteration and test
//! output stay deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered set of string claims
///
/// Backed by an insertion-ordered map. Inserting an existing name replaces
/// the value but keeps the original position (last write wins). Serializes
/// as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: IndexMap<String, String>,
}

impl ClaimSet {
    /// Reserved claim name carrying the provider-validated subject identifier
    pub const SUBJECT: &'static str = "sub";

    /// Create an empty claim set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a claim
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.claims.insert(name.into(), value.into());
    }

    /// Add a claim, builder style
    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a claim value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.claims.get(name).map(String::as_str)
    }

    /// Check whether a claim is present
    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    /// Number of claims in the set
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Check whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Iterate over claims in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.claims.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Merge another claim set into this one (last write wins)
    pub fn merge(&mut self, other: ClaimSet) {
        for (name, value) in other.claims {
            self.claims.insert(name, value);
        }
    }
}

impl FromIterator<(String, String)> for ClaimSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            claims: iter.into_iter().collect(),
        }
    }
}
