//! Candidate login material. Holds the fixed ordered list of factory-default
//! credential pairs tried against every HTTP endpoint.

use serde::{Deserialize, Serialize};

/// Factory-default pairs, tried in this order after the unauthenticated attempt
const DEFAULT_CREDENTIALS: &[(&str, &str)] = &[
    ("admin", "admin"),
    ("admin", "12345"),
    ("root", "root"),
    ("user", "user"),
    ("administrator", "admin"),
];

/// A username/password pair from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Immutable, ordered credential list consulted for every HTTP endpoint.
/// Order is the only sequencing guarantee the probes make.
pub struct CredentialStore {
    pairs: Vec<Credential>,
}

impl CredentialStore {
    pub fn new(pairs: Vec<Credential>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[Credential] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Attempt sequence for one endpoint: unauthenticated first, then every
    /// stored pair in order.
    pub fn attempts(&self) -> impl Iterator<Item = Option<&Credential>> {
        std::iter::once(None).chain(self.pairs.iter().map(Some))
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(
            DEFAULT_CREDENTIALS
                .iter()
                .map(|(username, password)| Credential::new(username, password))
                .collect(),
        )
    }
}
