//! Participant identity.
//!
//! A user can be payer, organizer, and share holder at the same time. The
//! engine keys every role with the same opaque [`UserId`] so identity is
//! compared once, in one representation, everywhere: shares, balances, and
//! transfers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, comparable participant key.
///
/// `Ord` matters: it is the deterministic tie-break for equal-magnitude
/// balances during debt simplification.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}
