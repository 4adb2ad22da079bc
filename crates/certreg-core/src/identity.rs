//! Caller identities and the per-call execution context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The reserved null/burn identity. Never valid as a recipient or authority.
pub const NULL_PRINCIPAL: &str = "SP000000000000000000002Q6VF78";

/// An opaque, comparable identity token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(pub String);

impl Principal {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The reserved null identity.
    pub fn null() -> Self {
        Self(NULL_PRINCIPAL.to_string())
    }

    pub fn is_null(&self) -> bool {
        self.0 == NULL_PRINCIPAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Principal {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Principal {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Who is calling and at what logical height.
///
/// Supplied by the transport for every mutating operation; the registry
/// never advances the height itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Principal,
    pub height: u64,
}

impl CallContext {
    pub fn new(caller: impl Into<Principal>, height: u64) -> Self {
        Self {
            caller: caller.into(),
            height,
        }
    }
}
