//! Why an attempted action was refused.

use serde::{Deserialize, Serialize};

/// Human-readable cause of a refusal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reason(String);

impl Reason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Reason {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Reason {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A policy's refusal of a hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    reason: Reason,
}

impl Rejection {
    pub fn new(reason: Reason) -> Self {
        Self { reason }
    }

    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self::new(Reason::new(reason))
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    pub fn into_reason(self) -> Reason {
        self.reason
    }
}
