//! Strongly-typed tenant identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::TenancyError;

/// Identifier of a tenant (multi-tenant boundary).
///
/// Supplied externally (e.g. by a request header) and compared exactly:
/// no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TenantId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TenantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for TenantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TenantId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl FromStr for TenantId {
    type Err = TenancyError;

    /// Parses an identifier coming from configuration, where an empty id is invalid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(TenancyError::configuration("tenant id must not be empty"));
        }
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(TenantId::new("Acme"), TenantId::new("acme"));
    }

    #[test]
    fn parse_rejects_empty() {
        assert!("".parse::<TenantId>().is_err());
        assert_eq!("acme".parse::<TenantId>().unwrap().as_str(), "acme");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&TenantId::new("globex")).unwrap();
        assert_eq!(json, "\"globex\"");
    }
}
