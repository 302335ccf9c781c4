//! Domain types shared by the catalog, the registry and the session.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

/// A named, user-togglable data-use permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsentOption {
    /// Stable key stored in the registry file.
    pub key: &'static str,
    /// Human-readable description shown in prompts.
    pub description: &'static str,
}

/// Two-letter uppercase location code (`^[A-Z]{2}$`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationCode(String);

impl LocationCode {
    /// Validate and wrap a location code. No trimming or case folding.
    pub fn parse(code: &str) -> Result<Self> {
        if LOCATION_RE.is_match(code) {
            Ok(Self(code.to_string()))
        } else {
            Err(Error::InvalidLocation(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LocationCode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<LocationCode> for String {
    fn from(code: LocationCode) -> Self {
        code.0
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// State of one (user, option) pair. `Unset` is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Unset,
    Granted,
    Revoked,
}

impl From<Option<bool>> for ConsentState {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::Granted,
            Some(false) => Self::Revoked,
        }
    }
}

impl fmt::Display for ConsentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "Unset"),
            Self::Granted => write!(f, "Granted"),
            Self::Revoked => write!(f, "Revoked"),
        }
    }
}

/// A registry entry: profile plus consent flags keyed by option key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Registry key; carried by the map in the file, not the record.
    #[serde(skip)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationCode>,
    /// Absent keys are `Unset`; `true` is granted, `false` revoked.
    #[serde(rename = "consentPreferences", default)]
    pub consent_preferences: BTreeMap<String, bool>,
}

impl User {
    /// Create a user with an empty consent map. Rejects an empty name.
    pub fn new(id: impl Into<String>, name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        Ok(Self {
            id: id.into(),
            name: name.to_string(),
            location: None,
            consent_preferences: BTreeMap::new(),
        })
    }

    /// Current state of a single option.
    pub fn state_of(&self, key: &str) -> ConsentState {
        self.consent_preferences.get(key).copied().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_accepts_two_uppercase_letters() {
        assert_eq!(LocationCode::parse("CA").unwrap().as_str(), "CA");
        assert_eq!(LocationCode::parse("ZZ").unwrap().to_string(), "ZZ");
    }

    #[test]
    fn test_location_rejects_malformed() {
        for bad in ["", "ca", "Ca", "CAL", "C", "C1", " CA", "CA "] {
            assert!(
                matches!(LocationCode::parse(bad), Err(Error::InvalidLocation(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_location_serde_validates() {
        let code: LocationCode = serde_json::from_str("\"UT\"").unwrap();
        assert_eq!(code.as_str(), "UT");
        assert!(serde_json::from_str::<LocationCode>("\"utah\"").is_err());
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"UT\"");
    }

    #[test]
    fn test_state_from_flag() {
        assert_eq!(ConsentState::from(None), ConsentState::Unset);
        assert_eq!(ConsentState::from(Some(true)), ConsentState::Granted);
        assert_eq!(ConsentState::from(Some(false)), ConsentState::Revoked);
    }

    #[test]
    fn test_user_requires_name() {
        assert!(matches!(User::new("id", ""), Err(Error::EmptyName)));
        let user = User::new("id", "Alice").unwrap();
        assert!(user.consent_preferences.is_empty());
        assert_eq!(user.state_of("personalizedRecommendations"), ConsentState::Unset);
    }

    #[test]
    fn test_user_json_shape() {
        let mut user = User::new("abc", "Alice").unwrap();
        user.consent_preferences.insert("dataSharingWithThirdParties".into(), false);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Alice",
                "consentPreferences": { "dataSharingWithThirdParties": false }
            })
        );
    }
}
