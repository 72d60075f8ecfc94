use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Maximum length for registry identifiers, in characters.
const MAX_ID_LEN: usize = 128;

fn validate_id(kind: &'static str, raw: &str) -> Result<(), TypeError> {
    if raw.is_empty() {
        return Err(TypeError::EmptyId { kind });
    }
    if raw.chars().count() > MAX_ID_LEN {
        return Err(TypeError::IdTooLong {
            kind,
            max: MAX_ID_LEN,
            actual: raw.chars().count(),
        });
    }
    if let Some(ch) = raw.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(TypeError::InvalidIdCharacter { kind, ch });
    }
    Ok(())
}

/// Unique identifier of a property in the registry.
///
/// Assigned by the caller at registration and immutable afterwards. The
/// registry enforces uniqueness; this type only enforces that the string is
/// a plausible key (non-empty, no whitespace or control characters).
/// Deserialization goes through the same validation, so an invalid id never
/// enters the system from the wire.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyId(String);

impl PropertyId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let raw = raw.into();
        validate_id("property id", &raw)?;
        Ok(Self(raw))
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PropertyId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PropertyId {
    type Error = TypeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

impl fmt::Debug for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PropertyId({})", self.0)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity reference for an owner or transfer participant.
///
/// The value is asserted by the authentication layer; the registry treats it
/// as an opaque key and never interprets its contents.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartyId(String);

impl PartyId {
    /// Validate and wrap a raw identity reference.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let raw = raw.into();
        validate_id("party id", &raw)?;
        Ok(Self(raw))
    }

    /// The raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PartyId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for PartyId {
    type Error = TypeError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<PartyId> for String {
    fn from(id: PartyId) -> Self {
        id.0
    }
}

impl fmt::Debug for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartyId({})", self.0)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
