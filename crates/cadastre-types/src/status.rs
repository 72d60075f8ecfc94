use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Status vocabulary for a registered property.
///
/// The vocabulary is closed: wire tokens outside this set are rejected at
/// parse time instead of being stored verbatim. Only [`Regular`] permits an
/// ownership transfer.
///
/// [`Regular`]: PropertyStatus::Regular
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyStatus {
    /// Unencumbered and transferable.
    #[serde(rename = "REGULAR")]
    Regular,
    /// Administratively blocked; no transfers.
    #[serde(rename = "BLOQUEADO")]
    Bloqueado,
    /// Under legal dispute; no transfers.
    #[serde(rename = "EM_DISPUTA")]
    EmDisputa,
}

impl PropertyStatus {
    /// The canonical wire token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "REGULAR",
            Self::Bloqueado => "BLOQUEADO",
            Self::EmDisputa => "EM_DISPUTA",
        }
    }

    /// Whether a property in this status may change owners.
    pub fn permits_transfer(&self) -> bool {
        matches!(self, Self::Regular)
    }
}

impl FromStr for PropertyStatus {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR" => Ok(Self::Regular),
            "BLOQUEADO" => Ok(Self::Bloqueado),
            "EM_DISPUTA" => Ok(Self::EmDisputa),
            other => Err(TypeError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
