//! Content platforms tracked by the ledger

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// A content platform. The ledger partitions last-seen records by platform so
/// new platforms can be added without migrating existing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "youtube")]
    YouTube,
}

impl Platform {
    /// Every known platform
    pub const ALL: [Platform; 1] = [Platform::YouTube];

    /// Stable on-disk name
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::YouTube => "youtube",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::configuration(format!("unknown platform '{s}'")))
    }
}
