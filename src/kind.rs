//! Database kind definitions.

use serde::Serialize;
use std::fmt;

use crate::{Error, Result};

/// GeoKind selects which list family a buffer is decoded as.
///
/// The kind is always declared by the caller; a buffer is never probed
/// to guess it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeoKind {
    /// Domain rule lists (`geosite.dat`)
    GeoSite,
    /// IP prefix lists (`geoip.dat`)
    GeoIp,
}

impl GeoKind {
    /// Parse a kind from a string (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "geosite" => Ok(GeoKind::GeoSite),
            "geoip" => Ok(GeoKind::GeoIp),
            _ => Err(Error::InvalidKind(s.to_string())),
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoKind::GeoSite => "geosite",
            GeoKind::GeoIp => "geoip",
        }
    }
}

impl fmt::Display for GeoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GeoKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
