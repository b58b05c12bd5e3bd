//! The three fixed kinds of quantum object.
//!
//! Each variant carries its own decay rate and analysis message, and declares
//! whether it supports emergency cooldown. Nothing here inspects types at
//! runtime: callers ask [`Variant::supports_cooldown`] before dispatching.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Kind of a quantum object. Fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    /// Harmless data container. Not critical.
    DataPacket,
    /// Unstable matter. Critical.
    DarkMatter,
    /// Highly unstable matter. Critical.
    AntiMatter,
}

impl Variant {
    /// Every variant, in factory order.
    pub const ALL: [Variant; 3] = [Self::DataPacket, Self::DarkMatter, Self::AntiMatter];

    /// Stability lost per analysis.
    pub fn decay(self) -> f64 {
        match self {
            Self::DataPacket => 5.0,
            Self::DarkMatter => 15.0,
            Self::AntiMatter => 25.0,
        }
    }

    /// What an analysis reports.
    pub fn analysis_message(self) -> &'static str {
        match self {
            Self::DataPacket => "data content read",
            Self::DarkMatter => "dark matter analyzed",
            Self::AntiMatter => "fabric of the universe trembles",
        }
    }

    /// Whether objects of this variant expose emergency cooldown.
    pub fn supports_cooldown(self) -> bool {
        !matches!(self, Self::DataPacket)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::DataPacket => "DataPacket",
            Self::DarkMatter => "DarkMatter",
            Self::AntiMatter => "AntiMatter",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized variant name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant '{0}' (expected data, dark, or anti)")]
pub struct ParseVariantError(pub String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "data" | "datapacket" => Ok(Self::DataPacket),
            "dark" | "darkmatter" => Ok(Self::DarkMatter),
            "anti" | "antimatter" => Ok(Self::AntiMatter),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}
