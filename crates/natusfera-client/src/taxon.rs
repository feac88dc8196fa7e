use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NatusferaError;

/// Iconic taxa accepted by the `iconic_taxa` observation filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IconicTaxon {
    Chromista,
    Protozoa,
    Animalia,
    Mollusca,
    Arachnida,
    Insecta,
    Aves,
    Mammalia,
    Amphibia,
    Reptilia,
    Actinopterygii,
    Fungi,
    Plantae,
    /// Observations not yet placed in any iconic taxon
    #[serde(rename = "unknown")]
    Unknown,
}

impl IconicTaxon {
    pub const ALL: [IconicTaxon; 14] = [
        Self::Chromista,
        Self::Protozoa,
        Self::Animalia,
        Self::Mollusca,
        Self::Arachnida,
        Self::Insecta,
        Self::Aves,
        Self::Mammalia,
        Self::Amphibia,
        Self::Reptilia,
        Self::Actinopterygii,
        Self::Fungi,
        Self::Plantae,
        Self::Unknown,
    ];

    /// Name as the API expects it (case-sensitive)
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chromista => "Chromista",
            Self::Protozoa => "Protozoa",
            Self::Animalia => "Animalia",
            Self::Mollusca => "Mollusca",
            Self::Arachnida => "Arachnida",
            Self::Insecta => "Insecta",
            Self::Aves => "Aves",
            Self::Mammalia => "Mammalia",
            Self::Amphibia => "Amphibia",
            Self::Reptilia => "Reptilia",
            Self::Actinopterygii => "Actinopterygii",
            Self::Fungi => "Fungi",
            Self::Plantae => "Plantae",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for IconicTaxon {
    type Err = NatusferaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NatusferaError::InvalidTaxon(s.to_string()))
    }
}

impl fmt::Display for IconicTaxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
