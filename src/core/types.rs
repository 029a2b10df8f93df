use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::utils::validation::ValidationError;

/// Sample identifier derived from a read file name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SampleKey(pub String);

impl SampleKey {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SampleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mate of a paired-end read file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Orientation {
    R1,
    R2,
}

impl Orientation {
    /// Parse an orientation token (`1`, `R1`, `2`, `R2`).
    ///
    /// Any other token yields `None`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "1" | "R1" => Some(Self::R1),
            "2" | "R2" => Some(Self::R2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::R1 => write!(f, "R1"),
            Self::R2 => write!(f, "R2"),
        }
    }
}

/// Sequencing platform a report was produced for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Short-read paired-end
    Illumina,
    /// Long-read single-end
    Nanopore,
    /// Both of the above for the same sample
    Hybrid,
}

impl Platform {
    /// Lowercase label written into reports
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Illumina => "illumina",
            Self::Nanopore => "nanopore",
            Self::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Size of the reference genome in bases. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSize(NonZeroU64);

impl ReferenceSize {
    /// # Errors
    ///
    /// Returns `ValidationError::ZeroReferenceSize` if `bases` is zero.
    pub fn new(bases: u64) -> Result<Self, ValidationError> {
        NonZeroU64::new(bases)
            .map(Self)
            .ok_or(ValidationError::ZeroReferenceSize)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for ReferenceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
