//! Support conditions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kinematic constraint a support imposes on the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// No restraint
    Free,
    /// Transverse displacement restrained
    Roller,
    /// Displacement restrained, rotation free
    Pinned,
    /// Displacement and rotation restrained
    Fixed,
}

impl SupportKind {
    /// Does this support block transverse displacement?
    pub fn restrains_translation(&self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Does this support block rotation?
    pub fn restrains_rotation(&self) -> bool {
        matches!(self, Self::Fixed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Roller => "roller",
            Self::Pinned => "pinned",
            Self::Fixed => "fixed",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Roller => "Roller",
            Self::Pinned => "Pinned",
            Self::Fixed => "Fixed",
        }
    }
}

impl fmt::Display for SupportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised support kind name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown support kind '{0}', expected free, roller, pinned or fixed")]
pub struct UnknownSupportKind(pub String);

impl FromStr for SupportKind {
    type Err = UnknownSupportKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "roller" => Ok(Self::Roller),
            "pinned" => Ok(Self::Pinned),
            "fixed" => Ok(Self::Fixed),
            _ => Err(UnknownSupportKind(s.to_string())),
        }
    }
}

/// A support at a position along the span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Distance from the left end
    pub position: f64,
    /// Restraint type
    pub kind: SupportKind,
}

impl Support {
    pub fn new(position: f64, kind: SupportKind) -> Self {
        Self { position, kind }
    }

    pub fn free(position: f64) -> Self {
        Self::new(position, SupportKind::Free)
    }

    pub fn roller(position: f64) -> Self {
        Self::new(position, SupportKind::Roller)
    }

    pub fn pinned(position: f64) -> Self {
        Self::new(position, SupportKind::Pinned)
    }

    pub fn fixed(position: f64) -> Self {
        Self::new(position, SupportKind::Fixed)
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} m", self.kind.title(), self.position)
    }
}
