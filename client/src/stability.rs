//! Volatility classification.
//!
//! Maps a hypothesis' continuous volatility signal to a discrete stability
//! verdict. The rule is evaluated in order, first match wins, and the
//! boundary values belong to the next bucket (strict `<`): a volatility of
//! exactly 0.05 is already `Unstable`, exactly 0.15 already `Chaotic`.

use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// Volatility below this is `Stable`.
pub const STABLE_BELOW: f64 = 0.05;
/// Volatility below this (and at least [`STABLE_BELOW`]) is `Unstable`.
/// Doubles as the global advisory threshold on mean volatility.
pub const UNSTABLE_BELOW: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    Unknown,
    Stable,
    Unstable,
    Chaotic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilitySeverity {
    Info,
    Warning,
    Critical,
}

impl Stability {
    /// Total and deterministic: every input maps to exactly one verdict.
    pub fn classify(volatility: Option<f64>) -> Self {
        match volatility {
            None => Stability::Unknown,
            Some(v) if v < STABLE_BELOW => Stability::Stable,
            Some(v) if v < UNSTABLE_BELOW => Stability::Unstable,
            Some(_) => Stability::Chaotic,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Stability::Unknown => "Unknown",
            Stability::Stable => "Stable",
            Stability::Unstable => "Unstable",
            Stability::Chaotic => "Chaotic",
        }
    }

    pub const fn severity(self) -> StabilitySeverity {
        match self {
            Stability::Unknown | Stability::Stable => StabilitySeverity::Info,
            Stability::Unstable => StabilitySeverity::Warning,
            Stability::Chaotic => StabilitySeverity::Critical,
        }
    }
}

impl fmt::Display for Stability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
