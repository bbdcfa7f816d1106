//! Overlap policies deciding when a reservation blocks a slot.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conflict test applied between a slot `[s, e)` and a reservation `[rs, re)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Standard half-open overlap: `rs < e && re > s`.
    /// Adjacent ranges (one ends exactly when the other starts) do not conflict,
    /// and a reservation with `rs >= re` never conflicts.
    #[default]
    HalfOpen,
    /// The asymmetric test used by the booking dashboard:
    /// `(rs <= s && re > s) || (rs >= s && rs < e)`.
    /// Agrees with `HalfOpen` except on degenerate reservations.
    Legacy,
}

impl OverlapPolicy {
    /// Whether the reservation `[rs, re)` conflicts with the slot `[s, e)`.
    pub fn conflicts(self, s: NaiveTime, e: NaiveTime, rs: NaiveTime, re: NaiveTime) -> bool {
        match self {
            OverlapPolicy::HalfOpen => rs < re && rs < e && re > s,
            OverlapPolicy::Legacy => (rs <= s && re > s) || (rs >= s && rs < e),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OverlapPolicy::HalfOpen => "half-open",
            OverlapPolicy::Legacy => "legacy",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half-open" => Ok(OverlapPolicy::HalfOpen),
            "legacy" => Ok(OverlapPolicy::Legacy),
            other => Err(format!(
                "unknown overlap policy '{}' (expected 'half-open' or 'legacy')",
                other
            )),
        }
    }
}
