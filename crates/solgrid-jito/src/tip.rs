//! Tip calculation from a congestion signal.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Network congestion level reported by the tip feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Congestion {
    Low,
    #[default]
    Normal,
    High,
    Extreme,
}

impl FromStr for Congestion {
    type Err = std::convert::Infallible;

    /// Unknown levels default to Normal rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "low" => Self::Low,
            "high" => Self::High,
            "extreme" => Self::Extreme,
            _ => Self::Normal,
        })
    }
}

/// Tip in lamports for the given congestion level.
///
/// Multipliers: low 0.5x, normal 1.0x, high 2.0x, extreme 5.0x.
pub fn calculate_tip(congestion: Congestion, base_tip_lamports: u64) -> u64 {
    let tip = match congestion {
        Congestion::Low => base_tip_lamports / 2,
        Congestion::Normal => base_tip_lamports,
        Congestion::High => base_tip_lamports.saturating_mul(2),
        Congestion::Extreme => base_tip_lamports.saturating_mul(5),
    };
    debug!(?congestion, base_tip_lamports, tip, "tip calculated");
    tip
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: u64 = 5_000_000;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(calculate_tip(Congestion::Low, BASE), 2_500_000);
        assert_eq!(calculate_tip(Congestion::Normal, BASE), 5_000_000);
        assert_eq!(calculate_tip(Congestion::High, BASE), 10_000_000);
        assert_eq!(calculate_tip(Congestion::Extreme, BASE), 25_000_000);
    }

    #[test]
    fn test_unknown_level_defaults_to_normal() {
        let parsed: Congestion = "weird".parse().unwrap();
        assert_eq!(parsed, Congestion::Normal);
        assert_eq!(calculate_tip(parsed, BASE), BASE);
    }

    #[test]
    fn test_known_levels_parse() {
        assert_eq!("low".parse::<Congestion>().unwrap(), Congestion::Low);
        assert_eq!("high".parse::<Congestion>().unwrap(), Congestion::High);
        assert_eq!(
            "extreme".parse::<Congestion>().unwrap(),
            Congestion::Extreme
        );
    }
}
