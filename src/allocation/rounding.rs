//! Rounding of currency amounts to cents

use serde::{Deserialize, Serialize};

/// Tie-breaking rule when rounding to 2 decimal places
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties round away from zero (0.125 -> 0.13)
    #[default]
    HalfUp,
    /// Ties round to the even cent (0.125 -> 0.12)
    HalfEven,
}

impl RoundingMode {
    /// Round an amount to whole cents
    ///
    /// Ties are only ties when the scaled value is exactly representable, so
    /// amounts like 2.675 (stored slightly below) round down in both modes.
    pub fn to_cents(self, amount: f64) -> f64 {
        let scaled = amount * 100.0;
        let rounded = match self {
            RoundingMode::HalfUp => scaled.round(),
            RoundingMode::HalfEven => scaled.round_ties_even(),
        };
        rounded / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_half_up() {
        assert_eq!(RoundingMode::default(), RoundingMode::HalfUp);
    }

    #[test]
    fn test_ties() {
        assert_eq!(RoundingMode::HalfUp.to_cents(0.125), 0.13);
        assert_eq!(RoundingMode::HalfEven.to_cents(0.125), 0.12);
        assert_eq!(RoundingMode::HalfUp.to_cents(-0.125), -0.13);
        assert_eq!(RoundingMode::HalfEven.to_cents(-0.125), -0.12);
    }

    #[test]
    fn test_non_ties_agree() {
        for amount in [0.0, 600.0, 123.456, 99.994, 1_000_000.011] {
            assert_eq!(
                RoundingMode::HalfUp.to_cents(amount),
                RoundingMode::HalfEven.to_cents(amount)
            );
        }
        assert_eq!(RoundingMode::HalfUp.to_cents(123.456), 123.46);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&RoundingMode::HalfEven).unwrap();
        assert_eq!(json, "\"half_even\"");
        let mode: RoundingMode = serde_json::from_str("\"half_up\"").unwrap();
        assert_eq!(mode, RoundingMode::HalfUp);
    }
}
