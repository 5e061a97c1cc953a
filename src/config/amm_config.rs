//! Engine-wide pool parameters.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{FeeTier, Shares};
use crate::error::AmmError;

/// Default number of shares locked by a pool's first deposit.
pub const DEFAULT_MINIMUM_LIQUIDITY: Shares = Shares::new(1_000);

/// Parameters the [`PoolRegistry`](crate::registry::PoolRegistry) stamps
/// onto every pool it creates.
///
/// | Field | TOML key | Default |
/// |-------|----------|---------|
/// | swap fee | `fee_bps` | 30 |
/// | locked first-deposit shares | `minimum_liquidity` | 1 000 |
///
/// # Validation
///
/// - The fee must be strictly below 100%.
///
/// # Examples
///
/// ```
/// use pairdex::config::AmmConfig;
///
/// let cfg = AmmConfig::from_toml_str("fee_bps = 25\nminimum_liquidity = 16\n")
///     .expect("valid config");
/// assert_eq!(cfg.fee_tier().basis_points().get(), 25);
/// assert_eq!(cfg.minimum_liquidity().get(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAmmConfig")]
pub struct AmmConfig {
    #[serde(rename = "fee_bps")]
    fee_tier: FeeTier,
    minimum_liquidity: Shares,
}

/// Unvalidated wire shape of [`AmmConfig`].
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawAmmConfig {
    fee_bps: FeeTier,
    minimum_liquidity: Shares,
}

impl Default for RawAmmConfig {
    fn default() -> Self {
        let config = AmmConfig::default();
        Self {
            fee_bps: config.fee_tier,
            minimum_liquidity: config.minimum_liquidity,
        }
    }
}

impl TryFrom<RawAmmConfig> for AmmConfig {
    type Error = AmmError;

    fn try_from(raw: RawAmmConfig) -> Result<Self, Self::Error> {
        Self::new(raw.fee_bps, raw.minimum_liquidity)
    }
}

impl AmmConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fee is 100% or more.
    pub fn new(fee_tier: FeeTier, minimum_liquidity: Shares) -> Result<Self, AmmError> {
        let config = Self {
            fee_tier,
            minimum_liquidity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    /// Deserializing from any other serde format validates the same way.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Config`] if the document is not valid TOML for this
    ///   shape.
    /// - [`AmmError::InvalidConfiguration`] if a value is out of range.
    pub fn from_toml_str(document: &str) -> Result<Self, AmmError> {
        let raw: RawAmmConfig =
            toml::from_str(document).map_err(|e| AmmError::Config(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Checks every configuration invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the fee is 100% or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        if !self.fee_tier.is_usable() {
            return Err(AmmError::InvalidConfiguration(
                "fee must be below 10000 basis points",
            ));
        }
        Ok(())
    }

    /// The swap fee applied to input amounts.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Shares permanently locked by each pool's first deposit.
    #[must_use]
    pub const fn minimum_liquidity(&self) -> Shares {
        self.minimum_liquidity
    }
}

impl Default for AmmConfig {
    fn default() -> Self {
        Self {
            fee_tier: FeeTier::TIER_0_30_PERCENT,
            minimum_liquidity: DEFAULT_MINIMUM_LIQUIDITY,
        }
    }
}

impl fmt::Display for AmmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AmmConfig(fee={}, minimum_liquidity={})",
            self.fee_tier, self.minimum_liquidity
        )
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BasisPoints;

    #[test]
    fn default_values() {
        let cfg = AmmConfig::default();
        assert_eq!(cfg.fee_tier(), FeeTier::TIER_0_30_PERCENT);
        assert_eq!(cfg.minimum_liquidity(), Shares::new(1_000));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_full_fee() {
        let result = AmmConfig::new(FeeTier::new(BasisPoints::MAX_PERCENT), Shares::ZERO);
        assert!(matches!(result, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn zero_lock_is_allowed() {
        let Ok(cfg) = AmmConfig::new(FeeTier::ZERO, Shares::ZERO) else {
            panic!("expected Ok");
        };
        assert!(cfg.minimum_liquidity().is_zero());
    }

    #[test]
    fn toml_partial_document_uses_defaults() {
        let Ok(cfg) = AmmConfig::from_toml_str("minimum_liquidity = 10") else {
            panic!("expected Ok");
        };
        assert_eq!(cfg.fee_tier(), FeeTier::TIER_0_30_PERCENT);
        assert_eq!(cfg.minimum_liquidity(), Shares::new(10));
    }

    #[test]
    fn toml_empty_document_is_default() {
        let Ok(cfg) = AmmConfig::from_toml_str("") else {
            panic!("expected Ok");
        };
        assert_eq!(cfg, AmmConfig::default());
    }

    #[test]
    fn toml_rejects_unknown_key() {
        let result = AmmConfig::from_toml_str("fee = 30");
        assert!(matches!(result, Err(AmmError::Config(_))));
    }

    #[test]
    fn toml_rejects_out_of_range_fee() {
        let result = AmmConfig::from_toml_str("fee_bps = 10000");
        assert!(matches!(result, Err(AmmError::InvalidConfiguration(_))));
    }

    #[test]
    fn json_deserialization_is_validated() {
        let result = serde_json::from_str::<AmmConfig>(r#"{"fee_bps": 10000}"#);
        let Err(err) = result else {
            panic!("full fee accepted");
        };
        assert!(err.to_string().contains("fee must be below 10000 basis points"));
    }

    #[test]
    fn json_round_trip_keeps_values() {
        let Ok(cfg) = AmmConfig::new(FeeTier::new(BasisPoints::new(25)), Shares::new(16)) else {
            panic!("valid config");
        };
        let Ok(json) = serde_json::to_string(&cfg) else {
            panic!("serializable");
        };
        assert_eq!(json, r#"{"fee_bps":25,"minimum_liquidity":16}"#);
        let Ok(back) = serde_json::from_str::<AmmConfig>(&json) else {
            panic!("deserializable");
        };
        assert_eq!(back, cfg);
    }

    #[test]
    fn display() {
        assert_eq!(
            AmmConfig::default().to_string(),
            "AmmConfig(fee=FeeTier(30bp), minimum_liquidity=1000)"
        );
    }
}
