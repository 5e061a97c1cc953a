//! Canonically ordered pair of distinct assets.

use serde::{Deserialize, Serialize};

use super::AssetId;
use crate::error::AmmError;

/// A pair of distinct assets, sorted so that `asset0 < asset1`.
///
/// `(X, Y)` and `(Y, X)` build the same `AssetPair`, which is what lets the
/// registry map an unordered pair to exactly one pool.
///
/// # Examples
///
/// ```
/// use pairdex::domain::{AssetId, AssetPair};
///
/// let x = AssetId::from_bytes([1u8; 32]);
/// let y = AssetId::from_bytes([2u8; 32]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.asset0(), x);
/// assert_eq!(pair, AssetPair::new(x, y).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetPair {
    asset0: AssetId,
    asset1: AssetId,
}

impl AssetPair {
    /// Creates the canonical pair of `a` and `b`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if `a == b`.
    pub fn new(a: AssetId, b: AssetId) -> Result<Self, AmmError> {
        if a == b {
            return Err(AmmError::IdenticalAssets);
        }
        let (asset0, asset1) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { asset0, asset1 })
    }

    /// The lower asset.
    #[must_use]
    pub const fn asset0(&self) -> AssetId {
        self.asset0
    }

    /// The higher asset.
    #[must_use]
    pub const fn asset1(&self) -> AssetId {
        self.asset1
    }

    /// Returns the counter-asset of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn other(&self, asset: &AssetId) -> Result<AssetId, AmmError> {
        if *asset == self.asset0 {
            Ok(self.asset1)
        } else if *asset == self.asset1 {
            Ok(self.asset0)
        } else {
            Err(AmmError::InvalidAsset)
        }
    }

    /// Returns `true` if `asset` is `asset0`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAsset`] if `asset` is not in the pair.
    pub fn is_asset0(&self, asset: &AssetId) -> Result<bool, AmmError> {
        if *asset == self.asset0 {
            Ok(true)
        } else if *asset == self.asset1 {
            Ok(false)
        } else {
            Err(AmmError::InvalidAsset)
        }
    }
}
