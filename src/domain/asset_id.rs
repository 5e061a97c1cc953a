//! Asset identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of a fungible asset, typically its ledger address.
///
/// Wraps 32 bytes and is totally ordered by lexicographic byte order;
/// that order decides which asset of a pair is `asset0`.
///
/// # Examples
///
/// ```
/// use pairdex::domain::AssetId;
///
/// let usdt = AssetId::from_bytes([4u8; 32]);
/// let swx = AssetId::from_bytes([1u8; 32]);
/// assert!(swx < usdt);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId([u8; 32]);

impl AssetId {
    /// Creates an `AssetId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
