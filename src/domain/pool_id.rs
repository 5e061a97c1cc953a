//! Content-addressed pool identity.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountId, AssetPair};

/// Domain separator hashed in front of every pool id.
pub const POOL_ID_DOMAIN: &[u8] = b"PAIRDEX_POOL_V1";

/// Deterministic identity of the pool for one canonical [`AssetPair`].
///
/// `PoolId = blake3(POOL_ID_DOMAIN || asset0 || asset1)`. Anyone holding
/// the two asset identities can compute a pool's id, and its custody
/// account, without asking the registry.
///
/// # Examples
///
/// ```
/// use pairdex::domain::{AssetId, AssetPair, PoolId};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
/// let ab = PoolId::derive(&AssetPair::new(a, b).expect("distinct"));
/// let ba = PoolId::derive(&AssetPair::new(b, a).expect("distinct"));
/// assert_eq!(ab, ba);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId([u8; 32]);

impl PoolId {
    /// Derives the id of the pool for `pair`.
    #[must_use]
    pub fn derive(pair: &AssetPair) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(POOL_ID_DOMAIN);
        hasher.update(pair.asset0().as_bytes());
        hasher.update(pair.asset1().as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Wraps raw id bytes, e.g. ones read back from an event log.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The ledger account holding this pool's reserves.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        AccountId::from_bytes(self.0)
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::AssetId;

    fn pair(a: u8, b: u8) -> AssetPair {
        let Ok(p) = AssetPair::new(AssetId::from_bytes([a; 32]), AssetId::from_bytes([b; 32]))
        else {
            panic!("distinct assets");
        };
        p
    }

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(PoolId::derive(&pair(1, 2)), PoolId::derive(&pair(1, 2)));
    }

    #[test]
    fn distinct_pairs_get_distinct_ids() {
        assert_ne!(PoolId::derive(&pair(1, 2)), PoolId::derive(&pair(1, 3)));
    }

    #[test]
    fn matches_manual_hash() {
        let p = pair(1, 2);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(POOL_ID_DOMAIN);
        bytes.extend_from_slice(&[1u8; 32]);
        bytes.extend_from_slice(&[2u8; 32]);
        assert_eq!(PoolId::derive(&p).as_bytes(), blake3::hash(&bytes).as_bytes());
    }

    #[test]
    fn custody_account_shares_bytes() {
        let id = PoolId::derive(&pair(4, 5));
        assert_eq!(id.account().as_bytes(), id.as_bytes());
    }
}
