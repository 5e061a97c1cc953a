//! Ledger account identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an account on the token ledger: a trader, the router, or a
/// pool's custody account.
///
/// [`AccountId::ZERO`] is the lock account. It permanently owns the
/// minimum liquidity locked by a pool's first deposit and can never burn it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// The lock account, owner of permanently locked shares.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns `true` for the lock account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_lock_account() {
        assert!(AccountId::ZERO.is_zero());
        assert!(!AccountId::from_bytes([1u8; 32]).is_zero());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(
            AccountId::ZERO.to_string(),
            format!("0x{}", "00".repeat(32))
        );
    }
}
