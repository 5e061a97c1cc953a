//! Logical time used for deadlines.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Seconds since an arbitrary epoch chosen by the [`Clock`](crate::traits::Clock).
///
/// Deadlines are inclusive: a call is expired only when `now > deadline`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Far-future deadline; a call carrying it never expires.
    pub const MAX: Self = Self(u64::MAX);

    /// Wraps raw seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns raw seconds.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `self + seconds`, saturating at [`Timestamp::MAX`].
    #[must_use]
    pub const fn saturating_add(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Returns `true` if `now` is past this deadline.
    #[must_use]
    pub const fn has_passed(&self, now: Self) -> bool {
        now.0 > self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
