//! Explicit rounding direction for integer division.

/// Direction in which an inexact integer quotient is rounded.
///
/// Every division in the engine names its direction. Outputs and share
/// payouts round [`Down`](Rounding::Down); fees and required inputs round
/// [`Up`](Rounding::Up), so rounding dust always stays in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Toward positive infinity (ceiling).
    Up,
    /// Toward zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` for [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_flags() {
        assert!(Rounding::Up.is_up());
        assert!(!Rounding::Down.is_up());
    }
}
