//! Collaborator abstractions.
//!
//! The engine depends on two outside services, each behind a trait:
//! [`TokenLedger`] for balances and transfers and [`Clock`] for the time
//! used by deadline checks. [`SystemClock`] and [`ManualClock`] are the
//! provided clocks; [`InMemoryLedger`](crate::ledger::InMemoryLedger) is
//! the provided ledger.

mod clock;
mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ledger::TokenLedger;
