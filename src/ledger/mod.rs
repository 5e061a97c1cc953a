//! Provided [`TokenLedger`](crate::traits::TokenLedger) implementations.

mod memory;

pub use memory::InMemoryLedger;
