//! Domain value types used throughout the engine.
//!
//! Identities (assets, accounts, pools), quantities (amounts, shares,
//! basis points), time, and the records pool operations return. Every
//! quantity is a newtype over an unsigned integer with checked arithmetic.

mod account_id;
mod amount;
mod asset_id;
mod asset_pair;
mod basis_points;
mod fee_tier;
mod pool_id;
mod position;
mod rounding;
mod shares;
mod swap_result;
mod timestamp;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_id::AssetId;
pub use asset_pair::AssetPair;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use fee_tier::FeeTier;
pub use pool_id::{PoolId, POOL_ID_DOMAIN};
pub use position::LiquidityPosition;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_result::SwapResult;
pub use timestamp::Timestamp;
