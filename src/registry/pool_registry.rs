//! The pool registry.

use std::collections::BTreeMap;

use tracing::info;

use crate::config::AmmConfig;
use crate::domain::{AssetId, AssetPair, PoolId};
use crate::error::AmmError;
use crate::events::AmmEvent;
use crate::pool::Pool;

/// Canonical pair → exactly one [`Pool`].
///
/// The registry is an explicit object, built from an [`AmmConfig`] and
/// owned by whoever drives the engine (normally a
/// [`Router`](crate::router::Router)). Pool ids are content addresses of
/// the canonical pair, so a lookup never needs a secondary index and two
/// registries given the same pairs agree on every id.
///
/// The registry also keeps the log of committed [`AmmEvent`]s.
///
/// # Example
///
/// ```rust
/// use pairdex::config::AmmConfig;
/// use pairdex::domain::AssetId;
/// use pairdex::registry::PoolRegistry;
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
///
/// let mut registry = PoolRegistry::new(AmmConfig::default());
/// let id = registry.resolve_or_create(b, a).expect("distinct assets");
/// assert_eq!(registry.lookup(a, b), Some(id));
/// assert_eq!(registry.resolve_or_create(a, b), Ok(id));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolRegistry {
    config: AmmConfig,
    pools: BTreeMap<PoolId, Pool>,
    order: Vec<PoolId>,
    events: Vec<AmmEvent>,
}

impl PoolRegistry {
    /// Creates an empty registry whose pools take `config`.
    #[must_use]
    pub fn new(config: AmmConfig) -> Self {
        Self {
            config,
            pools: BTreeMap::new(),
            order: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Returns the pool for the pair, creating it empty if absent.
    ///
    /// Argument order does not matter. Creation records
    /// [`AmmEvent::PairCreated`]; a repeated call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::IdenticalAssets`] if `asset_a == asset_b`.
    pub fn resolve_or_create(
        &mut self,
        asset_a: AssetId,
        asset_b: AssetId,
    ) -> Result<PoolId, AmmError> {
        let pair = AssetPair::new(asset_a, asset_b)?;
        let id = PoolId::derive(&pair);
        if !self.pools.contains_key(&id) {
            self.insert(Pool::new(pair, &self.config));
        }
        Ok(id)
    }

    /// The id of the pair's pool, if one exists. Never creates.
    ///
    /// Identical assets have no pool and yield `None`.
    #[must_use]
    pub fn lookup(&self, asset_a: AssetId, asset_b: AssetId) -> Option<PoolId> {
        let pair = AssetPair::new(asset_a, asset_b).ok()?;
        let id = PoolId::derive(&pair);
        self.pools.contains_key(&id).then_some(id)
    }

    /// The pool with `id`.
    #[must_use]
    pub fn pool(&self, id: &PoolId) -> Option<&Pool> {
        self.pools.get(id)
    }

    /// The pool for the pair, if one exists.
    #[must_use]
    pub fn pool_for(&self, asset_a: AssetId, asset_b: AssetId) -> Option<&Pool> {
        self.lookup(asset_a, asset_b)
            .and_then(|id| self.pools.get(&id))
    }

    /// Every pool id, in creation order.
    #[must_use]
    pub fn pool_ids(&self) -> &[PoolId] {
        &self.order
    }

    /// Every pool, in creation order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.order.iter().filter_map(|id| self.pools.get(id))
    }

    /// Number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// `true` if no pool has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// The configuration applied to new pools.
    #[must_use]
    pub const fn config(&self) -> &AmmConfig {
        &self.config
    }

    /// Committed events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[AmmEvent] {
        &self.events
    }

    /// Takes every committed event, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<AmmEvent> {
        core::mem::take(&mut self.events)
    }

    // -- commit access ----------------------------------------------------------

    /// Adds a newly created pool and records its creation. Does nothing if
    /// a pool with the same id already exists.
    pub(crate) fn insert(&mut self, pool: Pool) {
        let id = pool.id();
        if self.pools.contains_key(&id) {
            return;
        }
        let (asset0, asset1) = (pool.asset0(), pool.asset1());
        info!(
            pool = %id,
            %asset0,
            %asset1,
            fee = %pool.fee_tier(),
            "pair created"
        );
        self.pools.insert(id, pool);
        self.order.push(id);
        self.events.push(AmmEvent::PairCreated {
            asset0,
            asset1,
            pool: id,
        });
    }

    /// Replaces an existing pool with its updated copy.
    pub(crate) fn store(&mut self, pool: Pool) {
        if let Some(slot) = self.pools.get_mut(&pool.id()) {
            *slot = pool;
        }
    }

    /// Appends committed events.
    pub(crate) fn record(&mut self, events: impl IntoIterator<Item = AmmEvent>) {
        self.events.extend(events);
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new(AmmConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{FeeTier, Shares};

    const A: AssetId = AssetId::from_bytes([1u8; 32]);
    const B: AssetId = AssetId::from_bytes([2u8; 32]);
    const C: AssetId = AssetId::from_bytes([3u8; 32]);

    #[test]
    fn resolve_is_idempotent_and_order_free() {
        let mut registry = PoolRegistry::default();
        let (Ok(ab), Ok(ba)) = (registry.resolve_or_create(A, B), registry.resolve_or_create(B, A))
        else {
            panic!("expected Ok");
        };
        assert_eq!(ab, ba);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.events().len(), 1);
    }

    #[test]
    fn resolve_rejects_identical_assets() {
        let mut registry = PoolRegistry::default();
        assert_eq!(registry.resolve_or_create(A, A), Err(AmmError::IdenticalAssets));
        assert!(registry.is_empty());
        assert!(registry.events().is_empty());
    }

    #[test]
    fn lookup_never_creates() {
        let registry = PoolRegistry::default();
        assert_eq!(registry.lookup(A, B), None);
        assert_eq!(registry.lookup(A, A), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn created_pool_is_empty_and_canonical() {
        let mut registry = PoolRegistry::default();
        let Ok(id) = registry.resolve_or_create(B, A) else {
            panic!("expected Ok");
        };
        let Some(pool) = registry.pool(&id) else {
            panic!("pool exists");
        };
        assert_eq!(pool.asset0(), A);
        assert_eq!(pool.asset1(), B);
        assert!(pool.reserve0().is_zero());
        assert!(pool.total_shares().is_zero());
        let Ok(pair) = AssetPair::new(A, B) else {
            panic!("distinct");
        };
        assert_eq!(id, PoolId::derive(&pair));
    }

    #[test]
    fn pools_take_registry_config() {
        let Ok(config) = AmmConfig::new(FeeTier::TIER_0_05_PERCENT, Shares::new(7)) else {
            panic!("valid config");
        };
        let mut registry = PoolRegistry::new(config);
        let Ok(id) = registry.resolve_or_create(A, C) else {
            panic!("expected Ok");
        };
        let Some(pool) = registry.pool(&id) else {
            panic!("pool exists");
        };
        assert_eq!(pool.fee_tier(), FeeTier::TIER_0_05_PERCENT);
        assert_eq!(pool.minimum_liquidity(), Shares::new(7));
    }

    #[test]
    fn creation_order_and_events() {
        let mut registry = PoolRegistry::default();
        let (Ok(first), Ok(second)) = (registry.resolve_or_create(C, A), registry.resolve_or_create(A, B))
        else {
            panic!("expected Ok");
        };
        assert_eq!(registry.pool_ids(), &[first, second]);
        assert_eq!(registry.pools().count(), 2);
        let Some(AmmEvent::PairCreated { asset0, asset1, pool }) = registry.events().first().copied()
        else {
            panic!("expected PairCreated");
        };
        assert_eq!((asset0, asset1, pool), (A, C, first));

        let drained = registry.drain_events();
        assert_eq!(drained.len(), 2);
        assert!(registry.events().is_empty());
    }

    #[test]
    fn pool_for_matches_lookup() {
        let mut registry = PoolRegistry::default();
        let Ok(id) = registry.resolve_or_create(A, B) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.pool_for(B, A).map(Pool::id), Some(id));
        assert!(registry.pool_for(A, C).is_none());
    }
}
