//! Per-visitor shopper state.
//!
//! Each visitor's cart, overlay flags and contact acknowledgment live in a
//! bounded in-process cache keyed by the visitor id from their session. The
//! state sits behind its own async mutex, so concurrent requests from one
//! browser (double clicks, several tabs) apply their changes one at a time
//! and none is lost.
//!
//! Entries idle for longer than the configured window are evicted, as are the
//! least-used ones once the cache is full.

use std::sync::Arc;
use std::time::Duration;

use float_core::{Cart, ViewFlags};
use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

float_core::define_id!(VisitorId, Uuid);

impl VisitorId {
    /// A fresh random visitor id.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(Uuid::new_v4())
    }
}

/// Everything the page remembers about one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shopper {
    pub cart: Cart,
    pub view: ViewFlags,
    /// Set by the contact form, cleared by the next page render.
    pub contact_ack: bool,
}

/// Bounded store of shopper state.
#[derive(Clone)]
pub struct ShopperStore {
    cache: Cache<VisitorId, Arc<Mutex<Shopper>>>,
}

impl ShopperStore {
    /// Create a store holding at most `max_capacity` shoppers, each evicted
    /// after `idle` without a request.
    #[must_use]
    pub fn new(max_capacity: u64, idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(idle)
            .build();
        Self { cache }
    }

    /// Run `f` against the visitor's state while holding their lock.
    ///
    /// A visitor seen for the first time starts with an empty cart and closed
    /// overlays.
    pub async fn update<T>(&self, visitor: VisitorId, f: impl FnOnce(&mut Shopper) -> T) -> T {
        let shopper = self
            .cache
            .get_with(visitor, async { Arc::new(Mutex::new(Shopper::default())) })
            .await;
        let mut guard = shopper.lock().await;
        f(&mut guard)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use float_core::{Catalog, ProductId};

    use super::*;

    fn store() -> ShopperStore {
        ShopperStore::new(100, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_new_visitor_starts_empty() {
        let store = store();
        let shopper = store.update(VisitorId::generate(), |s| s.clone()).await;
        assert_eq!(shopper, Shopper::default());
    }

    #[tokio::test]
    async fn test_visitors_are_isolated() {
        let store = store();
        let catalog = Catalog::default();
        let alice = VisitorId::generate();
        let bob = VisitorId::generate();

        let product = catalog.get(ProductId::new(1)).unwrap().clone();
        store.update(alice, |s| s.cart.add(product)).await;

        assert_eq!(store.update(alice, |s| s.cart.len()).await, 1);
        assert!(store.update(bob, |s| s.cart.is_empty()).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_are_all_kept() {
        let store = store();
        let visitor = VisitorId::generate();
        let product = Catalog::default().get(ProductId::new(2)).unwrap().clone();

        let tasks: Vec<_> = (0..64)
            .map(|_| {
                let store = store.clone();
                let product = product.clone();
                tokio::spawn(async move { store.update(visitor, |s| s.cart.add(product)).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            assert!(ids.insert(task.await.unwrap()));
        }

        assert_eq!(store.update(visitor, |s| s.cart.len()).await, 64);
    }

    #[tokio::test]
    async fn test_capacity_is_bounded() {
        let store = ShopperStore::new(10, Duration::from_secs(60));
        for _ in 0..200 {
            store.update(VisitorId::generate(), |_| ()).await;
        }
        store.cache.run_pending_tasks().await;
        assert!(store.cache.entry_count() <= 10);
    }

    #[tokio::test]
    async fn test_idle_shopper_is_evicted() {
        let store = ShopperStore::new(100, Duration::from_millis(50));
        let visitor = VisitorId::generate();
        store.update(visitor, |s| s.view.open_cart()).await;
        assert!(store.cache.contains_key(&visitor));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!store.cache.contains_key(&visitor));
        assert!(!store.update(visitor, |s| s.view.cart_open).await);
    }
}
