//! In-memory shopping cart.
//!
//! A cart is an ordered list of entries. Each entry wraps a copy of a catalog
//! product together with an instance id, so the same product can sit in the
//! cart several times and each copy can be removed on its own.
//!
//! Instance ids come from a counter owned by the cart. The counter only moves
//! forward, so an id is never reused within one cart even after removals.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{CurrencyCode, EntryId, Price};

/// One instance of a product placed in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: EntryId,
    pub product: Product,
}

/// Ordered cart entries plus the id allocator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
    next_entry_id: u64,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new entry for `product` and return its instance id.
    pub fn add(&mut self, product: Product) -> EntryId {
        let id = EntryId::new(self.next_entry_id);
        self.next_entry_id += 1;
        self.entries.push(CartEntry { id, product });
        id
    }

    /// Remove the entry with this instance id.
    ///
    /// Returns the removed entry, or `None` (leaving the cart untouched) if no
    /// entry has that id.
    pub fn remove(&mut self, id: EntryId) -> Option<CartEntry> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Sum of entry prices. Zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        let currency = self
            .entries
            .first()
            .map_or_else(CurrencyCode::default, |e| e.product.price.currency_code);
        let amount = self.entries.iter().map(|e| e.product.price.amount).sum();
        Price::new(amount, currency)
    }

    /// Entries in the order they were added.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::{Catalog, ThemeColor};
    use crate::types::ProductId;

    fn drink(id: i32, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Drink {id}"),
            tagline: "Test".to_string(),
            price: Price::from_cents(cents, CurrencyCode::USD),
            description: String::new(),
            color: ThemeColor::Green,
            image: String::new(),
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::zero(CurrencyCode::USD));
        assert_eq!(cart.total().to_string(), "$0.00");
    }

    #[test]
    fn test_add_then_remove_first() {
        let mut cart = Cart::new();
        let first = cart.add(drink(1, 850));
        cart.add(drink(2, 900));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().amount, Decimal::new(1750, 2));

        let removed = cart.remove(first).unwrap();
        assert_eq!(removed.product.id, ProductId::new(1));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total().to_string(), "$9.00");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(drink(1, 850));
        let before = cart.clone();

        assert!(cart.remove(EntryId::new(42)).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_same_product_twice_gets_distinct_ids() {
        let catalog = Catalog::default();
        let citrus = catalog.get(ProductId::new(1)).unwrap();
        let mut cart = Cart::new();

        let a = cart.add(citrus.clone());
        let b = cart.add(citrus.clone());
        assert_ne!(a, b);

        cart.remove(a);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.entries()[0].id, b);

        cart.remove(b);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut cart = Cart::new();
        let a = cart.add(drink(1, 850));
        cart.remove(a);
        let b = cart.add(drink(1, 850));
        assert_ne!(a, b);
    }

    #[test]
    fn test_cart_survives_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(drink(3, 850));
        let json = serde_json::to_string(&cart).unwrap();
        let mut restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);

        // The allocator state travels with the entries.
        let next = restored.add(drink(3, 850));
        assert_eq!(next, EntryId::new(1));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn cents_list() -> impl Strategy<Value = Vec<i64>> {
            prop::collection::vec(0_i64..10_000, 0..40)
        }

        proptest! {
            /// Property: length and total track every add.
            #[test]
            fn adds_accumulate_length_and_total(prices in cents_list()) {
                let mut cart = Cart::new();
                for (i, cents) in prices.iter().enumerate() {
                    cart.add(drink(i32::try_from(i).unwrap(), *cents));
                }

                let expected: i64 = prices.iter().sum();
                prop_assert_eq!(cart.len(), prices.len());
                prop_assert_eq!(cart.total().amount, Decimal::new(expected, 2));
            }

            /// Property: removing one entry leaves the others in order.
            #[test]
            fn remove_preserves_other_entries(
                prices in prop::collection::vec(0_i64..10_000, 1..40),
                pick in any::<prop::sample::Index>(),
            ) {
                let mut cart = Cart::new();
                let ids: Vec<EntryId> = prices.iter().map(|c| cart.add(drink(1, *c))).collect();
                let target = ids[pick.index(ids.len())];

                prop_assert!(cart.remove(target).is_some());
                prop_assert_eq!(cart.len(), ids.len() - 1);

                let remaining: Vec<EntryId> = cart.entries().iter().map(|e| e.id).collect();
                let expected: Vec<EntryId> = ids.into_iter().filter(|id| *id != target).collect();
                prop_assert_eq!(remaining, expected);
            }

            /// Property: every id handed out is distinct.
            #[test]
            fn ids_are_unique(count in 0_usize..60) {
                let mut cart = Cart::new();
                let mut ids: Vec<EntryId> = (0..count).map(|_| cart.add(drink(2, 900))).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), count);
            }
        }
    }
}
