//! The product lineup.
//!
//! The catalog is compiled into the program and never changes at runtime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{CurrencyCode, Price, ProductId};

/// Catalog lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),
}

/// Background tint used behind a product's bottle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeColor {
    Orange,
    Red,
    Green,
    Purple,
}

impl ThemeColor {
    /// Stylesheet class carrying the tint.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Orange => "theme-orange",
            Self::Red => "theme-red",
            Self::Green => "theme-green",
            Self::Purple => "theme-purple",
        }
    }
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub tagline: String,
    pub price: Price,
    pub description: String,
    pub color: ThemeColor,
    /// Absolute URL of the bottle image.
    pub image: String,
}

/// The fixed list of products offered on the page.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an explicit product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products, in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a product by id, failing if it is not in the lineup.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownProduct` if no product has this id.
    pub fn find(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.get(id).ok_or(CatalogError::UnknownProduct(id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            product(
                1,
                "Sunrise Citrus",
                "Morning Light",
                850,
                "Fresh pressed oranges meeting the first light of day. A vitamin C surge.",
                ThemeColor::Orange,
                "https://i.ibb.co/SwjKPVR1/Whisk-24ffb8267bebc39afb14d1ae50c9ff7bdr.png",
            ),
            product(
                2,
                "Lagoon Berry",
                "Deep Dive",
                900,
                "Wild berries harvested from the coast. Antioxidant rich and deeply refreshing.",
                ThemeColor::Red,
                "https://i.ibb.co/ycPKrRcr/Whisk-b5cd7a4177e2bee98ab4bb6818df9744dr.png",
            ),
            product(
                3,
                "Palm Green",
                "Canopy Shade",
                850,
                "Kiwi, cucumber, and lime. Cool, crisp, and hydrating like a shade under palms.",
                ThemeColor::Green,
                "https://i.ibb.co/NndFMCF1/Whisk-d30befd4216836c91ca418bc1145240aeg.png",
            ),
            product(
                4,
                "Dusk Grape",
                "Evening Tide",
                950,
                "Concord grapes with a hint of sparkling water. The perfect sunset companion.",
                ThemeColor::Purple,
                "https://i.ibb.co/QvgqYnNr/Whisk-40feb5b3862cf2598594c8a9e0feb15cdr.png",
            ),
        ])
    }
}

fn product(
    id: i32,
    name: &str,
    tagline: &str,
    cents: i64,
    description: &str,
    color: ThemeColor,
    image: &str,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        tagline: tagline.to_string(),
        price: Price::from_cents(cents, CurrencyCode::USD),
        description: description.to_string(),
        color,
        image: image.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_default_lineup() {
        let catalog = Catalog::default();
        let names: Vec<&str> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Sunrise Citrus", "Lagoon Berry", "Palm Green", "Dusk Grape"]
        );
    }

    #[test]
    fn test_product_ids_are_unique() {
        let catalog = Catalog::default();
        let ids: HashSet<ProductId> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), catalog.products().len());
    }

    #[test]
    fn test_prices() {
        let catalog = Catalog::default();
        let prices: Vec<String> = catalog
            .products()
            .iter()
            .map(|p| p.price.to_string())
            .collect();
        assert_eq!(prices, ["$8.50", "$9.00", "$8.50", "$9.50"]);
    }

    #[test]
    fn test_get_and_find() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().name, "Lagoon Berry");
        assert!(catalog.get(ProductId::new(99)).is_none());

        let err = catalog.find(ProductId::new(99)).unwrap_err();
        assert_eq!(err, CatalogError::UnknownProduct(ProductId::new(99)));
        assert_eq!(err.to_string(), "Unknown product: 99");
    }

    #[test]
    fn test_theme_css_class() {
        assert_eq!(ThemeColor::Orange.css_class(), "theme-orange");
        assert_eq!(ThemeColor::Purple.css_class(), "theme-purple");
    }
}
