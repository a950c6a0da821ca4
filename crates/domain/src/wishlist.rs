//! Saved-for-later products, deduplicated by product id.

use chrono::{DateTime, Utc};
use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, ProductCategory};

/// A product saved to the wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Money,
    pub image_name: String,
    pub added_at: DateTime<Utc>,
    pub category: ProductCategory,
}

impl WishlistItem {
    /// Captures the display fields of a product at save time.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            price: product.price,
            image_name: product.image_name.clone(),
            added_at: Utc::now(),
            category: product.category,
        }
    }
}

/// The wishlist.
///
/// Invariant: one entry per product id, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Creates an empty wishlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a product; a no-op if it is already saved.
    pub fn add(&mut self, product: &Product) {
        if !self.contains(&product.id) {
            self.items.push(WishlistItem::from_product(product));
        }
    }

    /// Removes the entry for a product id; a no-op if absent.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|item| &item.product_id != id);
    }

    /// Returns true if the product id is saved.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product_id == id)
    }

    /// Returns the number of saved products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WishlistItem> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product::new(
            id,
            format!("Product {id}"),
            "",
            Money::from_cents(999),
            ProductCategory::Accessories,
        )
    }

    #[test]
    fn add_twice_keeps_one_entry() {
        let mut wishlist = Wishlist::new();
        let p = product("P1");
        wishlist.add(&p);
        wishlist.add(&p);

        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.contains(&"P1".into()));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut wishlist = Wishlist::new();
        wishlist.add(&product("P1"));
        wishlist.remove(&"P2".into());

        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn remove_deletes_entry() {
        let mut wishlist = Wishlist::new();
        wishlist.add(&product("P1"));
        wishlist.remove(&"P1".into());

        assert!(wishlist.is_empty());
    }

    #[test]
    fn item_captures_product_fields() {
        let mut wishlist = Wishlist::new();
        wishlist.add(&product("P1"));

        let item = wishlist.iter().next().unwrap();
        assert_eq!(item.product_name, "Product P1");
        assert_eq!(item.price, Money::from_cents(999));
        assert_eq!(item.category, ProductCategory::Accessories);
    }
}
