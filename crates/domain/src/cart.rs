//! Shopping cart: one line per product, insertion order preserved.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;

/// One product-quantity pairing within a cart.
///
/// Never stored with a quantity of zero; removal deletes the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Returns the line total (price * quantity).
    pub fn line_total(&self) -> Money {
        self.product.price.multiply(self.quantity)
    }
}

/// The shopping cart.
///
/// Invariants: product ids are unique across lines, every quantity is at
/// least 1, and lines keep their insertion order for display. All
/// operations are total; there are no failure modes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of a product, appending a new line if needed.
    pub fn add(&mut self, product: Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product,
                quantity: 1,
            });
        }
    }

    /// Removes one unit of a product, dropping the line at quantity 1.
    ///
    /// A no-op when the product is not in the cart.
    pub fn remove(&mut self, id: &ProductId) {
        if let Some(pos) = self.lines.iter().position(|l| &l.product.id == id) {
            if self.lines[pos].quantity > 1 {
                self.lines[pos].quantity -= 1;
            } else {
                self.lines.remove(pos);
            }
        }
    }

    /// Removes the whole line for a product, whatever its quantity.
    pub fn remove_all(&mut self, id: &ProductId) {
        self.lines.retain(|l| &l.product.id != id);
    }

    /// Sets the quantity for a product.
    ///
    /// A quantity of 0 behaves as [`Cart::remove_all`]; a new line is
    /// created when the product is not yet in the cart.
    pub fn set_quantity(&mut self, product: Product, quantity: u32) {
        if quantity == 0 {
            self.remove_all(&product.id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = quantity;
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The total price of all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// The number of distinct products in the cart.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the product has a line in the cart.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.lines.iter().any(|l| &l.product.id == id)
    }

    /// Returns the quantity for a product, 0 when absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| &l.product.id == id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCategory;

    fn product(id: &str, cents: i64) -> Product {
        Product::new(
            id,
            format!("Product {id}"),
            "",
            Money::from_cents(cents),
            ProductCategory::General,
        )
    }

    #[test]
    fn add_increments_existing_line() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.add(product("A", 1000));

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.quantity_of(&"A".into()), 2);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product("B", 100));
        cart.add(product("A", 100));
        cart.add(product("B", 100));

        let ids: Vec<_> = cart.lines().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
    }

    #[test]
    fn remove_is_left_inverse_of_add_above_one() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.add(product("A", 1000));
        cart.remove(&"A".into());

        assert_eq!(cart.quantity_of(&"A".into()), 1);
    }

    #[test]
    fn remove_drops_line_at_quantity_one() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.remove(&"A".into());

        assert!(!cart.contains(&"A".into()));
        assert_eq!(cart.unique_item_count(), 0);
    }

    #[test]
    fn remove_missing_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.remove(&"B".into());

        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn remove_all_drops_whole_line() {
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(product("A", 1000));
        }
        cart.remove_all(&"A".into());

        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.set_quantity(product("A", 1000), 0);

        assert!(!cart.contains(&"A".into()));
    }

    #[test]
    fn set_quantity_creates_missing_line() {
        let mut cart = Cart::new();
        cart.set_quantity(product("A", 1000), 7);

        assert_eq!(cart.quantity_of(&"A".into()), 7);
        assert_eq!(cart.unique_item_count(), 1);
    }

    #[test]
    fn counts_track_net_adds_and_removes() {
        let mut cart = Cart::new();
        // A: +3 -1 = 2, B: +2 -2 = 0, C: +1 = 1
        for _ in 0..3 {
            cart.add(product("A", 100));
        }
        for _ in 0..2 {
            cart.add(product("B", 200));
        }
        cart.add(product("C", 300));
        cart.remove(&"A".into());
        cart.remove(&"B".into());
        cart.remove(&"B".into());

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.quantity_of(&"B".into()), 0);
    }

    #[test]
    fn worked_total_example() {
        // {A: qty 2 @ $10, B: qty 1 @ $25} -> $45.00, 3 items, 2 lines.
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.add(product("A", 1000));
        cart.add(product("B", 2500));

        assert_eq!(cart.total(), Money::from_cents(4500));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.add(product("B", 2000));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn out_of_stock_products_are_accepted() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000).with_stock(false));
        assert_eq!(cart.item_count(), 1);
    }
}
