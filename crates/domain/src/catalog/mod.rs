//! Product catalog: the in-memory store plus the external source it
//! is loaded from.

mod product;
mod source;

use common::ProductId;

pub use product::{Product, ProductCategory};
pub use source::{CatalogSource, SimulatedCatalogSource};

/// In-memory catalog of available products.
///
/// Replaced wholesale on every successful load; a failed load leaves
/// the previous contents untouched.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog holding the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replaces the catalog contents.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Case-insensitive substring search over name and description.
    ///
    /// An empty query returns the full catalog unfiltered.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        if query.is_empty() {
            return self.products.iter().collect();
        }
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Returns all products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Returns the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Returns true if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
