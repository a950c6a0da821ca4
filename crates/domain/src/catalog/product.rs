use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A product in the store.
///
/// Products are immutable once loaded; identity is by [`ProductId`].
/// Cart lines and order items hold copies, so a catalog reload never
/// rewrites history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price; never negative.
    pub price: Money,
    /// Reference to the product image, resolved by the display layer.
    pub image_name: String,
    pub category: ProductCategory,
    pub in_stock: bool,
    /// Average review score in `[0, 5]`.
    pub rating: f64,
    pub review_count: u32,
}

impl Product {
    /// Creates an in-stock product with no reviews yet.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        category: ProductCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            image_name: String::new(),
            category,
            in_stock: true,
            rating: 0.0,
            review_count: 0,
        }
    }

    /// Sets the image reference.
    pub fn with_image(mut self, image_name: impl Into<String>) -> Self {
        self.image_name = image_name.into();
        self
    }

    /// Sets the stock flag.
    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Sets the review summary.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }
}

/// Categories for product organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductCategory {
    Shoes,
    Clothing,
    Accessories,
    #[default]
    General,
}

impl ProductCategory {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Shoes => "Shoes",
            ProductCategory::Clothing => "Clothing",
            ProductCategory::Accessories => "Accessories",
            ProductCategory::General => "General",
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
