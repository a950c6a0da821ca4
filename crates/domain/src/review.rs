//! Product reviews: at most one per product id.

use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::{Order, OrderItem};

/// A review left for a purchased product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReview {
    pub id: Uuid,
    pub product_id: ProductId,
    pub product_name: String,
    /// Star rating in `[1, 5]`.
    pub rating: u8,
    pub review_text: String,
    pub reviewed_at: DateTime<Utc>,
    /// The order the product was purchased in.
    pub order_number: String,
}

impl ProductReview {
    /// Creates a review dated now.
    pub fn new(
        product_id: impl Into<ProductId>,
        product_name: impl Into<String>,
        rating: u8,
        review_text: impl Into<String>,
        order_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: product_id.into(),
            product_name: product_name.into(),
            rating,
            review_text: review_text.into(),
            reviewed_at: Utc::now(),
            order_number: order_number.into(),
        }
    }
}

/// Ledger of reviews, one per product id.
///
/// Upserting replaces any prior review for the same product rather than
/// appending a second one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewLedger {
    reviews: Vec<ProductReview>,
}

impl ReviewLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a review, replacing any existing one for the product.
    pub fn upsert(&mut self, review: ProductReview) {
        self.reviews.retain(|r| r.product_id != review.product_id);
        self.reviews.push(review);
    }

    /// Returns the review for a product id, if any.
    pub fn get(&self, id: &ProductId) -> Option<&ProductReview> {
        self.reviews.iter().find(|r| &r.product_id == id)
    }

    /// Returns true if the product has been reviewed.
    pub fn has_reviewed(&self, id: &ProductId) -> bool {
        self.reviews.iter().any(|r| &r.product_id == id)
    }

    /// Returns every ordered item whose product has not been reviewed.
    ///
    /// A product ordered more than once and not yet reviewed appears once
    /// per order item; the duplication drives repeated review prompts.
    pub fn reviewable_items<'a>(&self, orders: &'a [Order]) -> Vec<&'a OrderItem> {
        orders
            .iter()
            .flat_map(|order| order.items.iter())
            .filter(|item| !self.has_reviewed(&item.product_id))
            .collect()
    }

    /// Returns the number of reviews.
    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    /// Returns true if no reviews exist.
    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    /// Iterates over the reviews.
    pub fn iter(&self) -> impl Iterator<Item = &ProductReview> {
        self.reviews.iter()
    }
}
