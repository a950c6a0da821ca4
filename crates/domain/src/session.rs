//! The storefront session aggregate.
//!
//! [`Storefront`] owns all domain state behind one coarse lock and is the
//! only mutation path, so user-triggered commands run one at a time and
//! checkout can never interleave with another cart mutation.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use common::{Money, ProductId};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::cart::Cart;
use crate::catalog::{Catalog, CatalogSource, Product};
use crate::error::{CheckoutError, DomainError};
use crate::order::{Order, OrderBook, OrderItem, OrderStatus};
use crate::payment::{PaymentMethod, PaymentMethods};
use crate::profile::UserProfile;
use crate::review::{ProductReview, ReviewLedger};
use crate::validate;
use crate::wishlist::{Wishlist, WishlistItem};

use storage::KeyValueStore;

/// Key the profile is persisted under.
const PROFILE_KEY: &str = "user_profile";

/// All mutable domain state, guarded as one unit.
#[derive(Debug, Default)]
struct StoreState {
    catalog: Catalog,
    cart: Cart,
    payments: PaymentMethods,
    wishlist: Wishlist,
    reviews: ReviewLedger,
    orders: OrderBook,
    profile: UserProfile,
}

/// The storefront session.
///
/// Constructed once at application start from a catalog source and a
/// key-value store, then passed by handle to whichever component needs
/// it. Cloning shares the underlying state.
pub struct Storefront<C, S> {
    source: Arc<C>,
    store: Arc<S>,
    state: Arc<RwLock<StoreState>>,
    /// Held for the duration of a checkout; a second checkout while this
    /// is taken is rejected, never run concurrently.
    checkout_gate: Arc<Mutex<()>>,
}

impl<C, S> Clone for Storefront<C, S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            store: Arc::clone(&self.store),
            state: Arc::clone(&self.state),
            checkout_gate: Arc::clone(&self.checkout_gate),
        }
    }
}

impl<C, S> Storefront<C, S>
where
    C: CatalogSource,
    S: KeyValueStore,
{
    /// Creates a session with an empty catalog and a default profile.
    pub fn new(source: C, store: S) -> Self {
        Self {
            source: Arc::new(source),
            store: Arc::new(store),
            state: Arc::new(RwLock::new(StoreState::default())),
            checkout_gate: Arc::new(Mutex::new(())),
        }
    }

    // Catalog

    /// Loads the catalog from the source, replacing the current contents
    /// on success.
    ///
    /// A failed load is retryable by calling this again; it leaves the
    /// previous catalog untouched.
    #[tracing::instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<usize, DomainError> {
        let products = match self.source.load().await {
            Ok(products) => products,
            Err(e) => {
                metrics::counter!("catalog_load_failures_total").increment(1);
                tracing::warn!(error = %e, "catalog load failed");
                return Err(e);
            }
        };

        let count = products.len();
        self.state.write().await.catalog.replace(products);
        metrics::counter!("catalog_loads_total").increment(1);
        tracing::info!(count, "catalog loaded");
        Ok(count)
    }

    /// Looks up a product by id.
    pub async fn product(&self, id: &ProductId) -> Option<Product> {
        self.state.read().await.catalog.get(id).cloned()
    }

    /// Case-insensitive substring search over name and description.
    pub async fn search(&self, query: &str) -> Vec<Product> {
        self.state
            .read()
            .await
            .catalog
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the number of products in the catalog.
    pub async fn product_count(&self) -> usize {
        self.state.read().await.catalog.len()
    }

    // Cart

    /// Adds one unit of a catalog product to the cart.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_cart(&self, id: &ProductId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let product = state
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::UnknownProduct(id.clone()))?;
        state.cart.add(product);
        Ok(())
    }

    /// Removes one unit of a product from the cart.
    pub async fn remove_from_cart(&self, id: &ProductId) {
        self.state.write().await.cart.remove(id);
    }

    /// Removes the whole cart line for a product.
    pub async fn remove_all_from_cart(&self, id: &ProductId) {
        self.state.write().await.cart.remove_all(id);
    }

    /// Sets the quantity for a product; 0 removes the line.
    #[tracing::instrument(skip(self))]
    pub async fn set_cart_quantity(&self, id: &ProductId, quantity: u32) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if quantity == 0 {
            state.cart.remove_all(id);
            return Ok(());
        }

        // Prefer the catalog copy, but a line already in the cart can be
        // requantified even if the product has since left the catalog.
        let product = state
            .catalog
            .get(id)
            .cloned()
            .or_else(|| {
                state
                    .cart
                    .lines()
                    .find(|l| &l.product.id == id)
                    .map(|l| l.product.clone())
            })
            .ok_or_else(|| DomainError::UnknownProduct(id.clone()))?;
        state.cart.set_quantity(product, quantity);
        Ok(())
    }

    /// Empties the cart.
    pub async fn clear_cart(&self) {
        self.state.write().await.cart.clear();
    }

    /// Returns a snapshot of the cart for display.
    pub async fn cart(&self) -> Cart {
        self.state.read().await.cart.clone()
    }

    /// Returns the cart total.
    pub async fn cart_total(&self) -> Money {
        self.state.read().await.cart.total()
    }

    // Checkout

    /// Places an order from the current cart.
    ///
    /// Snapshot, record, and cart-clear happen as one atomic unit: after
    /// a successful call the order book has grown by exactly one and the
    /// cart is empty; after a failed call both are unchanged.
    pub async fn place_order(&self, method: &PaymentMethod) -> Result<Order, DomainError> {
        self.place_order_after(method, Duration::ZERO).await
    }

    /// Places an order after a caller-side processing delay.
    ///
    /// The delay models the simulated payment latency; the state
    /// transition itself runs without interruption once started. While
    /// one checkout is in flight a second one fails with
    /// [`CheckoutError::AlreadyInProgress`].
    #[tracing::instrument(skip(self, method))]
    pub async fn place_order_after(
        &self,
        method: &PaymentMethod,
        delay: Duration,
    ) -> Result<Order, DomainError> {
        let _gate = self
            .checkout_gate
            .try_lock()
            .map_err(|_| CheckoutError::AlreadyInProgress)?;

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().await;
        if state.cart.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }

        let items: Vec<OrderItem> = state.cart.lines().map(OrderItem::from_line).collect();
        let order = Order {
            id: Uuid::new_v4(),
            order_number: state.orders.next_order_number(),
            placed_at: Utc::now(),
            status: OrderStatus::Pending,
            total_amount: state.cart.total(),
            items,
            shipping_address: state.profile.address.clone(),
            payment_method: method.masked_card_number(),
        };

        state.orders.record(order.clone());
        state.cart.clear();

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(
            order_number = %order.order_number,
            total = %order.total_amount,
            "order placed"
        );
        Ok(order)
    }

    // Orders

    /// Returns all placed orders, oldest first.
    pub async fn orders(&self) -> Vec<Order> {
        self.state.read().await.orders.orders().to_vec()
    }

    /// Returns orders in the given status.
    pub async fn orders_by_status(&self, status: OrderStatus) -> Vec<Order> {
        self.state
            .read()
            .await
            .orders
            .by_status(status)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the number of placed orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }

    /// Advances an order's status one step.
    #[tracing::instrument(skip(self))]
    pub async fn advance_order(&self, order_number: &str) -> Result<Order, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.orders.advance(order_number)?.clone())
    }

    /// Cancels an order.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(&self, order_number: &str) -> Result<Order, DomainError> {
        let mut state = self.state.write().await;
        Ok(state.orders.cancel(order_number)?.clone())
    }

    // Payment methods

    /// Appends a payment method, keeping the default exclusive.
    pub async fn add_payment_method(&self, method: PaymentMethod) {
        self.state.write().await.payments.add(method);
    }

    /// Removes the payment method at `index`; out-of-range is a no-op.
    pub async fn remove_payment_method(&self, index: usize) {
        self.state.write().await.payments.remove(index);
    }

    /// Makes the method at `index` the sole default; out-of-range is a
    /// no-op.
    pub async fn set_default_payment_method(&self, index: usize) {
        self.state.write().await.payments.set_default(index);
    }

    /// Returns a snapshot of the stored payment methods.
    pub async fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.state.read().await.payments.iter().cloned().collect()
    }

    /// Returns the default payment method, if one is set.
    pub async fn default_payment_method(&self) -> Option<PaymentMethod> {
        self.state.read().await.payments.default_method().cloned()
    }

    // Wishlist

    /// Saves a catalog product to the wishlist.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_wishlist(&self, id: &ProductId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let product = state
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::UnknownProduct(id.clone()))?;
        state.wishlist.add(&product);
        Ok(())
    }

    /// Removes a product from the wishlist.
    pub async fn remove_from_wishlist(&self, id: &ProductId) {
        self.state.write().await.wishlist.remove(id);
    }

    /// Returns true if the product is saved.
    pub async fn in_wishlist(&self, id: &ProductId) -> bool {
        self.state.read().await.wishlist.contains(id)
    }

    /// Returns a snapshot of the wishlist.
    pub async fn wishlist(&self) -> Vec<WishlistItem> {
        self.state.read().await.wishlist.iter().cloned().collect()
    }

    // Reviews

    /// Records a review, replacing any earlier review for the product.
    #[tracing::instrument(skip(self, review), fields(product_id = %review.product_id))]
    pub async fn add_review(&self, review: ProductReview) -> Result<(), DomainError> {
        validate::rating(review.rating)?;
        self.state.write().await.reviews.upsert(review);
        Ok(())
    }

    /// Returns the review for a product, if any.
    pub async fn review_for(&self, id: &ProductId) -> Option<ProductReview> {
        self.state.read().await.reviews.get(id).cloned()
    }

    /// Returns true if the product has been reviewed.
    pub async fn has_reviewed(&self, id: &ProductId) -> bool {
        self.state.read().await.reviews.has_reviewed(id)
    }

    /// Returns every ordered item not yet reviewed, duplicates included.
    pub async fn reviewable_items(&self) -> Vec<OrderItem> {
        let state = self.state.read().await;
        state
            .reviews
            .reviewable_items(state.orders.orders())
            .into_iter()
            .cloned()
            .collect()
    }

    // Profile

    /// Loads the persisted profile, keeping defaults when the key is
    /// absent or the stored bytes are unreadable.
    #[tracing::instrument(skip(self))]
    pub async fn restore_profile(&self) -> Result<(), DomainError> {
        if let Some(bytes) = self.store.get(PROFILE_KEY).await? {
            match serde_json::from_slice::<UserProfile>(&bytes) {
                Ok(profile) => self.state.write().await.profile = profile,
                Err(e) => {
                    tracing::warn!(error = %e, "stored profile unreadable, keeping defaults");
                }
            }
        }
        Ok(())
    }

    /// Validates, persists, then applies the edited contact fields.
    ///
    /// Persisting before applying keeps memory and storage in step: a
    /// storage failure leaves the in-memory profile unchanged.
    #[tracing::instrument(skip_all)]
    pub async fn update_profile(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<UserProfile, DomainError> {
        let mut updated = self.state.read().await.profile.clone();
        updated.update(name, email, phone, address)?;

        let bytes = serde_json::to_vec(&updated)?;
        self.store.set(PROFILE_KEY, bytes).await?;

        self.state.write().await.profile = updated.clone();
        tracing::info!("profile saved");
        Ok(updated)
    }

    /// Returns a snapshot of the profile.
    pub async fn profile(&self) -> UserProfile {
        self.state.read().await.profile.clone()
    }
}
