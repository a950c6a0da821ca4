//! Domain layer for the storefront application.
//!
//! This crate provides the core domain state and its invariants:
//! - Catalog with id lookup and substring search
//! - Cart with quantity arithmetic and derived totals
//! - Payment method registry with an exclusive default
//! - Wishlist and review ledger keyed by product id
//! - Append-only order book fed by an atomic checkout
//! - User profile persisted through an opaque key-value store
//!
//! All state is owned by the [`Storefront`] session aggregate, which is
//! constructed once at application start and handed to whoever needs it.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;
pub mod payment;
pub mod profile;
pub mod review;
pub mod session;
pub mod validate;
pub mod wishlist;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogSource, Product, ProductCategory, SimulatedCatalogSource};
pub use common::{Money, ProductId};
pub use error::{CheckoutError, DomainError};
pub use order::{Order, OrderBook, OrderError, OrderItem, OrderStatus};
pub use payment::{PaymentMethod, PaymentMethods};
pub use profile::{MembershipType, UserProfile};
pub use review::{ProductReview, ReviewLedger};
pub use session::Storefront;
pub use validate::ValidationError;
pub use wishlist::{Wishlist, WishlistItem};
