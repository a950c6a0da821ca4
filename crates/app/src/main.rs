//! Demo session entry point.
//!
//! Wires a simulated catalog source and a file-backed store into a
//! [`Storefront`] and runs one browse-to-checkout session, logging each
//! step. This stands in for the UI layer a real deployment would bind.

mod config;

use std::time::Duration;

use domain::{
    Money, PaymentMethod, Product, ProductCategory, SimulatedCatalogSource, Storefront,
};
use storage::FileKeyValueStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::Config;

fn demo_catalog() -> Vec<Product> {
    vec![
        Product::new(
            "SKU-0001",
            "Running Shoe",
            "Lightweight running shoe with breathable mesh upper and responsive cushioning.",
            Money::from_cents(12999),
            ProductCategory::Shoes,
        )
        .with_image("figure.walk")
        .with_rating(4.5, 128),
        Product::new(
            "SKU-0002",
            "Trail Shoe",
            "Durable trail running shoe with aggressive tread pattern and waterproof protection.",
            Money::from_cents(14999),
            ProductCategory::Shoes,
        )
        .with_image("hare")
        .with_rating(4.8, 89),
        Product::new(
            "SKU-0003",
            "Cloud Jacket",
            "Lightweight running jacket with weather protection and breathable fabric.",
            Money::from_cents(9999),
            ProductCategory::Clothing,
        )
        .with_image("cloud.rain")
        .with_rating(4.2, 67),
        Product::new(
            "SKU-0004",
            "Performance Shorts",
            "Moisture-wicking shorts with built-in compression for optimal performance.",
            Money::from_cents(4999),
            ProductCategory::Clothing,
        )
        .with_image("figure.run")
        .with_stock(false)
        .with_rating(4.0, 45),
        Product::new(
            "SKU-0005",
            "Hydration Pack",
            "Lightweight hydration pack with 2L capacity and multiple storage compartments.",
            Money::from_cents(7999),
            ProductCategory::Accessories,
        )
        .with_image("drop.fill")
        .with_rating(4.7, 156),
    ]
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let source = SimulatedCatalogSource::new(demo_catalog())
        .with_latency(config.catalog_latency)
        .with_failure_rate(config.catalog_failure_rate);
    let store = FileKeyValueStore::new(config.data_dir.clone());
    let session = Storefront::new(source, store);

    if let Err(e) = session.restore_profile().await {
        tracing::warn!(error = %e, "could not restore profile");
    }

    // The simulated source fails some loads; retry the way a UI's
    // "try again" button would.
    let mut attempts = 0;
    loop {
        attempts += 1;
        match session.load_catalog().await {
            Ok(count) => {
                tracing::info!(count, attempts, "catalog ready");
                break;
            }
            Err(e) if e.is_retryable() && attempts < 5 => {
                tracing::warn!(error = %e, attempts, "retrying catalog load");
            }
            Err(e) => {
                tracing::error!(error = %e, suggestion = e.recovery_suggestion(), "giving up");
                return;
            }
        }
    }

    for product in session.search("running").await {
        tracing::info!(id = %product.id, name = %product.name, price = %product.price, "search hit");
    }

    session
        .add_payment_method(PaymentMethod::new(
            "4111111111111234",
            "Jane Doe",
            "12/27",
            true,
        ))
        .await;

    if session.profile().await.address.is_empty() {
        if let Err(e) = session
            .update_profile(
                "Jane Doe",
                "jane.doe@example.com",
                "+1 555 123 4567",
                "123 Main St, San Francisco, CA 94102",
            )
            .await
        {
            tracing::error!(error = %e, "profile update failed");
            return;
        }
    }

    let shoe = "SKU-0001".into();
    let pack = "SKU-0005".into();
    for id in [&shoe, &pack, &shoe] {
        if let Err(e) = session.add_to_cart(id).await {
            tracing::error!(error = %e, "could not add to cart");
        }
    }
    session.add_to_wishlist(&"SKU-0003".into()).await.ok();

    let cart = session.cart().await;
    tracing::info!(
        items = cart.item_count(),
        unique = cart.unique_item_count(),
        total = %cart.total(),
        "cart ready for checkout"
    );

    let method = match session.default_payment_method().await {
        Some(method) => method,
        None => {
            tracing::error!("no payment method on file");
            return;
        }
    };

    match session
        .place_order_after(&method, Duration::from_secs(2))
        .await
    {
        Ok(order) => {
            tracing::info!(
                order_number = %order.order_number,
                total = %order.total_amount,
                status = %order.status,
                "order confirmed"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, suggestion = e.recovery_suggestion(), "checkout failed");
        }
    }

    tracing::info!(
        orders = session.order_count().await,
        awaiting_review = session.reviewable_items().await.len(),
        "session complete"
    );
}
