use std::time::Duration;

use async_trait::async_trait;

use crate::error::DomainError;

use super::Product;

/// External source of catalog data.
///
/// Loads are all-or-nothing: a failed load returns a retryable
/// [`DomainError::Network`] and must not produce a partial product list.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the full product list.
    async fn load(&self) -> Result<Vec<Product>, DomainError>;
}

/// Catalog source that simulates a flaky network.
///
/// Sleeps for the configured latency, then fails a configurable fraction
/// of loads. The defaults mirror a slow mobile connection with roughly
/// one failure in ten.
pub struct SimulatedCatalogSource {
    products: Vec<Product>,
    latency: Duration,
    failure_rate: f64,
}

impl SimulatedCatalogSource {
    /// Creates a source with the default latency and failure rate.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            latency: Duration::from_millis(500),
            failure_rate: 0.1,
        }
    }

    /// Creates a source that responds immediately and never fails.
    pub fn reliable(products: Vec<Product>) -> Self {
        Self::new(products).with_latency(Duration::ZERO).with_failure_rate(0.0)
    }

    /// Sets the simulated round-trip latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the fraction of loads that fail, in `[0, 1]`.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate;
        self
    }
}

#[async_trait]
impl CatalogSource for SimulatedCatalogSource {
    async fn load(&self) -> Result<Vec<Product>, DomainError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.failure_rate > 0.0 && rand::random::<f64>() < self.failure_rate {
            return Err(DomainError::Network("failed to load products".to_string()));
        }

        Ok(self.products.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductCategory;
    use common::Money;

    fn one_product() -> Vec<Product> {
        vec![Product::new(
            "SKU-001",
            "Widget",
            "A widget.",
            Money::from_cents(1000),
            ProductCategory::General,
        )]
    }

    #[tokio::test]
    async fn reliable_source_always_succeeds() {
        let source = SimulatedCatalogSource::reliable(one_product());
        for _ in 0..20 {
            assert_eq!(source.load().await.unwrap().len(), 1);
        }
    }

    #[tokio::test]
    async fn full_failure_rate_always_errors_retryably() {
        let source = SimulatedCatalogSource::reliable(one_product()).with_failure_rate(1.0);
        let err = source.load().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
