//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::{instrument, warn};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct, round_price};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Validates and normalises input before any repository mutation.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input.normalized()).await
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Update the fields present in `input`; an empty update returns the product unchanged
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.update(id, input.normalized()).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(ProductError::NotFound(id))
        }
    }

    /// Total stock value, rounded to 2 decimal places.
    ///
    /// Never fails: if the aggregate query errors the products are summed one
    /// by one, and if listing fails too the balance is reported as 0. A sum
    /// that overflows is capped at `f64::MAX` so it still serializes as a number.
    #[instrument(skip(self))]
    pub async fn total_balance(&self) -> f64 {
        let total = match self.repository.total_balance().await {
            Ok(total) => total,
            Err(e) => {
                warn!(error = %e, "Balance query failed, summing products instead");
                match self.repository.list().await {
                    Ok(products) => products.iter().map(Product::value).sum(),
                    Err(e) => {
                        warn!(error = %e, "Could not list products, reporting zero balance");
                        0.0
                    }
                }
            }
        };

        if !total.is_finite() {
            warn!(total, "Balance overflowed, capping at f64::MAX");
            return f64::MAX;
        }

        round_price(total)
    }
}
