use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Inputs arrive validated and normalised by the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product and return it with its assigned id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// All products ordered by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Apply the present fields; `NotFound` when no product has this id
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Sum of `price * quantity` over all products, unrounded
    async fn total_balance(&self) -> ProductResult<f64>;
}

#[derive(Default)]
struct Store {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-memory implementation of ProductRepository, for development and tests
///
/// Ids keep increasing after deletes, matching the SQLite store.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        store.last_id += 1;
        let product = Product::new(store.last_id, input);
        store.products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, "Created product");
        Ok(product)
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.products.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let product = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::NotFound(id))?;
        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let deleted = store.products.remove(&id).is_some();

        if deleted {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(deleted)
    }

    async fn total_balance(&self) -> ProductResult<f64> {
        let store = self.store.read().await;
        Ok(store.products.values().map(Product::value).sum())
    }
}
