use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Product, UpdateProduct},
    repository::ProductRepository,
};

/// SQLite-backed ProductRepository (SeaORM)
#[derive(Clone)]
pub struct SqliteProductRepository {
    db: DatabaseConnection,
}

impl SqliteProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Product::from))
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if input.is_empty() {
            return Ok(model.into());
        }

        let mut active_model: entity::ActiveModel = model.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(price) = input.price {
            active_model.price = Set(price);
        }
        if let Some(quantity) = input.quantity {
            active_model.quantity = Set(quantity);
        }

        let model = active_model.update(&self.db).await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        let deleted = result.rows_affected > 0;

        if deleted {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(deleted)
    }

    async fn total_balance(&self) -> ProductResult<f64> {
        let total = entity::Entity::find()
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(price * quantity), 0.0)"), "total")
            .into_tuple::<f64>()
            .one(&self.db)
            .await?;

        Ok(total.unwrap_or(0.0))
    }
}
