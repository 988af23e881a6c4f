use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub quantity: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
            quantity: model.quantity,
        }
    }
}

// The id is left to SQLite
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            quantity: Set(input.quantity),
        }
    }
}
