//! Products Domain
//!
//! CRUD over a single `products` table plus an inventory balance.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, normalisation, balance fallback
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + SQLite and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_products::{handlers, ProductService, SqliteProductRepository};
//!
//! let db = database::sqlite::connect_from_config(SqliteConfig::new("sqlite://./products.db")).await?;
//! let service = ProductService::new(SqliteProductRepository::new(db));
//! let router = axum::Router::new().nest("/products", handlers::router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod sqlite;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{BalanceResponse, CreateProduct, Product, UpdateProduct};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use sqlite::SqliteProductRepository;
