//! Schema migration CLI for the products database.
//!
//! Reads `DATABASE_URL`, e.g. `DATABASE_URL=sqlite://./products.db?mode=rwc cargo run -p migration -- up`.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
