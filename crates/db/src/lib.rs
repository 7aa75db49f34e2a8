//! # Showbill DB
//!
//! Storage backends for the booking directory.
//!
//! - [`PgStore`]: PostgreSQL through `sqlx`, one transaction per write
//! - [`MemoryStore`]: in-process tables with the same semantics, for tests

pub mod memory;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub use memory::MemoryStore;
pub use store::PgStore;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}
