use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use showbill_api::config::ApiConfig;
use showbill_db::{create_pool, schema::initialize_database, PgStore};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    dotenv().ok();

    let config = ApiConfig::from_env()?;

    let db_pool = create_pool(&config.database_url, config.max_connections).await?;

    // Idempotent: every statement is CREATE ... IF NOT EXISTS
    initialize_database(&db_pool).await?;

    showbill_api::start_server(config, Arc::new(PgStore::new(db_pool))).await?;

    Ok(())
}
