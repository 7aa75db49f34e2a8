/// Artist pages
pub mod artists;
/// Liveness and build information
pub mod health;
/// Show pages
pub mod shows;
/// Venue pages
pub mod venues;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

/// Every page of the site, with the landing page at `/`.
pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(handlers::home::index))
        .merge(health::routes())
        .merge(venues::routes())
        .merge(artists::routes())
        .merge(shows::routes())
}
