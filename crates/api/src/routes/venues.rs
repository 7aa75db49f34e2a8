use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::venues, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/venues", get(venues::list_venues))
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/create",
            get(venues::create_venue_form).post(venues::create_venue_submission),
        )
        .route(
            "/venues/:id",
            get(venues::show_venue).delete(venues::delete_venue),
        )
        .route(
            "/venues/:id/edit",
            get(venues::edit_venue).post(venues::edit_venue_submission),
        )
}
