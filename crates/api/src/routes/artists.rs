use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers::artists, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/artists", get(artists::list_artists))
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/create",
            get(artists::create_artist_form).post(artists::create_artist_submission),
        )
        .route("/artists/:id", get(artists::show_artist))
        .route(
            "/artists/:id/edit",
            get(artists::edit_artist).post(artists::edit_artist_submission),
        )
}
