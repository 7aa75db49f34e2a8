use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers::shows, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/shows", get(shows::list_shows))
        .route(
            "/shows/create",
            get(shows::create_show_form).post(shows::create_show_submission),
        )
}
