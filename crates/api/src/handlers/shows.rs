use axum::{extract::State, response::Response};
use serde::Serialize;
use showbill_core::{forms::ShowForm, models::show::ShowListing};
use std::sync::Arc;
use tracing::{info, warn};

use super::{submitted_fields, Submission};
use crate::{
    middleware::{
        error_handling::AppError,
        flash::{redirect_with_flash, render, Flash},
    },
    ApiState,
};

#[derive(Debug, Serialize)]
struct ShowsPage {
    shows: Vec<ShowListing>,
}

#[derive(Debug, Serialize)]
struct ShowFormPage {
    form: ShowForm,
}

#[axum::debug_handler]
pub async fn list_shows(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
) -> Result<Response, AppError> {
    let shows = state.store.list_shows().await?;

    Ok(render(flash, ShowsPage { shows }))
}

pub async fn create_show_form(flash: Flash) -> Response {
    render(
        flash,
        ShowFormPage {
            form: ShowForm::default(),
        },
    )
}

/// Books an artist at a venue. Only the store's foreign keys are checked:
/// overlapping bookings go through.
#[axum::debug_handler]
pub async fn create_show_submission(
    State(state): State<Arc<ApiState>>,
    submission: Submission,
) -> Response {
    let show = match submitted_fields(submission).and_then(|fields| ShowForm::from_pairs(&fields)) {
        Ok(show) => show,
        Err(err) => {
            return redirect_with_flash(
                "/shows/create",
                format!("Show could not be listed. {err}"),
            );
        }
    };

    match state.store.create_show(&show).await {
        Ok(show) => {
            info!(show_id = show.id, venue_id = show.venue_id, artist_id = show.artist_id, "show listed");
            redirect_with_flash("/", "Show was successfully listed!")
        }
        Err(err) => {
            warn!(error = ?err, "show could not be listed");
            redirect_with_flash(
                "/",
                format!("An error occurred. Show could not be listed. Error: {err}"),
            )
        }
    }
}
