//! # Venue Handlers
//!
//! Listing (grouped by city and state), search, the detail page with its
//! shows split into past and upcoming, create and edit forms, and deletion.
//!
//! Form submissions always finish with a redirect and a flash message.
//! Validation and persistence failures are reported through the flash
//! message, never as an error page.

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::Response,
    Form,
};
use chrono::Utc;
use serde::Serialize;
use showbill_core::{
    errors::BookingError,
    forms::{FormFields, VenueForm},
    models::{
        listing::{group_by_area, Area, SearchResults},
        venue::{Venue, VenueDetail},
    },
};
use std::sync::Arc;
use tracing::{info, warn};

use super::{submitted_fields, EntityId, FormPage, SearchForm, SearchPage, Submission};
use crate::{
    middleware::{
        error_handling::AppError,
        flash::{redirect_with_flash, render, Flash},
    },
    ApiState,
};

#[derive(Debug, Serialize)]
struct AreasPage {
    areas: Vec<Area>,
}

#[derive(Debug, Serialize)]
struct VenuePage {
    venue: VenueDetail,
}

fn venue_not_found(id: i64) -> AppError {
    AppError(BookingError::NotFound(format!("Venue with ID {id} not found")))
}

#[axum::debug_handler]
pub async fn list_venues(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
) -> Result<Response, AppError> {
    let venues = state.store.list_venues(Utc::now()).await?;

    Ok(render(
        flash,
        AreasPage {
            areas: group_by_area(venues),
        },
    ))
}

#[axum::debug_handler]
pub async fn search_venues(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
    search: Result<Form<SearchForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(SearchForm { search_term }) = search?;
    let venues = state.store.search_venues(&search_term, Utc::now()).await?;

    Ok(render(
        flash,
        SearchPage {
            search_term,
            results: SearchResults::new(venues),
        },
    ))
}

#[axum::debug_handler]
pub async fn show_venue(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    let venue = state
        .store
        .get_venue(id)
        .await?
        .ok_or_else(|| venue_not_found(id))?;
    let shows = state.store.venue_shows(id).await?;

    Ok(render(
        flash,
        VenuePage {
            venue: VenueDetail::new(venue, shows, Utc::now()),
        },
    ))
}

pub async fn create_venue_form(flash: Flash) -> Response {
    render(flash, FormPage::<VenueForm>::blank(VenueForm::default()))
}

#[axum::debug_handler]
pub async fn create_venue_submission(
    State(state): State<Arc<ApiState>>,
    submission: Submission,
) -> Response {
    let fields = match submitted_fields(submission) {
        Ok(fields) => fields,
        Err(err) => {
            return redirect_with_flash("/venues/create", format!("Venue could not be listed. {err}"));
        }
    };

    let form = match VenueForm::from_pairs(&fields) {
        Ok(form) => form,
        Err(err) => {
            let name = FormFields::new(&fields).get("name").unwrap_or_default();
            return redirect_with_flash(
                "/venues/create",
                format!("Venue '{name}' could not be listed. {err}"),
            );
        }
    };

    match state.store.create_venue(&form).await {
        Ok(venue) => {
            info!(venue_id = venue.id, name = %venue.name, "venue listed");
            redirect_with_flash("/", format!("Venue '{}' was successfully listed!", venue.name))
        }
        Err(err) => {
            warn!(error = ?err, name = %form.name, "venue could not be listed");
            redirect_with_flash(
                "/venues/create",
                format!(
                    "An error occurred. Venue '{}' could not be listed. Error: {err}",
                    form.name
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn edit_venue(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    let venue = state
        .store
        .get_venue(id)
        .await?
        .ok_or_else(|| venue_not_found(id))?;

    Ok(render(
        flash,
        FormPage::<VenueForm, Venue>::editing(VenueForm::from(&venue), venue),
    ))
}

#[axum::debug_handler]
pub async fn edit_venue_submission(
    State(state): State<Arc<ApiState>>,
    EntityId(id): EntityId,
    submission: Submission,
) -> Result<Response, AppError> {
    if state.store.get_venue(id).await?.is_none() {
        return Err(venue_not_found(id));
    }

    let form = match submitted_fields(submission).and_then(|fields| VenueForm::from_pairs(&fields)) {
        Ok(form) => form,
        Err(err) => {
            return Ok(redirect_with_flash(
                &format!("/venues/{id}/edit"),
                format!("An error occurred: {err}"),
            ));
        }
    };

    let detail_page = format!("/venues/{id}");
    match state.store.update_venue(id, &form).await {
        Ok(Some(_)) => {
            info!(venue_id = id, "venue updated");
            Ok(redirect_with_flash(&detail_page, "Venue updated successfully!"))
        }
        Ok(None) => Err(venue_not_found(id)),
        Err(err) => {
            warn!(error = ?err, venue_id = id, "venue could not be updated");
            Ok(redirect_with_flash(&detail_page, format!("An error occurred: {err}")))
        }
    }
}

#[axum::debug_handler]
pub async fn delete_venue(
    State(state): State<Arc<ApiState>>,
    EntityId(id): EntityId,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_venue(id).await? {
        return Err(venue_not_found(id));
    }

    info!(venue_id = id, "venue deleted");
    Ok(StatusCode::NO_CONTENT)
}
