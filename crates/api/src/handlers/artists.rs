//! # Artist Handlers
//!
//! Mirrors the venue handlers, with a flat listing instead of the area
//! grouping. Artists cannot be deleted.

use axum::{
    extract::{rejection::FormRejection, State},
    response::Response,
    Form,
};
use chrono::Utc;
use serde::Serialize;
use showbill_core::{
    errors::BookingError,
    forms::{ArtistForm, FormFields},
    models::{
        artist::{Artist, ArtistDetail, ArtistSummary},
        listing::SearchResults,
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
struct ArtistsPage {
    artists: Vec<ArtistSummary>,
}

#[derive(Debug, Serialize)]
struct ArtistPage {
    artist: ArtistDetail,
}

fn artist_not_found(id: i64) -> AppError {
    AppError(BookingError::NotFound(format!("Artist with ID {id} not found")))
}

#[axum::debug_handler]
pub async fn list_artists(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
) -> Result<Response, AppError> {
    let artists = state.store.list_artists().await?;

    Ok(render(flash, ArtistsPage { artists }))
}

#[axum::debug_handler]
pub async fn search_artists(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
    search: Result<Form<SearchForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(SearchForm { search_term }) = search?;
    let artists = state.store.search_artists(&search_term, Utc::now()).await?;

    Ok(render(
        flash,
        SearchPage {
            search_term,
            results: SearchResults::new(artists),
        },
    ))
}

#[axum::debug_handler]
pub async fn show_artist(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    let artist = state
        .store
        .get_artist(id)
        .await?
        .ok_or_else(|| artist_not_found(id))?;
    let shows = state.store.artist_shows(id).await?;

    Ok(render(
        flash,
        ArtistPage {
            artist: ArtistDetail::new(artist, shows, Utc::now()),
        },
    ))
}

pub async fn create_artist_form(flash: Flash) -> Response {
    render(flash, FormPage::<ArtistForm>::blank(ArtistForm::default()))
}

#[axum::debug_handler]
pub async fn create_artist_submission(
    State(state): State<Arc<ApiState>>,
    submission: Submission,
) -> Response {
    let fields = match submitted_fields(submission) {
        Ok(fields) => fields,
        Err(err) => {
            return redirect_with_flash("/artists/create", format!("Artist could not be listed. {err}"));
        }
    };

    let form = match ArtistForm::from_pairs(&fields) {
        Ok(form) => form,
        Err(err) => {
            let name = FormFields::new(&fields).get("name").unwrap_or_default();
            return redirect_with_flash(
                "/artists/create",
                format!("Artist {name} could not be listed. {err}"),
            );
        }
    };

    match state.store.create_artist(&form).await {
        Ok(artist) => {
            info!(artist_id = artist.id, name = %artist.name, "artist listed");
            redirect_with_flash("/", format!("Artist {} was successfully listed!", artist.name))
        }
        Err(err) => {
            warn!(error = ?err, name = %form.name, "artist could not be listed");
            redirect_with_flash(
                "/artists/create",
                format!(
                    "An error occurred. Artist {} could not be listed. Error: {err}",
                    form.name
                ),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn edit_artist(
    State(state): State<Arc<ApiState>>,
    flash: Flash,
    EntityId(id): EntityId,
) -> Result<Response, AppError> {
    let artist = state
        .store
        .get_artist(id)
        .await?
        .ok_or_else(|| artist_not_found(id))?;

    Ok(render(
        flash,
        FormPage::<ArtistForm, Artist>::editing(ArtistForm::from(&artist), artist),
    ))
}

#[axum::debug_handler]
pub async fn edit_artist_submission(
    State(state): State<Arc<ApiState>>,
    EntityId(id): EntityId,
    submission: Submission,
) -> Result<Response, AppError> {
    if state.store.get_artist(id).await?.is_none() {
        return Err(artist_not_found(id));
    }

    let form = match submitted_fields(submission).and_then(|fields| ArtistForm::from_pairs(&fields)) {
        Ok(form) => form,
        Err(err) => {
            return Ok(redirect_with_flash(
                &format!("/artists/{id}/edit"),
                format!("An error occurred: {err}"),
            ));
        }
    };

    let detail_page = format!("/artists/{id}");
    match state.store.update_artist(id, &form).await {
        Ok(Some(_)) => {
            info!(artist_id = id, "artist updated");
            Ok(redirect_with_flash(&detail_page, "Artist updated successfully!"))
        }
        Ok(None) => Err(artist_not_found(id)),
        Err(err) => {
            warn!(error = ?err, artist_id = id, "artist could not be updated");
            Ok(redirect_with_flash(&detail_page, format!("An error occurred: {err}")))
        }
    }
}
