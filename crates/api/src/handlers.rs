/// Artist listing, search, detail and forms
pub mod artists;
/// Landing page
pub mod home;
/// Show listing and booking
pub mod shows;
/// Venue listing, search, detail, forms and deletion
pub mod venues;

use axum::{
    async_trait,
    extract::{rejection::FormRejection, FromRequestParts, Path},
    http::request::Parts,
    Form,
};
use serde::{Deserialize, Serialize};
use showbill_core::{
    errors::BookingResult,
    forms::US_STATES,
    models::{genre::GENRE_CHOICES, listing::SearchResults},
};

use crate::middleware::error_handling::AppError;

/// The `{id}` segment of a venue or artist URL. A segment that is not an
/// `i64` renders the 404 page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(EntityId(id))
    }
}

/// A form submission. Bodies that are not urlencoded are kept as the
/// rejection so the handler can answer with a flash message.
pub type Submission = Result<Form<Vec<(String, String)>>, FormRejection>;

pub fn submitted_fields(submission: Submission) -> BookingResult<Vec<(String, String)>> {
    submission
        .map(|Form(fields)| fields)
        .map_err(|rejection| AppError::from(rejection).0)
}

/// Body of `POST /venues/search` and `POST /artists/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchPage {
    pub search_term: String,
    pub results: SearchResults,
}

/// A venue or artist form together with its choice lists.
#[derive(Debug, Serialize)]
pub struct FormPage<F, E = ()> {
    pub form: F,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editing: Option<E>,
    pub genre_choices: &'static [&'static str],
    pub state_choices: &'static [&'static str],
}

impl<F, E> FormPage<F, E> {
    pub fn blank(form: F) -> Self {
        Self {
            form,
            editing: None,
            genre_choices: GENRE_CHOICES,
            state_choices: US_STATES,
        }
    }

    pub fn editing(form: F, entity: E) -> Self {
        Self {
            editing: Some(entity),
            ..Self::blank(form)
        }
    }
}
