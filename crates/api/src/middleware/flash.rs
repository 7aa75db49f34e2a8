//! # Flash Messages
//!
//! Form submissions answer with a `303 See Other` and leave a message for
//! the page the browser lands on next. The message rides in a `flash`
//! cookie holding an urlencoded `flash=<text>` pair; the next rendered page
//! shows it under its `flash` key and expires the cookie.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

pub const FLASH_COOKIE: &str = "flash";

const COOKIE_ATTRIBUTES: &str = "Path=/; HttpOnly; SameSite=Lax";
const CLEAR_FLASH_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

/// The flash message left by the previous request, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flash(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Flash(read_flash(&parts.headers)))
    }
}

/// Finds and decodes the flash cookie among the request's `Cookie` headers.
pub fn read_flash(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .map(str::trim)
        .filter(|pair| pair.starts_with("flash="))
        .find_map(|pair| {
            serde_urlencoded::from_str::<Vec<(String, String)>>(pair)
                .ok()?
                .into_iter()
                .next()
                .map(|(_, message)| message)
        })
        .filter(|message| !message.is_empty())
}

/// A rendered page: the view model plus the pending flash message.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

/// Renders `body` as a page, consuming the pending flash message.
pub fn render<T: Serialize>(flash: Flash, body: T) -> Response {
    let consumed = flash.0.is_some();
    let mut response = Json(Page {
        flash: flash.0,
        body,
    })
    .into_response();

    if consumed {
        response
            .headers_mut()
            .insert(SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH_COOKIE));
    }

    response
}

/// Redirects to `location` with `message` queued for the next page.
pub fn redirect_with_flash(location: &str, message: impl Into<String>) -> Response {
    let message = message.into();
    let mut response = Redirect::to(location).into_response();

    let cookie = serde_urlencoded::to_string([(FLASH_COOKIE, message.as_str())])
        .ok()
        .and_then(|pair| HeaderValue::from_str(&format!("{pair}; {COOKIE_ATTRIBUTES}")).ok());

    match cookie {
        Some(cookie) => {
            response.headers_mut().insert(SET_COOKIE, cookie);
        }
        None => tracing::warn!(%message, "flash message could not be encoded"),
    }

    response
}
