use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{
    header::{COOKIE, LOCATION, SET_COOKIE},
    HeaderMap, HeaderValue, StatusCode,
};
use axum_test::{TestResponse, TestServer};
use chrono::{DateTime, Duration, Utc};
use mockall::mock;
use serde_json::Value;
use showbill_api::{middleware::flash::read_flash, router, ApiState};
use showbill_core::{
    forms::{ArtistForm, VenueForm},
    models::{
        artist::{Artist, ArtistSummary},
        genre::Genre,
        listing::{EntitySummary, ListedVenue},
        show::{ArtistAppearance, NewShow, Show, ShowListing, VenueBooking},
        venue::Venue,
    },
    store::BookingStore,
};
use showbill_db::MemoryStore;

mock! {
    pub Store {}

    #[async_trait]
    impl BookingStore for Store {
        async fn list_venues(&self, now: DateTime<Utc>) -> eyre::Result<Vec<ListedVenue>>;
        async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> eyre::Result<Vec<EntitySummary>>;
        async fn get_venue(&self, id: i64) -> eyre::Result<Option<Venue>>;
        async fn venue_shows(&self, venue_id: i64) -> eyre::Result<Vec<ArtistAppearance>>;
        async fn create_venue(&self, form: &VenueForm) -> eyre::Result<Venue>;
        async fn update_venue(&self, id: i64, form: &VenueForm) -> eyre::Result<Option<Venue>>;
        async fn delete_venue(&self, id: i64) -> eyre::Result<bool>;
        async fn list_artists(&self) -> eyre::Result<Vec<ArtistSummary>>;
        async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> eyre::Result<Vec<EntitySummary>>;
        async fn get_artist(&self, id: i64) -> eyre::Result<Option<Artist>>;
        async fn artist_shows(&self, artist_id: i64) -> eyre::Result<Vec<VenueBooking>>;
        async fn create_artist(&self, form: &ArtistForm) -> eyre::Result<Artist>;
        async fn update_artist(&self, id: i64, form: &ArtistForm) -> eyre::Result<Option<Artist>>;
        async fn list_shows(&self) -> eyre::Result<Vec<ShowListing>>;
        async fn create_show(&self, show: &NewShow) -> eyre::Result<Show>;
        async fn list_genres(&self) -> eyre::Result<Vec<Genre>>;
    }
}

pub fn server_for(store: Arc<dyn BookingStore>) -> TestServer {
    TestServer::new(router(Arc::new(ApiState { store }))).unwrap()
}

/// A server over an in-memory store, with the store kept for seeding and
/// inspection.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub server: TestServer,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let server = server_for(store.clone());
        Self { store, server }
    }

    pub async fn venue(&self, name: &str, city: &str, state: &str) -> Venue {
        self.store
            .create_venue(&VenueForm {
                name: name.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                address: "1015 Folsom Street".to_string(),
                phone: "123-123-1234".to_string(),
                ..VenueForm::default()
            })
            .await
            .unwrap()
    }

    pub async fn artist(&self, name: &str) -> Artist {
        self.store
            .create_artist(&ArtistForm {
                name: name.to_string(),
                city: "San Francisco".to_string(),
                state: "CA".to_string(),
                ..ArtistForm::default()
            })
            .await
            .unwrap()
    }

    /// Books `artist_id` at `venue_id`, `days` from now (negative for the past).
    pub async fn show(&self, venue_id: i64, artist_id: i64, days: i64) -> Show {
        self.store
            .create_show(&NewShow {
                venue_id,
                artist_id,
                start_time: Utc::now() + Duration::days(days),
            })
            .await
            .unwrap()
    }

    /// Follows a flash redirect the way a browser would, sending the cookie
    /// back, and returns the page it lands on.
    pub async fn follow(&self, response: &TestResponse) -> TestResponse {
        let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        let pair = cookie.split(';').next().unwrap().to_string();

        self.server
            .get(&location(response))
            .add_header(COOKIE, HeaderValue::from_str(&pair).unwrap())
            .await
    }
}

pub fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub fn location(response: &TestResponse) -> String {
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    response.headers()[LOCATION].to_str().unwrap().to_string()
}

/// The flash message a redirect queued for the next page.
pub fn flash(response: &TestResponse) -> Option<String> {
    let cookie = response.headers().get(SET_COOKIE)?.to_str().ok()?;
    let pair = cookie.split(';').next()?;

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, HeaderValue::from_str(pair).ok()?);
    read_flash(&headers)
}

pub fn names(entries: &Value) -> Vec<&str> {
    entries
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["name"].as_str().unwrap())
        .collect()
}
