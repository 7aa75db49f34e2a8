//! Storage abstraction for the booking directory.
//!
//! Handlers only talk to a [`BookingStore`]. Each write method is a single
//! unit of work: an implementation must either apply all of its effects or
//! none of them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::forms::{ArtistForm, VenueForm};
use crate::models::{
    artist::{Artist, ArtistSummary},
    genre::Genre,
    listing::{EntitySummary, ListedVenue},
    show::{ArtistAppearance, NewShow, Show, ShowListing, VenueBooking},
    venue::Venue,
};

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Every venue with its count of shows starting after `now`, in creation order.
    async fn list_venues(&self, now: DateTime<Utc>) -> eyre::Result<Vec<ListedVenue>>;

    /// Venues whose name contains `term`, ignoring case.
    async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> eyre::Result<Vec<EntitySummary>>;

    async fn get_venue(&self, id: i64) -> eyre::Result<Option<Venue>>;

    /// Shows hosted by the venue, joined to their artist, by start time.
    async fn venue_shows(&self, venue_id: i64) -> eyre::Result<Vec<ArtistAppearance>>;

    async fn create_venue(&self, form: &VenueForm) -> eyre::Result<Venue>;

    /// Overwrites every field and replaces the genre set. `None` if the venue is gone.
    async fn update_venue(&self, id: i64, form: &VenueForm) -> eyre::Result<Option<Venue>>;

    /// Removes the venue, its shows and its genre associations. Genre rows stay.
    async fn delete_venue(&self, id: i64) -> eyre::Result<bool>;

    async fn list_artists(&self) -> eyre::Result<Vec<ArtistSummary>>;

    async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> eyre::Result<Vec<EntitySummary>>;

    async fn get_artist(&self, id: i64) -> eyre::Result<Option<Artist>>;

    /// Shows played by the artist, joined to their venue, by start time.
    async fn artist_shows(&self, artist_id: i64) -> eyre::Result<Vec<VenueBooking>>;

    async fn create_artist(&self, form: &ArtistForm) -> eyre::Result<Artist>;

    async fn update_artist(&self, id: i64, form: &ArtistForm) -> eyre::Result<Option<Artist>>;

    async fn list_shows(&self) -> eyre::Result<Vec<ShowListing>>;

    /// Fails when the venue or the artist does not exist. Overlapping bookings are allowed.
    async fn create_show(&self, show: &NewShow) -> eyre::Result<Show>;

    async fn list_genres(&self) -> eyre::Result<Vec<Genre>>;
}
