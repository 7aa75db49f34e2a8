//! [`PgStore`], the PostgreSQL implementation of [`BookingStore`].
//!
//! Reads run on a pooled connection. Every write opens one transaction,
//! hands it to the repository functions, and commits at the end; any `?`
//! before the commit drops the transaction, which rolls it back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
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

use crate::{
    repositories::{artist, contains_pattern, genre, show, venue},
    DbPool,
};

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn list_venues(&self, now: DateTime<Utc>) -> Result<Vec<ListedVenue>> {
        let mut conn = self.pool.acquire().await?;
        let venues = venue::list_venues(&mut conn, now).await?;
        Ok(venues.into_iter().map(Into::into).collect())
    }

    async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<EntitySummary>> {
        let mut conn = self.pool.acquire().await?;
        let venues = venue::search_venues(&mut conn, &contains_pattern(term), now).await?;
        Ok(venues.into_iter().map(Into::into).collect())
    }

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>> {
        let mut conn = self.pool.acquire().await?;
        let Some(row) = venue::get_venue_by_id(&mut conn, id).await? else {
            return Ok(None);
        };
        let genres = genre::get_venue_genre_names(&mut conn, id).await?;
        Ok(Some(row.into_venue(genres)))
    }

    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<ArtistAppearance>> {
        let mut conn = self.pool.acquire().await?;
        let shows = venue::get_venue_shows(&mut conn, venue_id).await?;
        Ok(shows.into_iter().map(Into::into).collect())
    }

    async fn create_venue(&self, form: &VenueForm) -> Result<Venue> {
        let mut tx = self.pool.begin().await?;
        let row = venue::create_venue(&mut tx, form).await?;
        genre::replace_venue_genres(&mut tx, row.id, &form.genres).await?;
        let genres = genre::get_venue_genre_names(&mut tx, row.id).await?;
        tx.commit().await?;

        Ok(row.into_venue(genres))
    }

    async fn update_venue(&self, id: i64, form: &VenueForm) -> Result<Option<Venue>> {
        let mut tx = self.pool.begin().await?;
        let Some(row) = venue::update_venue(&mut tx, id, form).await? else {
            return Ok(None);
        };
        genre::replace_venue_genres(&mut tx, id, &form.genres).await?;
        let genres = genre::get_venue_genre_names(&mut tx, id).await?;
        tx.commit().await?;

        Ok(Some(row.into_venue(genres)))
    }

    async fn delete_venue(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = venue::delete_venue(&mut tx, id).await?;
        tx.commit().await?;

        Ok(deleted)
    }

    async fn list_artists(&self) -> Result<Vec<ArtistSummary>> {
        let mut conn = self.pool.acquire().await?;
        let artists = artist::list_artists(&mut conn).await?;
        Ok(artists.into_iter().map(Into::into).collect())
    }

    async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<EntitySummary>> {
        let mut conn = self.pool.acquire().await?;
        let artists = artist::search_artists(&mut conn, &contains_pattern(term), now).await?;
        Ok(artists.into_iter().map(Into::into).collect())
    }

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>> {
        let mut conn = self.pool.acquire().await?;
        let Some(row) = artist::get_artist_by_id(&mut conn, id).await? else {
            return Ok(None);
        };
        let genres = genre::get_artist_genre_names(&mut conn, id).await?;
        Ok(Some(row.into_artist(genres)))
    }

    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<VenueBooking>> {
        let mut conn = self.pool.acquire().await?;
        let shows = artist::get_artist_shows(&mut conn, artist_id).await?;
        Ok(shows.into_iter().map(Into::into).collect())
    }

    async fn create_artist(&self, form: &ArtistForm) -> Result<Artist> {
        let mut tx = self.pool.begin().await?;
        let row = artist::create_artist(&mut tx, form).await?;
        genre::replace_artist_genres(&mut tx, row.id, &form.genres).await?;
        let genres = genre::get_artist_genre_names(&mut tx, row.id).await?;
        tx.commit().await?;

        Ok(row.into_artist(genres))
    }

    async fn update_artist(&self, id: i64, form: &ArtistForm) -> Result<Option<Artist>> {
        let mut tx = self.pool.begin().await?;
        let Some(row) = artist::update_artist(&mut tx, id, form).await? else {
            return Ok(None);
        };
        genre::replace_artist_genres(&mut tx, id, &form.genres).await?;
        let genres = genre::get_artist_genre_names(&mut tx, id).await?;
        tx.commit().await?;

        Ok(Some(row.into_artist(genres)))
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>> {
        let mut conn = self.pool.acquire().await?;
        let shows = show::list_shows(&mut conn).await?;
        Ok(shows.into_iter().map(Into::into).collect())
    }

    async fn create_show(&self, new_show: &NewShow) -> Result<Show> {
        let mut tx = self.pool.begin().await?;
        let row = show::create_show(&mut tx, new_show).await?;
        tx.commit().await?;

        Ok(row.into())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        let mut conn = self.pool.acquire().await?;
        let genres = genre::list_genres(&mut conn).await?;
        Ok(genres.into_iter().map(Into::into).collect())
    }
}
