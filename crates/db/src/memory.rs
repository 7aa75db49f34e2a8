//! [`MemoryStore`], an in-process [`BookingStore`].
//!
//! Mirrors the PostgreSQL schema table by table: serial ids, a unique genre
//! name, foreign keys checked on show insert, and cascading deletes. Each
//! operation runs under one lock, so writes are atomic.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use showbill_core::{
    forms::{ArtistForm, VenueForm},
    models::{
        artist::{Artist, ArtistSummary},
        genre::Genre,
        listing::{EntitySummary, ListedVenue},
        show::{is_upcoming, ArtistAppearance, NewShow, Show, ShowListing, VenueBooking},
        venue::Venue,
    },
    store::BookingStore,
};

use crate::models::{DbArtist, DbGenre, DbShow, DbVenue};

#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct Tables {
    venues: Vec<DbVenue>,
    artists: Vec<DbArtist>,
    genres: Vec<DbGenre>,
    venue_genres: Vec<(i64, i64)>,
    artist_genres: Vec<(i64, i64)>,
    shows: Vec<DbShow>,
    venue_ids: Sequence,
    artist_ids: Sequence,
    genre_ids: Sequence,
    show_ids: Sequence,
}

impl Tables {
    fn upsert_genre(&mut self, name: &str) -> i64 {
        if let Some(genre) = self.genres.iter().find(|genre| genre.name == name) {
            return genre.id;
        }
        let id = self.genre_ids.next();
        self.genres.push(DbGenre {
            id,
            name: name.to_string(),
        });
        id
    }

    fn resolve_genres(&mut self, names: &[String]) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::new();
        for name in names {
            let id = self.upsert_genre(name);
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    fn genre_names(&self, links: &[(i64, i64)], owner_id: i64) -> Vec<String> {
        let mut names: Vec<String> = links
            .iter()
            .filter(|(owner, _)| *owner == owner_id)
            .filter_map(|(_, genre_id)| self.genres.iter().find(|genre| genre.id == *genre_id))
            .map(|genre| genre.name.clone())
            .collect();
        names.sort();
        names
    }

    fn replace_venue_genres(&mut self, venue_id: i64, names: &[String]) {
        let genre_ids = self.resolve_genres(names);
        self.venue_genres.retain(|(owner, _)| *owner != venue_id);
        self.venue_genres
            .extend(genre_ids.into_iter().map(|genre_id| (venue_id, genre_id)));
    }

    fn replace_artist_genres(&mut self, artist_id: i64, names: &[String]) {
        let genre_ids = self.resolve_genres(names);
        self.artist_genres.retain(|(owner, _)| *owner != artist_id);
        self.artist_genres
            .extend(genre_ids.into_iter().map(|genre_id| (artist_id, genre_id)));
    }

    fn venue(&self, row: &DbVenue) -> Venue {
        row.clone().into_venue(self.genre_names(&self.venue_genres, row.id))
    }

    fn artist(&self, row: &DbArtist) -> Artist {
        row.clone().into_artist(self.genre_names(&self.artist_genres, row.id))
    }

    fn upcoming_count(&self, now: DateTime<Utc>, matches: impl Fn(&DbShow) -> bool) -> i64 {
        let count = self
            .shows
            .iter()
            .filter(|show| matches(*show) && is_upcoming(show.start_time, now))
            .count();
        i64::try_from(count).unwrap_or(i64::MAX)
    }

    fn sorted_shows(&self, matches: impl Fn(&DbShow) -> bool) -> Vec<&DbShow> {
        let mut shows: Vec<&DbShow> = self.shows.iter().filter(|show| matches(*show)).collect();
        shows.sort_by_key(|show| (show.start_time, show.id));
        shows
    }
}

fn name_contains(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| eyre!("memory store lock poisoned"))
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn list_venues(&self, now: DateTime<Utc>) -> Result<Vec<ListedVenue>> {
        let tables = self.tables()?;
        Ok(tables
            .venues
            .iter()
            .map(|venue| ListedVenue {
                id: venue.id,
                name: venue.name.clone(),
                city: venue.city.clone(),
                state: venue.state.clone(),
                num_upcoming_shows: tables.upcoming_count(now, |show| show.venue_id == venue.id),
            })
            .collect())
    }

    async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<EntitySummary>> {
        let tables = self.tables()?;
        Ok(tables
            .venues
            .iter()
            .filter(|venue| name_contains(&venue.name, term))
            .map(|venue| EntitySummary {
                id: venue.id,
                name: venue.name.clone(),
                num_upcoming_shows: tables.upcoming_count(now, |show| show.venue_id == venue.id),
            })
            .collect())
    }

    async fn get_venue(&self, id: i64) -> Result<Option<Venue>> {
        let tables = self.tables()?;
        Ok(tables
            .venues
            .iter()
            .find(|venue| venue.id == id)
            .map(|venue| tables.venue(venue)))
    }

    async fn venue_shows(&self, venue_id: i64) -> Result<Vec<ArtistAppearance>> {
        let tables = self.tables()?;
        Ok(tables
            .sorted_shows(|show| show.venue_id == venue_id)
            .into_iter()
            .filter_map(|show| {
                let artist = tables.artists.iter().find(|artist| artist.id == show.artist_id)?;
                Some(ArtistAppearance {
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect())
    }

    async fn create_venue(&self, form: &VenueForm) -> Result<Venue> {
        let mut tables = self.tables()?;
        let id = tables.venue_ids.next();
        tables.venues.push(DbVenue {
            id,
            name: form.name.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            address: form.address.clone(),
            phone: form.phone.clone(),
            image_link: form.image_link.clone(),
            facebook_link: form.facebook_link.clone(),
            website_link: form.website_link.clone(),
            seeking_talent: form.seeking_talent,
            seeking_description: form.seeking_description.clone(),
        });
        tables.replace_venue_genres(id, &form.genres);

        let row = tables
            .venues
            .last()
            .ok_or_else(|| eyre!("venue {id} vanished after insert"))?;
        Ok(tables.venue(row))
    }

    async fn update_venue(&self, id: i64, form: &VenueForm) -> Result<Option<Venue>> {
        let mut tables = self.tables()?;
        let Some(index) = tables.venues.iter().position(|venue| venue.id == id) else {
            return Ok(None);
        };

        tables.venues[index] = DbVenue {
            id,
            name: form.name.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            address: form.address.clone(),
            phone: form.phone.clone(),
            image_link: form.image_link.clone(),
            facebook_link: form.facebook_link.clone(),
            website_link: form.website_link.clone(),
            seeking_talent: form.seeking_talent,
            seeking_description: form.seeking_description.clone(),
        };
        tables.replace_venue_genres(id, &form.genres);

        Ok(Some(tables.venue(&tables.venues[index])))
    }

    async fn delete_venue(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables()?;
        let before = tables.venues.len();
        tables.venues.retain(|venue| venue.id != id);
        if tables.venues.len() == before {
            return Ok(false);
        }

        tables.shows.retain(|show| show.venue_id != id);
        tables.venue_genres.retain(|(venue_id, _)| *venue_id != id);
        Ok(true)
    }

    async fn list_artists(&self) -> Result<Vec<ArtistSummary>> {
        let tables = self.tables()?;
        Ok(tables
            .artists
            .iter()
            .map(|artist| ArtistSummary {
                id: artist.id,
                name: artist.name.clone(),
            })
            .collect())
    }

    async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> Result<Vec<EntitySummary>> {
        let tables = self.tables()?;
        Ok(tables
            .artists
            .iter()
            .filter(|artist| name_contains(&artist.name, term))
            .map(|artist| EntitySummary {
                id: artist.id,
                name: artist.name.clone(),
                num_upcoming_shows: tables.upcoming_count(now, |show| show.artist_id == artist.id),
            })
            .collect())
    }

    async fn get_artist(&self, id: i64) -> Result<Option<Artist>> {
        let tables = self.tables()?;
        Ok(tables
            .artists
            .iter()
            .find(|artist| artist.id == id)
            .map(|artist| tables.artist(artist)))
    }

    async fn artist_shows(&self, artist_id: i64) -> Result<Vec<VenueBooking>> {
        let tables = self.tables()?;
        Ok(tables
            .sorted_shows(|show| show.artist_id == artist_id)
            .into_iter()
            .filter_map(|show| {
                let venue = tables.venues.iter().find(|venue| venue.id == show.venue_id)?;
                Some(VenueBooking {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    venue_image_link: venue.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect())
    }

    async fn create_artist(&self, form: &ArtistForm) -> Result<Artist> {
        let mut tables = self.tables()?;
        let id = tables.artist_ids.next();
        tables.artists.push(DbArtist {
            id,
            name: form.name.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            phone: form.phone.clone(),
            image_link: form.image_link.clone(),
            website: form.website_link.clone(),
            facebook_link: form.facebook_link.clone(),
            seeking_venue: form.seeking_venue,
            seeking_description: form.seeking_description.clone(),
        });
        tables.replace_artist_genres(id, &form.genres);

        let row = tables
            .artists
            .last()
            .ok_or_else(|| eyre!("artist {id} vanished after insert"))?;
        Ok(tables.artist(row))
    }

    async fn update_artist(&self, id: i64, form: &ArtistForm) -> Result<Option<Artist>> {
        let mut tables = self.tables()?;
        let Some(index) = tables.artists.iter().position(|artist| artist.id == id) else {
            return Ok(None);
        };

        tables.artists[index] = DbArtist {
            id,
            name: form.name.clone(),
            city: form.city.clone(),
            state: form.state.clone(),
            phone: form.phone.clone(),
            image_link: form.image_link.clone(),
            website: form.website_link.clone(),
            facebook_link: form.facebook_link.clone(),
            seeking_venue: form.seeking_venue,
            seeking_description: form.seeking_description.clone(),
        };
        tables.replace_artist_genres(id, &form.genres);

        Ok(Some(tables.artist(&tables.artists[index])))
    }

    async fn list_shows(&self) -> Result<Vec<ShowListing>> {
        let tables = self.tables()?;
        Ok(tables
            .sorted_shows(|_| true)
            .into_iter()
            .filter_map(|show| {
                let venue = tables.venues.iter().find(|venue| venue.id == show.venue_id)?;
                let artist = tables.artists.iter().find(|artist| artist.id == show.artist_id)?;
                Some(ShowListing {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect())
    }

    async fn create_show(&self, show: &NewShow) -> Result<Show> {
        let mut tables = self.tables()?;
        if !tables.venues.iter().any(|venue| venue.id == show.venue_id) {
            return Err(eyre!(
                "insert on table \"shows\" violates foreign key: venue {} does not exist",
                show.venue_id
            ));
        }
        if !tables.artists.iter().any(|artist| artist.id == show.artist_id) {
            return Err(eyre!(
                "insert on table \"shows\" violates foreign key: artist {} does not exist",
                show.artist_id
            ));
        }

        let row = DbShow {
            id: tables.show_ids.next(),
            venue_id: show.venue_id,
            artist_id: show.artist_id,
            start_time: show.start_time,
        };
        tables.shows.push(row.clone());
        Ok(row.into())
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        let tables = self.tables()?;
        let mut genres: Vec<Genre> = tables.genres.iter().cloned().map(Into::into).collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }
}
