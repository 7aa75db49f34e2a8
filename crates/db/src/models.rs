use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use showbill_core::models::{
    artist::{Artist, ArtistSummary},
    genre::Genre,
    listing::{EntitySummary, ListedVenue},
    show::{ArtistAppearance, Show, ShowListing, VenueBooking},
    venue::Venue,
};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVenue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl DbVenue {
    pub fn into_venue(self, genres: Vec<String>) -> Venue {
        Venue {
            id: self.id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            website_link: self.website_link,
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
            genres,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbArtist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl DbArtist {
    pub fn into_artist(self, genres: Vec<String>) -> Artist {
        Artist {
            id: self.id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            website: self.website,
            facebook_link: self.facebook_link,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
            genres,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGenre {
    pub id: i64,
    pub name: String,
}

impl From<DbGenre> for Genre {
    fn from(row: DbGenre) -> Self {
        Genre {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbShow {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

impl From<DbShow> for Show {
    fn from(row: DbShow) -> Self {
        Show {
            id: row.id,
            venue_id: row.venue_id,
            artist_id: row.artist_id,
            start_time: row.start_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbListedVenue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

impl From<DbListedVenue> for ListedVenue {
    fn from(row: DbListedVenue) -> Self {
        ListedVenue {
            id: row.id,
            name: row.name,
            city: row.city,
            state: row.state,
            num_upcoming_shows: row.num_upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<DbEntitySummary> for EntitySummary {
    fn from(row: DbEntitySummary) -> Self {
        EntitySummary {
            id: row.id,
            name: row.name,
            num_upcoming_shows: row.num_upcoming_shows,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbArtistSummary {
    pub id: i64,
    pub name: String,
}

impl From<DbArtistSummary> for ArtistSummary {
    fn from(row: DbArtistSummary) -> Self {
        ArtistSummary {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<DbArtistAppearance> for ArtistAppearance {
    fn from(row: DbArtistAppearance) -> Self {
        ArtistAppearance {
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVenueBooking {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<DbVenueBooking> for VenueBooking {
    fn from(row: DbVenueBooking) -> Self {
        VenueBooking {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            venue_image_link: row.venue_image_link,
            start_time: row.start_time,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl From<DbShowListing> for ShowListing {
    fn from(row: DbShowListing) -> Self {
        ShowListing {
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
        }
    }
}
