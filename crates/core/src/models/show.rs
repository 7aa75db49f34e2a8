//! Shows and the past/upcoming partitioning applied on every read.
//!
//! Whether a show is upcoming is never stored. It is derived from the
//! show's `start_time` and the instant the read happens: a show is upcoming
//! iff it starts strictly after that instant, so a show starting exactly
//! "now" is already past. Venue and artist views share [`is_upcoming`] so
//! both sides always agree on the boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A booking of one artist at one venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A show that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShow {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A show as seen from a venue: the performing artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// A show as seen from an artist: the hosting venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueBooking {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// One row of the `/shows` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Anything carrying a show start time.
pub trait Scheduled {
    fn start_time(&self) -> DateTime<Utc>;
}

impl Scheduled for ArtistAppearance {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

impl Scheduled for VenueBooking {
    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }
}

/// Returns true when a show starting at `start_time` is upcoming at `now`.
pub fn is_upcoming(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time > now
}

/// Shows split around an evaluation instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionedShows<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

/// Splits `shows` into past and upcoming relative to `now`, keeping the
/// input order within each list.
pub fn partition_shows<T: Scheduled>(shows: Vec<T>, now: DateTime<Utc>) -> PartitionedShows<T> {
    let (upcoming, past) = shows
        .into_iter()
        .partition(|show| is_upcoming(show.start_time(), now));

    PartitionedShows { past, upcoming }
}
