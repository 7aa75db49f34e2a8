//! Typed form submissions.
//!
//! Handlers receive submitted fields as raw `(name, value)` pairs so that
//! repeated keys (the multi-value `genres` field) survive decoding. Each form
//! is parsed and validated exactly once here; everything past this boundary
//! works with the typed structs.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::{artist::Artist, genre::normalize_genre_names, show::NewShow, venue::Venue};

/// State codes accepted by the venue and artist forms.
pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

const NAIVE_START_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Read-only view over submitted `(name, value)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct FormFields<'a> {
    pairs: &'a [(String, String)],
}

impl<'a> FormFields<'a> {
    pub fn new(pairs: &'a [(String, String)]) -> Self {
        Self { pairs }
    }

    /// First value submitted under `name`, trimmed. Blank values count as absent.
    pub fn get(&self, name: &str) -> Option<String> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Every value submitted under `name`, in submission order.
    pub fn get_all(&self, name: &str) -> Vec<&'a str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Checkbox semantics: only the value `y` means checked.
    pub fn checked(&self, name: &str) -> bool {
        self.get(name).as_deref() == Some("y")
    }
}

/// Collects field errors so a submission reports all of them at once.
#[derive(Debug, Default)]
struct Problems(Vec<String>);

impl Problems {
    fn required(&mut self, fields: &FormFields<'_>, name: &str) -> String {
        match fields.get(name) {
            Some(value) => value,
            None => {
                self.0.push(format!("{name} is required"));
                String::new()
            }
        }
    }

    fn state(&mut self, fields: &FormFields<'_>) -> String {
        let state = self.required(fields, "state");
        if !state.is_empty() && !US_STATES.contains(&state.as_str()) {
            self.0.push(format!("state '{state}' is not a valid choice"));
        }
        state
    }

    fn link(&mut self, fields: &FormFields<'_>, name: &str) -> Option<String> {
        let link = fields.get(name)?;
        if !is_http_url(&link) {
            self.0.push(format!("{name} must be an http(s) URL"));
        }
        Some(link)
    }

    fn finish<T>(self, value: T) -> BookingResult<T> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(BookingError::Validation(self.0.join("; ")))
        }
    }
}

fn is_http_url(value: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| value.len() > scheme.len() && value.starts_with(scheme))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> BookingResult<Self> {
        let fields = FormFields::new(pairs);
        let mut problems = Problems::default();

        let form = Self {
            name: problems.required(&fields, "name"),
            city: problems.required(&fields, "city"),
            state: problems.state(&fields),
            address: problems.required(&fields, "address"),
            phone: fields.get("phone").unwrap_or_default(),
            genres: normalize_genre_names(fields.get_all("genres")),
            facebook_link: problems.link(&fields, "facebook_link"),
            image_link: problems.link(&fields, "image_link"),
            website_link: problems.link(&fields, "website_link"),
            seeking_talent: fields.checked("seeking_talent"),
            seeking_description: fields.get("seeking_description"),
        };

        problems.finish(form)
    }
}

impl From<&Venue> for VenueForm {
    fn from(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            genres: venue.genres.clone(),
            facebook_link: venue.facebook_link.clone(),
            image_link: venue.image_link.clone(),
            website_link: venue.website_link.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

/// Artist submission. The form's `website_link` field is stored as the
/// artist's `website`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> BookingResult<Self> {
        let fields = FormFields::new(pairs);
        let mut problems = Problems::default();

        let form = Self {
            name: problems.required(&fields, "name"),
            city: problems.required(&fields, "city"),
            state: problems.state(&fields),
            phone: fields.get("phone").unwrap_or_default(),
            genres: normalize_genre_names(fields.get_all("genres")),
            facebook_link: problems.link(&fields, "facebook_link"),
            image_link: problems.link(&fields, "image_link"),
            website_link: problems.link(&fields, "website_link"),
            seeking_venue: fields.checked("seeking_venue"),
            seeking_description: fields.get("seeking_description"),
        };

        problems.finish(form)
    }
}

impl From<&Artist> for ArtistForm {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            genres: artist.genres.clone(),
            facebook_link: artist.facebook_link.clone(),
            image_link: artist.image_link.clone(),
            website_link: artist.website.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowForm {
    pub venue_id: Option<i64>,
    pub artist_id: Option<i64>,
    pub start_time: Option<DateTime<Utc>>,
}

impl ShowForm {
    /// Parses a show submission straight into a [`NewShow`]; every field is required.
    pub fn from_pairs(pairs: &[(String, String)]) -> BookingResult<NewShow> {
        let fields = FormFields::new(pairs);
        let mut problems = Problems::default();

        let venue_id = parse_id(&fields, "venue_id", &mut problems);
        let artist_id = parse_id(&fields, "artist_id", &mut problems);
        let start_time = match fields.get("start_time") {
            Some(raw) => {
                let parsed = parse_start_time(&raw);
                if parsed.is_none() {
                    problems.0.push(format!("start_time '{raw}' is not a valid date and time"));
                }
                parsed
            }
            None => {
                problems.0.push("start_time is required".to_string());
                None
            }
        };

        match (venue_id, artist_id, start_time) {
            (Some(venue_id), Some(artist_id), Some(start_time)) => problems.finish(NewShow {
                venue_id,
                artist_id,
                start_time,
            }),
            _ => Err(BookingError::Validation(problems.0.join("; "))),
        }
    }
}

fn parse_id(fields: &FormFields<'_>, name: &str, problems: &mut Problems) -> Option<i64> {
    let Some(raw) = fields.get(name) else {
        problems.0.push(format!("{name} is required"));
        return None;
    };
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            problems.0.push(format!("{name} '{raw}' is not a valid id"));
            None
        }
    }
}

/// Accepts RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` interpreted as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
