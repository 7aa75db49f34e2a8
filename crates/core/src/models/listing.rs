//! Listing and search view models.

use serde::{Deserialize, Serialize};

/// A venue row as returned by a full listing, before grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedVenue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Id, name and upcoming show count of a venue or an artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl From<ListedVenue> for EntitySummary {
    fn from(venue: ListedVenue) -> Self {
        Self {
            id: venue.id,
            name: venue.name,
            num_upcoming_shows: venue.num_upcoming_shows,
        }
    }
}

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl SearchResults {
    pub fn new(data: Vec<EntitySummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Groups venues by (city, state).
///
/// Areas appear in the order their first venue appears in the input, and
/// venues keep their input order inside each area. Nothing is sorted.
pub fn group_by_area(venues: Vec<ListedVenue>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();

    for venue in venues {
        let position = areas
            .iter()
            .position(|area| area.city == venue.city && area.state == venue.state);

        match position {
            Some(index) => areas[index].venues.push(venue.into()),
            None => areas.push(Area {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![venue.into()],
            }),
        }
    }

    areas
}
