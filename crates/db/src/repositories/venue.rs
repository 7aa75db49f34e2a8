use crate::models::{DbArtistAppearance, DbEntitySummary, DbListedVenue, DbVenue};
use chrono::{DateTime, Utc};
use eyre::Result;
use showbill_core::forms::VenueForm;
use sqlx::PgConnection;

pub async fn create_venue(conn: &mut PgConnection, form: &VenueForm) -> Result<DbVenue> {
    tracing::debug!("Creating venue: name={}, city={}, state={}", form.name, form.city, form.state);

    let venue = sqlx::query_as::<_, DbVenue>(
        r#"
        INSERT INTO venues (
            name, city, state, address, phone, image_link,
            facebook_link, website_link, seeking_talent, seeking_description
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, name, city, state, address, phone, image_link,
                  facebook_link, website_link, seeking_talent, seeking_description
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&form.facebook_link)
    .bind(&form.website_link)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!("Venue created successfully: id={}", venue.id);
    Ok(venue)
}

pub async fn get_venue_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<DbVenue>> {
    let venue = sqlx::query_as::<_, DbVenue>(
        r#"
        SELECT id, name, city, state, address, phone, image_link,
               facebook_link, website_link, seeking_talent, seeking_description
        FROM venues
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    if venue.is_none() {
        tracing::debug!("Venue not found: id={}", id);
    }

    Ok(venue)
}

/// Overwrites every column of the venue. Returns `None` when no row matched.
pub async fn update_venue(
    conn: &mut PgConnection,
    id: i64,
    form: &VenueForm,
) -> Result<Option<DbVenue>> {
    let venue = sqlx::query_as::<_, DbVenue>(
        r#"
        UPDATE venues
        SET name = $2, city = $3, state = $4, address = $5, phone = $6,
            image_link = $7, facebook_link = $8, website_link = $9,
            seeking_talent = $10, seeking_description = $11
        WHERE id = $1
        RETURNING id, name, city, state, address, phone, image_link,
                  facebook_link, website_link, seeking_talent, seeking_description
        "#,
    )
    .bind(id)
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.address)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&form.facebook_link)
    .bind(&form.website_link)
    .bind(form.seeking_talent)
    .bind(&form.seeking_description)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(venue)
}

/// Shows and genre associations go with the venue through `ON DELETE CASCADE`.
pub async fn delete_venue(conn: &mut PgConnection, id: i64) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM venues
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_venues(conn: &mut PgConnection, now: DateTime<Utc>) -> Result<Vec<DbListedVenue>> {
    let venues = sqlx::query_as::<_, DbListedVenue>(
        r#"
        SELECT v.id, v.name, v.city, v.state,
               COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        GROUP BY v.id
        ORDER BY v.id ASC
        "#,
    )
    .bind(now)
    .fetch_all(&mut *conn)
    .await?;

    Ok(venues)
}

/// `pattern` is an `ILIKE` pattern, see [`super::contains_pattern`].
pub async fn search_venues(
    conn: &mut PgConnection,
    pattern: &str,
    now: DateTime<Utc>,
) -> Result<Vec<DbEntitySummary>> {
    let venues = sqlx::query_as::<_, DbEntitySummary>(
        r#"
        SELECT v.id, v.name,
               COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id
        WHERE v.name ILIKE $1
        GROUP BY v.id
        ORDER BY v.id ASC
        "#,
    )
    .bind(pattern)
    .bind(now)
    .fetch_all(&mut *conn)
    .await?;

    Ok(venues)
}

pub async fn get_venue_shows(
    conn: &mut PgConnection,
    venue_id: i64,
) -> Result<Vec<DbArtistAppearance>> {
    let shows = sqlx::query_as::<_, DbArtistAppearance>(
        r#"
        SELECT a.id AS artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link, s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = $1
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(venue_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(shows)
}
