use crate::models::{DbArtist, DbArtistSummary, DbEntitySummary, DbVenueBooking};
use chrono::{DateTime, Utc};
use eyre::Result;
use showbill_core::forms::ArtistForm;
use sqlx::PgConnection;

pub async fn create_artist(conn: &mut PgConnection, form: &ArtistForm) -> Result<DbArtist> {
    tracing::debug!("Creating artist: name={}, city={}, state={}", form.name, form.city, form.state);

    let artist = sqlx::query_as::<_, DbArtist>(
        r#"
        INSERT INTO artists (
            name, city, state, phone, image_link, website,
            facebook_link, seeking_venue, seeking_description
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, name, city, state, phone, image_link, website,
                  facebook_link, seeking_venue, seeking_description
        "#,
    )
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&form.website_link)
    .bind(&form.facebook_link)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!("Artist created successfully: id={}", artist.id);
    Ok(artist)
}

pub async fn get_artist_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<DbArtist>> {
    let artist = sqlx::query_as::<_, DbArtist>(
        r#"
        SELECT id, name, city, state, phone, image_link, website,
               facebook_link, seeking_venue, seeking_description
        FROM artists
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    if artist.is_none() {
        tracing::debug!("Artist not found: id={}", id);
    }

    Ok(artist)
}

pub async fn update_artist(
    conn: &mut PgConnection,
    id: i64,
    form: &ArtistForm,
) -> Result<Option<DbArtist>> {
    let artist = sqlx::query_as::<_, DbArtist>(
        r#"
        UPDATE artists
        SET name = $2, city = $3, state = $4, phone = $5, image_link = $6,
            website = $7, facebook_link = $8, seeking_venue = $9,
            seeking_description = $10
        WHERE id = $1
        RETURNING id, name, city, state, phone, image_link, website,
                  facebook_link, seeking_venue, seeking_description
        "#,
    )
    .bind(id)
    .bind(&form.name)
    .bind(&form.city)
    .bind(&form.state)
    .bind(&form.phone)
    .bind(&form.image_link)
    .bind(&form.website_link)
    .bind(&form.facebook_link)
    .bind(form.seeking_venue)
    .bind(&form.seeking_description)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(artist)
}

pub async fn list_artists(conn: &mut PgConnection) -> Result<Vec<DbArtistSummary>> {
    let artists = sqlx::query_as::<_, DbArtistSummary>(
        r#"
        SELECT id, name
        FROM artists
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(artists)
}

pub async fn search_artists(
    conn: &mut PgConnection,
    pattern: &str,
    now: DateTime<Utc>,
) -> Result<Vec<DbEntitySummary>> {
    let artists = sqlx::query_as::<_, DbEntitySummary>(
        r#"
        SELECT a.id, a.name,
               COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id
        WHERE a.name ILIKE $1
        GROUP BY a.id
        ORDER BY a.id ASC
        "#,
    )
    .bind(pattern)
    .bind(now)
    .fetch_all(&mut *conn)
    .await?;

    Ok(artists)
}

pub async fn get_artist_shows(
    conn: &mut PgConnection,
    artist_id: i64,
) -> Result<Vec<DbVenueBooking>> {
    let shows = sqlx::query_as::<_, DbVenueBooking>(
        r#"
        SELECT v.id AS venue_id, v.name AS venue_name,
               v.image_link AS venue_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = $1
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(artist_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(shows)
}
