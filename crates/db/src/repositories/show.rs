use crate::models::{DbShow, DbShowListing};
use eyre::Result;
use showbill_core::models::show::NewShow;
use sqlx::PgConnection;

/// Inserts the show as given. The foreign keys are the only check: a venue
/// or artist may be double-booked.
pub async fn create_show(conn: &mut PgConnection, show: &NewShow) -> Result<DbShow> {
    tracing::debug!(
        "Creating show: venue_id={}, artist_id={}, start_time={}",
        show.venue_id, show.artist_id, show.start_time
    );

    let show = sqlx::query_as::<_, DbShow>(
        r#"
        INSERT INTO shows (venue_id, artist_id, start_time)
        VALUES ($1, $2, $3)
        RETURNING id, venue_id, artist_id, start_time
        "#,
    )
    .bind(show.venue_id)
    .bind(show.artist_id)
    .bind(show.start_time)
    .fetch_one(&mut *conn)
    .await?;

    Ok(show)
}

pub async fn list_shows(conn: &mut PgConnection) -> Result<Vec<DbShowListing>> {
    let shows = sqlx::query_as::<_, DbShowListing>(
        r#"
        SELECT v.id AS venue_id, v.name AS venue_name,
               a.id AS artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(shows)
}
