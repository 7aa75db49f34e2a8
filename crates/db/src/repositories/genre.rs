use crate::models::DbGenre;
use eyre::Result;
use sqlx::PgConnection;

/// Returns the genre called `name`, creating it if needed.
///
/// A single statement, so two writers racing on a new name both end up with
/// the same row instead of one of them hitting the unique constraint.
pub async fn upsert_genre(conn: &mut PgConnection, name: &str) -> Result<DbGenre> {
    let genre = sqlx::query_as::<_, DbGenre>(
        r#"
        INSERT INTO genres (name)
        VALUES ($1)
        ON CONFLICT (name)
        DO UPDATE SET name = EXCLUDED.name
        RETURNING id, name
        "#,
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok(genre)
}

pub async fn list_genres(conn: &mut PgConnection) -> Result<Vec<DbGenre>> {
    let genres = sqlx::query_as::<_, DbGenre>(
        r#"
        SELECT id, name
        FROM genres
        ORDER BY name COLLATE "C" ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(genres)
}

pub async fn get_venue_genre_names(conn: &mut PgConnection, venue_id: i64) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT g.name
        FROM genres g
        JOIN venue_genres vg ON vg.genre_id = g.id
        WHERE vg.venue_id = $1
        ORDER BY g.name COLLATE "C" ASC
        "#,
    )
    .bind(venue_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(names)
}

pub async fn get_artist_genre_names(conn: &mut PgConnection, artist_id: i64) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        r#"
        SELECT g.name
        FROM genres g
        JOIN artist_genres ag ON ag.genre_id = g.id
        WHERE ag.artist_id = $1
        ORDER BY g.name COLLATE "C" ASC
        "#,
    )
    .bind(artist_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(names)
}

/// Replaces the venue's genre associations with exactly `names`.
pub async fn replace_venue_genres(
    conn: &mut PgConnection,
    venue_id: i64,
    names: &[String],
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM venue_genres
        WHERE venue_id = $1
        "#,
    )
    .bind(venue_id)
    .execute(&mut *conn)
    .await?;

    for name in names {
        let genre = upsert_genre(conn, name).await?;
        sqlx::query(
            r#"
            INSERT INTO venue_genres (venue_id, genre_id)
            VALUES ($1, $2)
            ON CONFLICT (venue_id, genre_id) DO NOTHING
            "#,
        )
        .bind(venue_id)
        .bind(genre.id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Replaces the artist's genre associations with exactly `names`.
pub async fn replace_artist_genres(
    conn: &mut PgConnection,
    artist_id: i64,
    names: &[String],
) -> Result<()> {
    sqlx::query(
        r#"
        DELETE FROM artist_genres
        WHERE artist_id = $1
        "#,
    )
    .bind(artist_id)
    .execute(&mut *conn)
    .await?;

    for name in names {
        let genre = upsert_genre(conn, name).await?;
        sqlx::query(
            r#"
            INSERT INTO artist_genres (artist_id, genre_id)
            VALUES ($1, $2)
            ON CONFLICT (artist_id, genre_id) DO NOTHING
            "#,
        )
        .bind(artist_id)
        .bind(genre.id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
