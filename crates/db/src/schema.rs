use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS venues (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(120) NOT NULL,
        address VARCHAR(120) NOT NULL,
        phone VARCHAR(120) NOT NULL DEFAULT '',
        image_link VARCHAR(500) NULL,
        facebook_link VARCHAR(120) NULL,
        website_link VARCHAR(500) NULL,
        seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description VARCHAR(500) NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artists (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR NOT NULL,
        city VARCHAR(120) NOT NULL,
        state VARCHAR(120) NOT NULL,
        phone VARCHAR(120) NOT NULL DEFAULT '',
        image_link VARCHAR(500) NULL,
        website VARCHAR(500) NULL,
        facebook_link VARCHAR(120) NULL,
        seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
        seeking_description VARCHAR NULL
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS genres (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR NOT NULL UNIQUE
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS venue_genres (
        venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        genre_id BIGINT NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
        PRIMARY KEY (venue_id, genre_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS artist_genres (
        artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
        genre_id BIGINT NOT NULL REFERENCES genres(id) ON DELETE CASCADE,
        PRIMARY KEY (artist_id, genre_id)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS shows (
        id BIGSERIAL PRIMARY KEY,
        venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
        artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
        start_time TIMESTAMP WITH TIME ZONE NOT NULL
    );
    "#,
];

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_shows_venue_id ON shows(venue_id);",
    "CREATE INDEX IF NOT EXISTS idx_shows_artist_id ON shows(artist_id);",
    "CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time);",
    "CREATE INDEX IF NOT EXISTS idx_venue_genres_genre_id ON venue_genres(genre_id);",
    "CREATE INDEX IF NOT EXISTS idx_artist_genres_genre_id ON artist_genres(genre_id);",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Tables are created in dependency order so foreign keys resolve.
    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
