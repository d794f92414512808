use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow, PgConnection, Row};

use crate::schedule::Scheduled;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistSummary {
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub image_link: Option<String>,
}

/// A show together with the artist playing it and the venue hosting it.
/// Always loaded through a single JOIN, never by a lookup per row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Show {
    pub id: i32,
    pub start_time: NaiveDateTime,
    pub artist: ArtistSummary,
    pub venue: VenueSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewShow {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: NaiveDateTime,
}

impl Scheduled for Show {
    fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }
}

impl<'r> FromRow<'r, PgRow> for Show {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Show {
            id: row.try_get("id")?,
            start_time: row.try_get("start_time")?,
            artist: ArtistSummary {
                id: row.try_get("artist_id")?,
                name: row.try_get("artist_name")?,
                image_link: row.try_get("artist_image_link")?,
            },
            venue: VenueSummary {
                id: row.try_get("venue_id")?,
                name: row.try_get("venue_name")?,
                image_link: row.try_get("venue_image_link")?,
            },
        })
    }
}

// Shared SELECT with both joins; callers append WHERE / ORDER BY / LIMIT.
macro_rules! joined_shows {
    ($tail:literal) => {
        concat!(
            r#"
            SELECT
                s.id,
                s.start_time,
                a.id         AS artist_id,
                a.name       AS artist_name,
                a.image_link AS artist_image_link,
                v.id         AS venue_id,
                v.name       AS venue_name,
                v.image_link AS venue_image_link
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            JOIN venues  v ON v.id = s.venue_id
            "#,
            $tail
        )
    };
}

impl Show {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Show>, sqlx::Error> {
        sqlx::query_as::<_, Show>(joined_shows!("ORDER BY s.start_time, s.id"))
            .fetch_all(conn)
            .await
    }

    pub async fn for_venue(venue_id: i32, conn: &mut PgConnection) -> Result<Vec<Show>, sqlx::Error> {
        sqlx::query_as::<_, Show>(joined_shows!("WHERE s.venue_id = $1 ORDER BY s.start_time, s.id"))
            .bind(venue_id)
            .fetch_all(conn)
            .await
    }

    pub async fn for_artist(artist_id: i32, conn: &mut PgConnection) -> Result<Vec<Show>, sqlx::Error> {
        sqlx::query_as::<_, Show>(joined_shows!("WHERE s.artist_id = $1 ORDER BY s.start_time, s.id"))
            .bind(artist_id)
            .fetch_all(conn)
            .await
    }

    // Next shows starting at or after `from`
    pub async fn upcoming(
        from: NaiveDateTime,
        limit: i64,
        conn: &mut PgConnection,
    ) -> Result<Vec<Show>, sqlx::Error> {
        sqlx::query_as::<_, Show>(joined_shows!(
            "WHERE s.start_time >= $1 ORDER BY s.start_time, s.id LIMIT $2"
        ))
        .bind(from)
        .bind(limit)
        .fetch_all(conn)
        .await
    }

    /// Fails with a foreign key violation when either id has no row.
    pub async fn insert(show: &NewShow, conn: &mut PgConnection) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES ($1, $2, $3) RETURNING id"
        )
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.start_time)
        .fetch_one(conn)
        .await
    }
}
