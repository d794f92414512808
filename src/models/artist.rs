use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Artist {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl Artist {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(r#"SELECT * FROM artists ORDER BY name COLLATE "C", id"#)
            .fetch_all(conn)
            .await
    }

    pub async fn find(id: i32, conn: &mut PgConnection) -> Result<Option<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn latest(limit: i64, conn: &mut PgConnection) -> Result<Vec<Artist>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(
            "SELECT * FROM artists ORDER BY created_at DESC, id DESC LIMIT $1"
        )
        .bind(limit)
        .fetch_all(conn)
        .await
    }

    pub async fn insert(artist: &NewArtist, conn: &mut PgConnection) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO artists (
                name, city, state, phone, image_link, facebook_link,
                website_link, genres, seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(&artist.genres)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .fetch_one(conn)
        .await
    }

    // Cascades to the artist's shows
    pub async fn delete(id: i32, conn: &mut PgConnection) -> Result<bool, sqlx::Error> {
        sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map(|r| r.rows_affected() > 0)
    }
}
