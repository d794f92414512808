use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Venue {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A venue that passed form validation and has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Venue {
    // Every venue ordered by location, then name
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Venue>, sqlx::Error> {
        sqlx::query_as::<_, Venue>(
            r#"
            SELECT * FROM venues
            ORDER BY city COLLATE "C", state COLLATE "C", name COLLATE "C", id
            "#
        )
        .fetch_all(conn)
        .await
    }

    pub async fn find(id: i32, conn: &mut PgConnection) -> Result<Option<Venue>, sqlx::Error> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    // Most recently listed first
    pub async fn latest(limit: i64, conn: &mut PgConnection) -> Result<Vec<Venue>, sqlx::Error> {
        sqlx::query_as::<_, Venue>(
            "SELECT * FROM venues ORDER BY created_at DESC, id DESC LIMIT $1"
        )
        .bind(limit)
        .fetch_all(conn)
        .await
    }

    /// Inserts the venue and returns its id. `created_at` is assigned by the
    /// database and never written again.
    pub async fn insert(venue: &NewVenue, conn: &mut PgConnection) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, image_link, facebook_link,
                website_link, genres, seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(&venue.genres)
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .fetch_one(conn)
        .await
    }

    /// Removes the venue; its shows go with it through `ON DELETE CASCADE`.
    /// No route exposes this.
    pub async fn delete(id: i32, conn: &mut PgConnection) -> Result<bool, sqlx::Error> {
        sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map(|r| r.rows_affected() > 0)
    }
}
