//! catalog.rs
//!
//! Read side of the listings: dashboard, lists and detail pages.
//!
//! Every function acquires a single pooled connection for all of its
//! queries and hands it back when it returns, on success or error.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::database::Database;
use crate::models::{Artist, Show, Venue};
use crate::schedule::{partition, Partition};

pub const LATEST_LIMIT: i64 = 5;
pub const UPCOMING_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub latest_venues: Vec<Venue>,
    pub latest_artists: Vec<Artist>,
    pub upcoming_shows: Vec<Show>,
}

/// A venue or artist with its shows split around the request time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail<T> {
    #[serde(flatten)]
    pub record: T,
    pub past_shows: Vec<Show>,
    pub upcoming_shows: Vec<Show>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl<T> Detail<T> {
    pub fn new(record: T, shows: Vec<Show>, now: NaiveDateTime) -> Self {
        let Partition { past, upcoming } = partition(shows, now);
        Detail {
            record,
            past_shows_count: past.len(),
            upcoming_shows_count: upcoming.len(),
            past_shows: past,
            upcoming_shows: upcoming,
        }
    }
}

pub async fn dashboard(db: &Database, now: NaiveDateTime) -> Result<Dashboard, sqlx::Error> {
    let mut conn = db.acquire().await?;

    Ok(Dashboard {
        latest_venues: Venue::latest(LATEST_LIMIT, &mut conn).await?,
        latest_artists: Artist::latest(LATEST_LIMIT, &mut conn).await?,
        upcoming_shows: Show::upcoming(now, UPCOMING_LIMIT, &mut conn).await?,
    })
}

pub async fn venues(db: &Database) -> Result<Vec<Venue>, sqlx::Error> {
    let mut conn = db.acquire().await?;
    Venue::list(&mut conn).await
}

pub async fn venue_detail(
    db: &Database,
    id: i32,
    now: NaiveDateTime,
) -> Result<Option<Detail<Venue>>, sqlx::Error> {
    let mut conn = db.acquire().await?;

    let Some(venue) = Venue::find(id, &mut conn).await? else {
        return Ok(None);
    };
    let shows = Show::for_venue(id, &mut conn).await?;

    Ok(Some(Detail::new(venue, shows, now)))
}

pub async fn artists(db: &Database) -> Result<Vec<Artist>, sqlx::Error> {
    let mut conn = db.acquire().await?;
    Artist::list(&mut conn).await
}

pub async fn artist_detail(
    db: &Database,
    id: i32,
    now: NaiveDateTime,
) -> Result<Option<Detail<Artist>>, sqlx::Error> {
    let mut conn = db.acquire().await?;

    let Some(artist) = Artist::find(id, &mut conn).await? else {
        return Ok(None);
    };
    let shows = Show::for_artist(id, &mut conn).await?;

    Ok(Some(Detail::new(artist, shows, now)))
}

pub async fn shows(db: &Database) -> Result<Vec<Show>, sqlx::Error> {
    let mut conn = db.acquire().await?;
    Show::list(&mut conn).await
}
