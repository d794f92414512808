use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

use super::{form_page, listing_choices, read_form, submit_form, Page};
use crate::{
    error::{AppError, AppResult},
    forms::{ArtistForm, FieldErrors, Form},
    middleware::Flashes,
    models::Artist,
    schedule,
    services::catalog::{self, Detail},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/create", get(new_artist_form).post(create_artist))
        .route("/artists/{id}", get(show_artist))
}

#[derive(Debug, Serialize)]
pub struct ArtistList {
    pub artists: Vec<Artist>,
}

// GET /artists
async fn list_artists(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
) -> AppResult<Page<ArtistList>> {
    let artists = catalog::artists(&state.db).await?;
    Ok(Page::new(ArtistList { artists }, flashes))
}

// GET /artists/{id}
async fn show_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    flashes: Flashes,
) -> AppResult<Page<Detail<Artist>>> {
    let id: i32 = id.parse().map_err(|_| AppError::not_found("artist", &id))?;

    let detail = catalog::artist_detail(&state.db, id, schedule::now())
        .await?
        .ok_or_else(|| AppError::not_found("artist", id))?;

    Ok(Page::new(detail, flashes))
}

// GET /artists/create
async fn new_artist_form(State(state): State<Arc<AppState>>) -> Response {
    form_page(
        &state,
        ArtistForm::NAME,
        &ArtistForm::default(),
        listing_choices(),
        FieldErrors::default(),
        Vec::new(),
        StatusCode::OK,
    )
}

// POST /artists/create
async fn create_artist(State(state): State<Arc<AppState>>, body: String) -> AppResult<Response> {
    let data = read_form(&body)?;
    let form = ArtistForm::from_data(&data);

    Ok(submit_form(&state, &data, form, listing_choices(), |artist, id| {
        (
            format!("/artists/{}", id),
            format!("Artist '{}' was successfully listed!", artist.name),
        )
    })
    .await)
}
