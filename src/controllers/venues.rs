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
    forms::{FieldErrors, Form, VenueForm},
    middleware::Flashes,
    models::Venue,
    schedule,
    services::catalog::{self, Detail},
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/create", get(new_venue_form).post(create_venue))
        .route("/venues/{id}", get(show_venue))
}

#[derive(Debug, Serialize)]
pub struct VenueList {
    pub venues: Vec<Venue>,
}

// GET /venues
async fn list_venues(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
) -> AppResult<Page<VenueList>> {
    let venues = catalog::venues(&state.db).await?;
    Ok(Page::new(VenueList { venues }, flashes))
}

// GET /venues/{id}
async fn show_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    flashes: Flashes,
) -> AppResult<Page<Detail<Venue>>> {
    let id: i32 = id.parse().map_err(|_| AppError::not_found("venue", &id))?;

    let detail = catalog::venue_detail(&state.db, id, schedule::now())
        .await?
        .ok_or_else(|| AppError::not_found("venue", id))?;

    Ok(Page::new(detail, flashes))
}

// GET /venues/create
async fn new_venue_form(State(state): State<Arc<AppState>>) -> Response {
    form_page(
        &state,
        VenueForm::NAME,
        &VenueForm::default(),
        listing_choices(),
        FieldErrors::default(),
        Vec::new(),
        StatusCode::OK,
    )
}

// POST /venues/create
async fn create_venue(State(state): State<Arc<AppState>>, body: String) -> AppResult<Response> {
    let data = read_form(&body)?;
    let form = VenueForm::from_data(&data);

    Ok(submit_form(&state, &data, form, listing_choices(), |venue, id| {
        (
            format!("/venues/{}", id),
            format!("Venue '{}' was successfully listed!", venue.name),
        )
    })
    .await)
}
