use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

use super::{form_page, read_form, submit_form, Page};
use crate::{
    error::AppResult,
    forms::{FieldErrors, Form, ShowForm},
    middleware::Flashes,
    models::Show,
    schedule,
    services::catalog,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(new_show_form).post(create_show))
}

#[derive(Debug, Serialize)]
pub struct ShowList {
    pub shows: Vec<Show>,
}

// GET /shows
// Every show with its artist and venue, from one JOIN query
async fn list_shows(
    State(state): State<Arc<AppState>>,
    flashes: Flashes,
) -> AppResult<Page<ShowList>> {
    let shows = catalog::shows(&state.db).await?;
    Ok(Page::new(ShowList { shows }, flashes))
}

// GET /shows/create
async fn new_show_form(State(state): State<Arc<AppState>>) -> Response {
    form_page(
        &state,
        ShowForm::NAME,
        &ShowForm::blank(schedule::now()),
        None,
        FieldErrors::default(),
        Vec::new(),
        StatusCode::OK,
    )
}

// POST /shows/create
async fn create_show(State(state): State<Arc<AppState>>, body: String) -> AppResult<Response> {
    let data = read_form(&body)?;
    let form = ShowForm::from_data(&data);

    Ok(submit_form(&state, &data, form, None, |_, _| {
        ("/shows".to_string(), "Show was successfully listed!".to_string())
    })
    .await)
}

#[cfg(test)]
mod tests {
    use super::super::tests::{get, offline_state, post_form, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn blank_form_prefills_start_time() {
        let (status, json) = send(offline_state(&[]), get("/shows/create")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["form"], "show");
        assert_eq!(json["values"]["artist_id"], "");
        assert_eq!(json["values"]["start_time"].as_str().unwrap().len(), 19);
        assert!(json["choices"].is_null());
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let state = offline_state(&[("CSRF_ENABLED", "false")]);
        let (status, json) = send(state, post_form("/shows/create", "artist_id=1")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["errors"]["venue_id"].is_array());
        assert!(json["errors"]["start_time"].is_array());
        assert!(json["errors"]["artist_id"].is_null());
    }
}
