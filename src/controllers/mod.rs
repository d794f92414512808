pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::{
    error::{is_integrity_violation, AppError, AppResult},
    flash::{self, Flash},
    forms::{
        choices::{GENRES, STATES},
        FieldErrors, Form, FormData, Protected,
    },
    middleware::Flashes,
    security::Signer,
    services::submission::{self, Outcome, Record},
    AppState,
};

pub const VALIDATION_FAILED: &str = "Form validation failed. Please check your input.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(home::routes())
        .merge(health::routes())
        .merge(venues::routes())
        .merge(artists::routes())
        .merge(shows::routes())
}

/* ---------- pages ---------- */

/// A JSON page carrying the notices of the previous request. Showing them
/// expires the flash cookie.
pub struct Page<T> {
    pub data: T,
    pub flashes: Flashes,
}

impl<T> Page<T> {
    pub fn new(data: T, flashes: Flashes) -> Self {
        Self { data, flashes }
    }
}

#[derive(Serialize)]
struct PageBody<'a, T> {
    #[serde(flatten)]
    data: &'a T,
    messages: &'a [Flash],
}

impl<T: Serialize> IntoResponse for Page<T> {
    fn into_response(self) -> Response {
        let mut response = Json(PageBody {
            data: &self.data,
            messages: &self.flashes.0,
        })
        .into_response();

        if !self.flashes.is_empty() {
            response
                .headers_mut()
                .append(header::SET_COOKIE, HeaderValue::from_static(flash::CLEAR_COOKIE));
        }
        response
    }
}

/* ---------- forms ---------- */

#[derive(Debug, Serialize)]
pub struct Choices {
    pub states: &'static [&'static str],
    pub genres: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct FormPage<'a, F> {
    pub form: &'static str,
    pub values: &'a F,
    pub errors: FieldErrors,
    pub choices: Option<Choices>,
    pub csrf_token: Option<String>,
    pub messages: Vec<Flash>,
}

/// Venue and artist forms offer state and genre choices; the show form has none.
pub(crate) fn listing_choices() -> Option<Choices> {
    Some(Choices {
        states: STATES,
        genres: GENRES,
    })
}

pub(crate) fn form_page<F: Serialize>(
    state: &AppState,
    name: &'static str,
    values: &F,
    choices: Option<Choices>,
    errors: FieldErrors,
    messages: Vec<Flash>,
    status: StatusCode,
) -> Response {
    let page = FormPage {
        form: name,
        values,
        errors,
        choices,
        csrf_token: state.csrf.issue(Utc::now()),
        messages,
    };
    (status, Json(page)).into_response()
}

pub(crate) fn read_form(body: &str) -> AppResult<FormData> {
    FormData::parse(body).map_err(|e| {
        AppError::Validation(FieldErrors::single(
            "form",
            format!("Body is not valid form data: {}", e),
        ))
    })
}

/// Runs a submission and turns its outcome into a response: a redirect with
/// a success notice, or the form again with errors and a danger notice.
pub(crate) async fn submit_form<F, C>(
    state: &AppState,
    data: &FormData,
    form: F,
    choices: Option<Choices>,
    on_commit: C,
) -> Response
where
    F: Form + Send + Sync,
    C: FnOnce(&F, i32) -> (String, String) + Send,
{
    let csrf = state.csrf.verify(data.first("csrf_token"), Utc::now());
    let form = Protected::new(form, csrf);

    match submission::submit(&state.db, &form).await {
        Outcome::Committed { id } => {
            let (location, message) = on_commit(&form.form, id);
            redirect_with_flash(&state.signer, &location, Flash::success(message))
        }
        Outcome::Rejected(errors) => form_page(
            state,
            F::NAME,
            &form.form,
            choices,
            errors,
            vec![Flash::danger(VALIDATION_FAILED)],
            StatusCode::UNPROCESSABLE_ENTITY,
        ),
        Outcome::RolledBack(e) => {
            let status = if is_integrity_violation(&e) {
                StatusCode::CONFLICT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            let message = format!(
                "An error occurred. {} could not be listed. {}",
                <F::Record as Record>::KIND,
                e
            );
            form_page(
                state,
                F::NAME,
                &form.form,
                choices,
                FieldErrors::default(),
                vec![Flash::danger(message)],
                status,
            )
        }
    }
}

fn redirect_with_flash(signer: &Signer, location: &str, notice: Flash) -> Response {
    let mut response = Redirect::to(location).into_response();

    match HeaderValue::from_str(&flash::set_cookie(signer, &[notice])) {
        Ok(cookie) => {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
        Err(e) => warn!("flash cookie dropped: {}", e),
    }
    response
}
