//! Submitted form data: decoding, field validation and conversion into
//! records ready for insertion.

pub mod artist;
pub mod choices;
pub mod show;
pub mod venue;

pub use artist::ArtistForm;
pub use show::ShowForm;
pub use venue::VenueForm;

use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use url::{Host, Url};
use validator::{ValidationError, ValidationErrors};

use crate::security::CsrfError;
use crate::services::submission::Record;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const INVALID_URL: &str = "Invalid URL.";

/// Messages per field name, sorted by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// Key/value pairs of an `application/x-www-form-urlencoded` body, in
/// submission order. Repeated keys carry multi-select values.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(body: &str) -> Result<Self, serde_urlencoded::de::Error> {
        Ok(Self {
            pairs: serde_urlencoded::from_str(body)?,
        })
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value as submitted, empty when the field is missing.
    pub fn text(&self, key: &str) -> String {
        self.first(key).unwrap_or_default().to_string()
    }

    /// Value as submitted, `None` when missing or blank.
    pub fn optional(&self, key: &str) -> Option<String> {
        Some(self.text(key)).filter(|v| !v.trim().is_empty())
    }

    /// Every non-blank value submitted under `key`.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.trim().is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Checkbox semantics: ticked unless absent, empty or `false`.
    pub fn flag(&self, key: &str) -> bool {
        match self.first(key).map(str::trim) {
            None | Some("") => false,
            Some(v) => !v.eq_ignore_ascii_case("false"),
        }
    }
}

/// A form that turns into a record once every field rule holds.
pub trait Form: Serialize {
    type Record: Record;

    /// Name used in form documents and logs.
    const NAME: &'static str;

    fn validate_record(&self) -> Result<Self::Record, FieldErrors>;
}

/// A form paired with the outcome of its CSRF token check. A bad token
/// rejects the submission like any other field error.
#[derive(Debug, Clone, Serialize)]
pub struct Protected<F> {
    #[serde(flatten)]
    pub form: F,
    #[serde(skip)]
    csrf: Result<(), CsrfError>,
}

impl<F> Protected<F> {
    pub fn new(form: F, csrf: Result<(), CsrfError>) -> Self {
        Self { form, csrf }
    }
}

impl<F: Form> Form for Protected<F> {
    type Record = F::Record;
    const NAME: &'static str = F::NAME;

    fn validate_record(&self) -> Result<F::Record, FieldErrors> {
        match (&self.csrf, self.form.validate_record()) {
            (Ok(()), result) => result,
            (Err(e), Ok(_)) => Err(FieldErrors::single("csrf_token", e.to_string())),
            (Err(e), Err(mut errors)) => {
                errors.add("csrf_token", e.to_string());
                Err(errors)
            }
        }
    }
}

// Field rules shared by the form structs

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub(crate) fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", REQUIRED));
    }
    Ok(())
}

pub(crate) fn us_state(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    if !choices::is_state(value) {
        return Err(field_error("choice", INVALID_CHOICE));
    }
    Ok(())
}

/// An absolute `http`/`https` link whose host is an IP address or a domain
/// with a top-level label.
pub(crate) fn web_url(value: &str) -> Result<(), ValidationError> {
    let invalid = || field_error("url", INVALID_URL);
    let url = Url::parse(value.trim()).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match url.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        Some(Host::Domain(domain)) if has_tld(domain) => Ok(()),
        _ => Err(invalid()),
    }
}

fn has_tld(domain: &str) -> bool {
    match domain.trim_end_matches('.').rsplit_once('.') {
        Some((name, tld)) => {
            !name.is_empty()
                && (tld.starts_with("xn--")
                    || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())))
        }
        None => false,
    }
}

pub(crate) fn genre_selection(genres: &[String]) -> Result<(), ValidationError> {
    if genres.is_empty() {
        return Err(field_error("required", REQUIRED));
    }
    if let Some(unknown) = genres.iter().find(|g| !choices::is_genre(g)) {
        return Err(field_error(
            "choice",
            format!("'{}' is not a valid choice for this field.", unknown),
        ));
    }
    Ok(())
}
