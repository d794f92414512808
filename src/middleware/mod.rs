use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::convert::Infallible;
use std::sync::Arc;

use crate::flash::{self, Flash};

/// Flash notices left by the previous request. A missing, tampered or
/// unreadable cookie yields no notices.
#[derive(Debug, Clone, Default)]
pub struct Flashes(pub Vec<Flash>);

impl Flashes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromRequestParts<Arc<crate::AppState>> for Flashes {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<crate::AppState>,
    ) -> Result<Self, Self::Rejection> {
        let flashes = parts
            .headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(flash::cookie_value)
            .and_then(|value| flash::decode(&state.signer, value))
            .unwrap_or_default();

        Ok(Flashes(flashes))
    }
}
