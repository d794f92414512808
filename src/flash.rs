//! One-shot notices carried across a redirect in a signed cookie.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::security::Signer;

pub const COOKIE_NAME: &str = "fyyur_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: Category,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: Category::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: Category::Danger,
            message: message.into(),
        }
    }
}

pub fn encode(signer: &Signer, flashes: &[Flash]) -> String {
    let json = serde_json::to_vec(flashes).unwrap_or_default();
    signer.sign(&URL_SAFE_NO_PAD.encode(json))
}

/// `None` for anything not produced by [`encode`] with the same key.
pub fn decode(signer: &Signer, value: &str) -> Option<Vec<Flash>> {
    let payload = signer.unsign(value)?;
    let json = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&json).ok()
}

pub fn set_cookie(signer: &Signer, flashes: &[Flash]) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        COOKIE_NAME,
        encode(signer, flashes)
    )
}

/// `Set-Cookie` value expiring the flash cookie once it has been shown.
pub const CLEAR_COOKIE: &str = "fyyur_flash=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";

/// Finds the flash cookie in a `Cookie` request header value.
pub fn cookie_value(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_messages() {
        let signer = Signer::new("k");
        let flashes = vec![Flash::success("Venue 'The Fillmore' was successfully listed!")];

        let header = set_cookie(&signer, &flashes);
        let value = cookie_value(header.split(';').next().unwrap()).unwrap();

        assert_eq!(decode(&signer, value), Some(flashes));
    }

    #[test]
    fn tampered_cookie_is_ignored() {
        let signer = Signer::new("k");
        let value = encode(&signer, &[Flash::danger("x")]);

        assert_eq!(decode(&Signer::new("other"), &value), None);
        assert_eq!(decode(&signer, &format!("A{}", value)), None);
    }

    #[test]
    fn clear_cookie_targets_flash_cookie() {
        assert_eq!(cookie_value(CLEAR_COOKIE.split(';').next().unwrap()), Some(""));
    }

    #[test]
    fn finds_cookie_among_others() {
        assert_eq!(
            cookie_value("theme=dark; fyyur_flash=abc.def; lang=en"),
            Some("abc.def")
        );
        assert_eq!(cookie_value("theme=dark"), None);
    }
}
