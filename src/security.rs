//! Signing with the application secret key, used by flash cookies and
//! CSRF tokens.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Clone)]
pub struct Signer {
    secret: Arc<str>,
}

impl Signer {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }

    /// `payload.signature`; the payload must not contain a `.`.
    pub fn sign(&self, payload: &str) -> String {
        format!("{}.{}", payload, self.signature(payload))
    }

    /// Returns the payload when the signature matches.
    pub fn unsign<'a>(&self, token: &'a str) -> Option<&'a str> {
        let (payload, signature) = token.rsplit_once('.')?;
        constant_time_eq(signature.as_bytes(), self.signature(payload).as_bytes()).then_some(payload)
    }

    fn signature(&self, payload: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(payload.as_bytes());
        hasher.update(self.secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CsrfError {
    #[error("The CSRF token is missing.")]
    Missing,
    #[error("The CSRF token is invalid.")]
    Invalid,
    #[error("The CSRF token has expired.")]
    Expired,
}

/// Stateless form protection: a token is the signed issue time and stays
/// valid for `time_limit_secs`.
#[derive(Clone)]
pub struct Csrf {
    signer: Signer,
    enabled: bool,
    time_limit_secs: i64,
}

impl Csrf {
    pub fn new(signer: Signer, config: &SecurityConfig) -> Self {
        Self {
            signer,
            enabled: config.csrf_enabled,
            time_limit_secs: config.csrf_time_limit_secs,
        }
    }

    pub fn issue(&self, now: DateTime<Utc>) -> Option<String> {
        self.enabled
            .then(|| self.signer.sign(&now.timestamp().to_string()))
    }

    pub fn verify(&self, token: Option<&str>, now: DateTime<Utc>) -> Result<(), CsrfError> {
        if !self.enabled {
            return Ok(());
        }
        let token = token.filter(|t| !t.is_empty()).ok_or(CsrfError::Missing)?;
        let issued: i64 = self
            .signer
            .unsign(token)
            .and_then(|payload| payload.parse().ok())
            .ok_or(CsrfError::Invalid)?;

        let age = now.timestamp() - issued;
        if age > self.time_limit_secs {
            return Err(CsrfError::Expired);
        }
        // Issued in the future
        if age < 0 {
            return Err(CsrfError::Invalid);
        }
        Ok(())
    }
}
