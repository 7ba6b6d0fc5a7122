//! Stateless CSRF tokens for the contact form.
//!
//! A token is `{issued_at}.{sig}` where `sig` is the URL-safe base64
//! HMAC-SHA256 of the decimal timestamp under the site secret. Pages embed a
//! fresh token; `POST /contact` accepts it until it is `ttl` old.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Tokens older than an hour are refused.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Tolerated clock skew for tokens stamped slightly in the future.
const MAX_SKEW_SECS: i64 = 60;

const MAX_TOKEN_LEN: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CsrfError {
    #[error("CSRF token missing")]
    Missing,
    #[error("CSRF token malformed")]
    Malformed,
    #[error("CSRF token signature mismatch")]
    BadSignature,
    #[error("CSRF token expired")]
    Expired,
}

#[derive(Clone)]
pub struct CsrfGuard {
    secret: Vec<u8>,
    ttl: Duration,
}

impl CsrfGuard {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            secret: secret.to_vec(),
            ttl,
        }
    }

    fn sign(&self, issued_at: i64) -> String {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(issued_at.to_string().as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    /// Token stamped with `now` (unix seconds).
    pub fn issue(&self, now: i64) -> String {
        format!("{}.{}", now, self.sign(now))
    }

    pub fn verify(&self, token: Option<&str>, now: i64) -> Result<(), CsrfError> {
        let token = token.map(str::trim).filter(|t| !t.is_empty());
        let Some(token) = token else {
            return Err(CsrfError::Missing);
        };
        if token.len() > MAX_TOKEN_LEN {
            return Err(CsrfError::Malformed);
        }
        let (stamp, sig) = token.split_once('.').ok_or(CsrfError::Malformed)?;
        let issued_at: i64 = stamp.parse().map_err(|_| CsrfError::Malformed)?;
        let sig = URL_SAFE_NO_PAD
            .decode(sig)
            .map_err(|_| CsrfError::Malformed)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| CsrfError::BadSignature)?;
        mac.update(issued_at.to_string().as_bytes());
        mac.verify_slice(&sig).map_err(|_| CsrfError::BadSignature)?;

        let age = now - issued_at;
        if age < -MAX_SKEW_SECS || age > self.ttl.as_secs() as i64 {
            return Err(CsrfError::Expired);
        }
        Ok(())
    }
}
