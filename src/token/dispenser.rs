//! Token dispenser client
//!
//! The dispenser is an external HTTP service answering a plain GET with a
//! plain-text body: either one of the sentinel error strings, or the
//! `"<token> <gsf_id>"` pair. The sentinels are terminal conditions with
//! their own exit codes, not retryable failures.

use std::time::Duration;

use reqwest::blocking::Client;

use super::CachedToken;
use crate::error::{PlayfetchError, Result};

const DISPENSER_TIMEOUT: Duration = Duration::from_secs(30);

/// Ask the dispenser for a fresh token pair
pub fn fetch(url: &str, proxy: Option<&str>) -> Result<CachedToken> {
    let mut builder = Client::builder().timeout(DISPENSER_TIMEOUT);
    if let Some(proxy_url) = proxy {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
            PlayfetchError::ConfigInvalid {
                message: format!("invalid https_proxy '{proxy_url}': {e}"),
            }
        })?;
        builder = builder.proxy(proxy);
    }
    let client = builder.build().map_err(|e| PlayfetchError::DispenserUnreachable {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let body = client
        .get(url)
        .send()
        .and_then(|resp| resp.text())
        .map_err(|e| PlayfetchError::DispenserUnreachable {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    parse_body(&body)
}

/// Classify a dispenser response body
///
/// Exactly `"Auth error"` and `"Server error"` are the dispenser's sentinel
/// failure bodies; anything else must split into exactly two whitespace
/// separated fields, `<token> <gsf_id>`.
pub fn parse_body(body: &str) -> Result<CachedToken> {
    match body {
        "Auth error" => Err(PlayfetchError::DispenserAuthRefused),
        "Server error" => Err(PlayfetchError::DispenserServerError),
        other => {
            let mut fields = other.split_whitespace();
            match (fields.next(), fields.next(), fields.next()) {
                (Some(token), Some(gsf_id), None) => Ok(CachedToken::new(token, gsf_id)),
                _ => Err(PlayfetchError::DispenserMalformed {
                    body: other.to_string(),
                }),
            }
        }
    }
}
