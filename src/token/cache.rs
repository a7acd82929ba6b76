//! On-disk token cache
//!
//! A single file holding one line, `"<token> <gsf_id>"`. Reads never fail:
//! a missing, empty or otherwise corrupt cache file is simply a cache miss,
//! and the pair is treated as absent. Writes surface their I/O errors.
//!
//! The file is read once at startup and overwritten whenever a fresh token
//! is dispensed. Concurrent invocations can race on it; that is an accepted
//! limitation, not a guarantee.

use std::fs;
use std::path::Path;

use super::CachedToken;
use crate::error::{PlayfetchError, Result};

/// Read the cached pair, or `None` on any read or parse failure
pub fn read(path: &Path) -> Option<CachedToken> {
    let content = fs::read_to_string(path).ok()?;
    let line = content.lines().next()?;
    let mut fields = line.split_whitespace();
    match (fields.next(), fields.next(), fields.next()) {
        (Some(token), Some(gsf_id), None) => Some(CachedToken::new(token, gsf_id)),
        _ => None,
    }
}

/// Persist the pair, creating the cache directory if absent and overwriting
/// any prior contents
pub fn write(path: &Path, pair: &CachedToken) -> Result<()> {
    if let Some(cache_dir) = path.parent() {
        fs::create_dir_all(cache_dir).map_err(|e| PlayfetchError::CacheWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
    }
    fs::write(path, format!("{} {}", pair.token, pair.gsf_id)).map_err(|e| {
        PlayfetchError::CacheWriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })
}
