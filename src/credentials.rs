//! Account password resolution
//!
//! The password for credentials-mode login comes from the plaintext config
//! key when present, otherwise from the OS credential store named by
//! `keyring_service`. The store backend is a compile-time capability behind
//! the `keyring` cargo feature; asking for it in a build without the
//! capability is a fatal configuration error with its own exit code, not a
//! generic failure.

use crate::config::Config;
use crate::error::{Result, config_invalid};

/// Resolve the account password, or `None` when neither source is configured
pub fn resolve_password(config: &Config) -> Result<Option<String>> {
    if let Some(password) = &config.gmail_password {
        return Ok(Some(password.clone()));
    }
    if let Some(service) = &config.keyring_service {
        let account = config
            .gmail_address
            .as_deref()
            .ok_or_else(|| config_invalid("keyring_service requires gmail_address"))?;
        return keyring_password(service, account).map(Some);
    }
    Ok(None)
}

#[cfg(feature = "keyring")]
fn keyring_password(service: &str, account: &str) -> Result<String> {
    use crate::error::PlayfetchError;

    let entry = keyring::Entry::new(service, account).map_err(|e| {
        PlayfetchError::CredentialStoreFailed {
            service: service.to_string(),
            reason: e.to_string(),
        }
    })?;
    entry
        .get_password()
        .map_err(|e| PlayfetchError::CredentialStoreFailed {
            service: service.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(not(feature = "keyring"))]
fn keyring_password(service: &str, _account: &str) -> Result<String> {
    Err(crate::error::PlayfetchError::CredentialStoreUnavailable {
        service: service.to_string(),
    })
}
