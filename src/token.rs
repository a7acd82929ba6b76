//! Token acquisition and persistence
//!
//! - [`cache`]: the on-disk `"<token> <gsf_id>"` pair
//! - [`dispenser`]: the HTTP token dispenser client

pub mod cache;
pub mod dispenser;

/// An auth token paired with the device/session identifier it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    /// Opaque auth token
    pub token: String,
    /// Hexadecimal device/session identifier (gsf id)
    pub gsf_id: String,
}

impl CachedToken {
    pub fn new(token: impl Into<String>, gsf_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            gsf_id: gsf_id.into(),
        }
    }
}
