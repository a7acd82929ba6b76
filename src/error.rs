//! Error types and handling for Playfetch
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Fatal errors bubble up to `main`, which prints them and terminates with
//! the exit code from [`PlayfetchError::exit_code`]. Per-item failures
//! (a search or download that did not pan out) are reported by the command
//! layer and do not terminate the process.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Playfetch operations
#[derive(Error, Diagnostic, Debug)]
pub enum PlayfetchError {
    // Configuration errors
    #[error("No configuration file found at {searched}")]
    #[diagnostic(
        code(playfetch::config::not_found),
        help("Create playfetch.conf in the current directory or in the user config directory")
    )]
    ConfigNotFound { searched: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(playfetch::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(playfetch::config::invalid))]
    ConfigInvalid { message: String },

    // Token cache errors (reads are swallowed by design; only writes surface)
    #[error("Failed to write token to cache file: {path}: {reason}")]
    #[diagnostic(code(playfetch::cache::write_failed))]
    CacheWriteFailed { path: String, reason: String },

    // Token dispenser errors
    #[error("Token dispenser auth error, probably too many connections")]
    #[diagnostic(
        code(playfetch::dispenser::auth_refused),
        help("Wait a while before asking this dispenser for another token, or use a different one")
    )]
    DispenserAuthRefused,

    #[error("Token dispenser server error")]
    #[diagnostic(code(playfetch::dispenser::server_error))]
    DispenserServerError,

    #[error("Token dispenser returned an unusable response: {body}")]
    #[diagnostic(
        code(playfetch::dispenser::malformed),
        help("Expected a '<token> <gsf_id>' body; check the token_url setting")
    )]
    DispenserMalformed { body: String },

    #[error("Could not reach token dispenser at {url}: {reason}")]
    #[diagnostic(code(playfetch::dispenser::unreachable))]
    DispenserUnreachable { url: String, reason: String },

    // Credential store errors
    #[error("Keyring service '{service}' requested but no keyring backend is available")]
    #[diagnostic(
        code(playfetch::credentials::store_unavailable),
        help("Rebuild with the 'keyring' feature enabled, or put the password in the config file")
    )]
    CredentialStoreUnavailable { service: String },

    #[error("Failed to read password from keyring service '{service}': {reason}")]
    #[diagnostic(code(playfetch::credentials::store_failed))]
    CredentialStoreFailed { service: String, reason: String },

    // Session errors
    #[error("Cannot log in to the store: {reason}")]
    #[diagnostic(
        code(playfetch::session::login_failed),
        help("The token was refreshed once and login still failed; check your credentials")
    )]
    LoginFailed { reason: String },

    // Market errors
    #[error("Store authentication failure: {reason}")]
    #[diagnostic(code(playfetch::market::auth_expired))]
    AuthExpired { reason: String },

    #[error("Package '{package}' does not exist, try to search it via --search before")]
    #[diagnostic(code(playfetch::market::package_not_found))]
    PackageNotFound { package: String },

    #[error("Store request failed: {message}")]
    #[diagnostic(code(playfetch::market::request_failed))]
    MarketFailed { message: String },

    // File system errors
    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(playfetch::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(playfetch::fs::io_error))]
    IoError { message: String },
}

impl PlayfetchError {
    /// Whether this error classifies as a store authentication failure.
    ///
    /// The session layer refreshes the token and retries exactly once when
    /// an operation fails with an auth classification.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, PlayfetchError::AuthExpired { .. })
    }

    /// Process exit code for this error.
    ///
    /// 5 = dispenser refused, 6 = dispenser server failure, 10 = keyring
    /// backend unavailable, 15 = cannot log in to the store, 1 = anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            PlayfetchError::DispenserAuthRefused => 5,
            PlayfetchError::DispenserServerError => 6,
            PlayfetchError::CredentialStoreUnavailable { .. } => 10,
            PlayfetchError::LoginFailed { .. } => 15,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for PlayfetchError {
    fn from(err: std::io::Error) -> Self {
        PlayfetchError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for PlayfetchError {
    fn from(err: reqwest::Error) -> Self {
        PlayfetchError::MarketFailed {
            message: err.to_string(),
        }
    }
}

/// Creates an auth-expired error
pub fn auth_expired(reason: impl Into<String>) -> PlayfetchError {
    PlayfetchError::AuthExpired {
        reason: reason.into(),
    }
}

/// Creates a package-not-found error
pub fn package_not_found(package: impl Into<String>) -> PlayfetchError {
    PlayfetchError::PackageNotFound {
        package: package.into(),
    }
}

/// Creates a generic store request failure
pub fn market_failed(message: impl Into<String>) -> PlayfetchError {
    PlayfetchError::MarketFailed {
        message: message.into(),
    }
}

/// Creates an invalid config error
pub fn config_invalid(message: impl Into<String>) -> PlayfetchError {
    PlayfetchError::ConfigInvalid {
        message: message.into(),
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PlayfetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlayfetchError::PackageNotFound {
            package: "org.mozilla.firefox".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Package 'org.mozilla.firefox' does not exist, try to search it via --search before"
        );
    }

    #[test]
    fn test_error_code() {
        let err = PlayfetchError::DispenserAuthRefused;
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("playfetch::dispenser::auth_refused".to_string())
        );
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(PlayfetchError::DispenserAuthRefused.exit_code(), 5);
        assert_eq!(PlayfetchError::DispenserServerError.exit_code(), 6);
        assert_eq!(
            PlayfetchError::CredentialStoreUnavailable {
                service: "playfetch".to_string()
            }
            .exit_code(),
            10
        );
        assert_eq!(
            PlayfetchError::LoginFailed {
                reason: "expired".to_string()
            }
            .exit_code(),
            15
        );
        assert_eq!(
            PlayfetchError::ConfigNotFound {
                searched: "playfetch.conf".to_string()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_auth_failure_classification() {
        assert!(auth_expired("token expired").is_auth_failure());
        assert!(!package_not_found("com.example.app").is_auth_failure());
        assert!(!market_failed("connection reset").is_auth_failure());
        assert!(!PlayfetchError::DispenserServerError.is_auth_failure());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlayfetchError = io_err.into();
        assert!(matches!(err, PlayfetchError::IoError { .. }));
    }

    #[test]
    fn test_constructor_helpers() {
        let err = config_invalid("missing token_url");
        assert!(matches!(err, PlayfetchError::ConfigInvalid { .. }));
        assert!(err.to_string().contains("missing token_url"));

        let err = market_failed("HTTP 502");
        assert!(matches!(err, PlayfetchError::MarketFailed { .. }));
    }
}
