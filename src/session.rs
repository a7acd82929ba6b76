//! Session establishment and token lifecycle
//!
//! A [`Session`] is the explicit context threaded through catalog
//! operations: the parsed configuration, the logged-in store client and the
//! current token pair. Token state moves `NoToken -> TokenCached -> LoggedIn`;
//! any detected authentication failure forces a refresh back through
//! `TokenCached`, at most once per operation.

use crate::config::Config;
use crate::credentials;
use crate::error::{PlayfetchError, Result, auth_expired, config_invalid};
use crate::market::{DEFAULT_MARKET_URL, MarketClient};
use crate::token::{CachedToken, cache, dispenser};

/// Logged-in session context
#[derive(Debug)]
pub struct Session {
    config: Config,
    client: MarketClient,
    token: Option<CachedToken>,
    verbose: bool,
}

impl Session {
    /// Build the store client and log in, refreshing the token once if the
    /// first attempt fails with an authentication classification.
    pub fn connect(config: Config, verbose: bool) -> Result<Self> {
        let base_url = config
            .market_url
            .clone()
            .unwrap_or_else(|| DEFAULT_MARKET_URL.to_string());
        let client = MarketClient::new(
            &base_url,
            &config.device_codename,
            config.https_proxy.as_deref(),
        )?;

        let mut session = Session {
            config,
            client,
            token: None,
            verbose,
        };
        session.login()?;
        Ok(session)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &MarketClient {
        &self.client
    }

    /// Return the cached pair, or ask the dispenser for a fresh one.
    ///
    /// A freshly dispensed pair is kept in memory and persisted to the
    /// token cache file before being returned.
    pub fn retrieve_token(&mut self, force_new: bool) -> Result<CachedToken> {
        if !force_new {
            let cached = self
                .token
                .clone()
                .or_else(|| cache::read(&self.config.token_cache_file));
            if let Some(pair) = cached {
                self.log("Using cached token.");
                self.token = Some(pair.clone());
                return Ok(pair);
            }
        }

        self.log("Retrieving token ...");
        let url = self
            .config
            .token_url
            .as_deref()
            .ok_or_else(|| config_invalid("missing 'token_url' in [Credentials] section"))?;
        let pair = dispenser::fetch(url, self.config.https_proxy.as_deref())?;
        cache::write(&self.config.token_cache_file, &pair)?;
        self.token = Some(pair.clone());
        Ok(pair)
    }

    /// Force a fresh token and log in again with it.
    ///
    /// This is the one bounded recovery step; an authentication failure on
    /// the re-login is terminal.
    pub fn refresh(&mut self) -> Result<()> {
        self.log("Token has expired or is invalid. Retrieving a new one...");
        self.login_with_token(true).map_err(fatal_if_auth)
    }

    fn login(&mut self) -> Result<()> {
        let first_attempt = if self.config.token_enable {
            self.log("Using token to connect to the store");
            self.login_with_token(false)
        } else {
            self.log("Using credentials to connect to the store");
            self.login_with_credentials()
        };

        match first_attempt {
            Err(e) if e.is_auth_failure() => self.refresh(),
            other => other,
        }
    }

    fn login_with_token(&mut self, force_new: bool) -> Result<()> {
        let pair = self.retrieve_token(force_new)?;
        let gsf_id = decode_gsf_id(&pair.gsf_id)?;
        self.client.login_with_token(&pair.token, gsf_id)
    }

    fn login_with_credentials(&mut self) -> Result<()> {
        let email = self
            .config
            .gmail_address
            .clone()
            .ok_or_else(|| config_invalid("missing 'gmail_address' in [Credentials] section"))?;
        let password = credentials::resolve_password(&self.config)?.ok_or_else(|| {
            config_invalid("no password available: set gmail_password or keyring_service")
        })?;
        self.client.login_with_credentials(&email, &password)
    }

    fn log(&self, message: &str) {
        if self.verbose {
            eprintln!("{message}");
        }
    }
}

/// Run an operation against the session, refreshing credentials and
/// retrying exactly once when it fails with an authentication
/// classification. Anything else propagates untouched.
pub fn with_auth_retry<T, F>(session: &mut Session, mut op: F) -> Result<T>
where
    F: FnMut(&Session) -> Result<T>,
{
    match op(session) {
        Err(e) if e.is_auth_failure() => {
            session.refresh()?;
            op(session)
        }
        other => other,
    }
}

/// Decode the hexadecimal gsf id; an undecodable one classifies as an
/// authentication failure so it forces a refresh like an expired token
fn decode_gsf_id(gsf_id: &str) -> Result<u64> {
    u64::from_str_radix(gsf_id, 16)
        .map_err(|e| auth_expired(format!("invalid gsf id '{gsf_id}': {e}")))
}

/// A second consecutive authentication failure means we cannot log in at all
fn fatal_if_auth(err: PlayfetchError) -> PlayfetchError {
    if err.is_auth_failure() {
        PlayfetchError::LoginFailed {
            reason: err.to_string(),
        }
    } else {
        err
    }
}
