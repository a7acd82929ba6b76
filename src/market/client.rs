//! Blocking HTTP client for the store backend

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};

use super::model::{Delivery, Doc, LoginRequest, LoginResponse, SearchResponse};
use crate::error::{PlayfetchError, Result, auth_expired, market_failed, package_not_found};

/// Built-in store endpoint; overridable with the `market_url` config key
pub const DEFAULT_MARKET_URL: &str = "https://market.playfetch.dev/api";

const MARKET_TIMEOUT: Duration = Duration::from_secs(120);

/// Store client bound to a device identity
///
/// Holds the blocking HTTP client, the store base URL and, once logged in,
/// the session sub-token sent as a bearer header on catalog calls.
#[derive(Debug)]
pub struct MarketClient {
    http: Client,
    base_url: String,
    device_codename: String,
    sub_token: Option<String>,
}

impl MarketClient {
    pub fn new(base_url: &str, device_codename: &str, proxy: Option<&str>) -> Result<Self> {
        let mut builder = Client::builder().timeout(MARKET_TIMEOUT);
        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                PlayfetchError::ConfigInvalid {
                    message: format!("invalid https_proxy '{proxy_url}': {e}"),
                }
            })?;
            builder = builder.proxy(proxy);
        }
        let http = builder
            .build()
            .map_err(|e| market_failed(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            device_codename: device_codename.to_string(),
            sub_token: None,
        })
    }

    /// Log in with a dispensed token and the gsf id decoded from hex
    pub fn login_with_token(&mut self, token: &str, gsf_id: u64) -> Result<()> {
        let device = self.device_codename.clone();
        self.login(&LoginRequest::token(token, gsf_id, &device))
    }

    /// Log in with account credentials
    pub fn login_with_credentials(&mut self, email: &str, password: &str) -> Result<()> {
        let device = self.device_codename.clone();
        self.login(&LoginRequest::credentials(email, password, &device))
    }

    fn login(&mut self, request: &LoginRequest<'_>) -> Result<()> {
        let url = format!("{}/auth/login", self.base_url);
        let resp = self.http.post(&url).json(request).send()?;
        let resp = check_auth_status(resp)?;

        // A 200 that does not carry the session token is as unusable as a
        // rejected login; both force a token refresh upstream.
        let body: LoginResponse = resp
            .json()
            .map_err(|e| auth_expired(format!("malformed login response: {e}")))?;
        self.sub_token = Some(body.sub_token);
        Ok(())
    }

    /// Query the catalog
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<Doc>> {
        let url = format!("{}/catalog/search", self.base_url);
        let limit = limit.to_string();
        let resp = self
            .http
            .get(&url)
            .query(&[("q", query), ("n", limit.as_str())])
            .header("Authorization", self.bearer()?)
            .send()?;
        let resp = check_auth_status(resp)?;

        let body: SearchResponse = resp
            .json()
            .map_err(|e| market_failed(format!("malformed search response: {e}")))?;
        Ok(body.docs)
    }

    /// Resolve the delivery descriptor for a package, latest version when
    /// none is given
    pub fn delivery(&self, package: &str, version: Option<u32>) -> Result<Delivery> {
        let url = format!("{}/catalog/delivery", self.base_url);
        let mut request = self
            .http
            .get(&url)
            .query(&[("doc", package)])
            .header("Authorization", self.bearer()?);
        if let Some(vc) = version {
            request = request.query(&[("vc", vc.to_string())]);
        }
        let resp = request.send()?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(package_not_found(package));
        }
        let resp = check_auth_status(resp)?;

        resp.json()
            .map_err(|e| market_failed(format!("malformed delivery response: {e}")))
    }

    /// Fetch artifact bytes from a delivery URL (absolute, or relative to
    /// the store base)
    pub fn fetch_artifact(&self, url: &str) -> Result<Vec<u8>> {
        let absolute = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        };
        let resp = self
            .http
            .get(&absolute)
            .header("Authorization", self.bearer()?)
            .send()?;
        let resp = check_auth_status(resp)?;
        Ok(resp.bytes()?.to_vec())
    }

    fn bearer(&self) -> Result<String> {
        let token = self
            .sub_token
            .as_deref()
            .ok_or_else(|| auth_expired("not logged in"))?;
        Ok(format!("Bearer {token}"))
    }
}

/// Map HTTP status to the error taxonomy: 401/403 are auth failures, any
/// other non-success is a generic store failure
fn check_auth_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(auth_expired(format!("store answered HTTP {status}")));
    }
    let body = resp.text().unwrap_or_default();
    Err(market_failed(format!("HTTP {status}: {body}")))
}
