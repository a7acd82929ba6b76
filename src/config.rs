//! Credentials file loading
//!
//! The configuration is an INI file with a `[Credentials]` section (account,
//! token dispenser, download folder) and a `[Cache]` section (token cache
//! file path). It is resolved once at startup from an explicit `-c` path or
//! from an ordered list of default locations, and stays immutable for the
//! process lifetime except for the download folder override from `-f`.

use std::path::{Path, PathBuf};

use ini::Ini;

use crate::error::{PlayfetchError, Result, config_invalid};

/// Configuration file name
pub const CONFIG_FILE: &str = "playfetch.conf";

/// Default device identity presented to the store
const DEFAULT_DEVICE_CODENAME: &str = "bacon";

/// Parsed credentials configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Account email for credentials-mode login
    pub gmail_address: Option<String>,
    /// Plaintext account password; the keyring service is consulted when absent
    pub gmail_password: Option<String>,
    /// Keyring service name for the password lookup
    pub keyring_service: Option<String>,
    /// Token dispenser URL
    pub token_url: Option<String>,
    /// Prefer token-mode login over account credentials
    pub token_enable: bool,
    /// Device codename the store client identifies as
    pub device_codename: String,
    /// Override for the built-in store endpoint
    pub market_url: Option<String>,
    /// Outbound proxy for dispenser and store calls
    pub https_proxy: Option<String>,
    /// Where downloaded artifacts are written
    pub download_folder_path: PathBuf,
    /// Token cache file path (`~` expanded)
    pub token_cache_file: PathBuf,
}

impl Config {
    /// Load the configuration from an explicit path, or probe the default
    /// locations: `./playfetch.conf`, `<config dir>/playfetch/playfetch.conf`,
    /// `/etc/playfetch/playfetch.conf`. The first existing file wins.
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(PlayfetchError::ConfigNotFound {
                        searched: path.display().to_string(),
                    });
                }
                path.to_path_buf()
            }
            None => find_default_config()?,
        };
        Config::from_file(&path)
    }

    fn from_file(path: &Path) -> Result<Config> {
        let ini = Ini::load_from_file(path).map_err(|e| PlayfetchError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let creds = ini.section(Some("Credentials"));
        let get = |key: &str| -> Option<String> {
            creds
                .and_then(|s| s.get(key))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let token_cache_file = ini
            .section(Some("Cache"))
            .and_then(|s| s.get("token"))
            .map(expand_home)
            .ok_or_else(|| config_invalid("missing 'token' key in [Cache] section"))?;

        Ok(Config {
            gmail_address: get("gmail_address"),
            gmail_password: get("gmail_password"),
            keyring_service: get("keyring_service"),
            token_url: get("token_url"),
            token_enable: get("token").is_none_or(|v| parse_bool(&v)),
            device_codename: get("device_codename")
                .unwrap_or_else(|| DEFAULT_DEVICE_CODENAME.to_string()),
            market_url: get("market_url"),
            https_proxy: get("https_proxy"),
            download_folder_path: get("download_folder_path")
                .map(|p| expand_home(&p))
                .unwrap_or_else(|| PathBuf::from(".")),
            token_cache_file,
        })
    }

    /// Override the download folder (the `-f` flag)
    pub fn set_download_folder(&mut self, folder: PathBuf) {
        self.download_folder_path = folder;
    }
}

/// Ordered default config locations
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("playfetch").join(CONFIG_FILE));
    }
    paths.push(Path::new("/etc/playfetch").join(CONFIG_FILE));
    paths
}

fn find_default_config() -> Result<PathBuf> {
    let candidates = candidate_paths();
    candidates
        .iter()
        .find(|p| p.is_file())
        .cloned()
        .ok_or_else(|| PlayfetchError::ConfigNotFound {
            searched: candidates
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Expand a leading `~/` to the user's home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "yes" | "on" | "1"
    )
}
