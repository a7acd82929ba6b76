//! Common test utilities for Playfetch integration tests

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use httpmock::MockServer;
use tempfile::TempDir;

/// A test environment: scratch directory plus a mock server standing in for
/// both the token dispenser and the store backend
pub struct TestEnv {
    /// Temporary directory for config, token cache and downloads
    pub temp: TempDir,
    /// Mock dispenser + store endpoints
    pub server: MockServer,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let server = MockServer::start();
        Self { temp, server }
    }

    /// Write a playfetch.conf wired to the mock server and return its path
    pub fn write_config(&self) -> PathBuf {
        let config = format!(
            "[Credentials]\n\
             token_url = {dispenser}\n\
             token = true\n\
             market_url = {market}\n\
             download_folder_path = {downloads}\n\
             [Cache]\n\
             token = {cache}\n",
            dispenser = self.server.url("/token"),
            market = self.server.url(""),
            downloads = self.download_dir().display(),
            cache = self.cache_file().display(),
        );
        let path = self.temp.path().join("playfetch.conf");
        fs::write(&path, config).expect("Failed to write config");
        path
    }

    pub fn cache_file(&self) -> PathBuf {
        self.temp.path().join("cache/token")
    }

    pub fn download_dir(&self) -> PathBuf {
        self.temp.path().join("downloads")
    }

    /// Seed the token cache file with a pair
    pub fn seed_cache(&self, token: &str, gsf_id: &str) {
        let path = self.cache_file();
        fs::create_dir_all(path.parent().expect("cache path has a parent"))
            .expect("Failed to create cache dir");
        fs::write(&path, format!("{token} {gsf_id}")).expect("Failed to seed cache");
    }

    /// Read the token cache file contents
    pub fn read_cache(&self) -> String {
        fs::read_to_string(self.cache_file()).expect("Failed to read cache file")
    }

    /// A catalog record for search responses
    pub fn doc(app_id: &str, title: &str, paid: bool) -> serde_json::Value {
        serde_json::json!({
            "docId": app_id,
            "title": title,
            "author": "someone",
            "installationSize": 47_453_132_u64,
            "numDownloads": "1,000,000+",
            "uploadDate": "2026-07-14",
            "versionCode": 42,
            "aggregateRating": { "starRating": 4.25 },
            "offer": [ { "checkoutFlowRequired": paid } ]
        })
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn playfetch_cmd() -> Command {
    Command::cargo_bin("playfetch").expect("binary under test")
}
