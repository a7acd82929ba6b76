//! Store wire documents and their read-only projections

use serde::{Deserialize, Serialize};

/// Raw catalog record as returned by the store
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doc {
    pub doc_id: String,
    pub title: String,
    pub author: String,
    /// Installation size in bytes
    pub installation_size: u64,
    /// Formatted by the store ("1,000,000+"), passed through as-is
    pub num_downloads: String,
    pub upload_date: String,
    pub version_code: u32,
    pub aggregate_rating: Rating,
    #[serde(default)]
    pub offer: Vec<Offer>,
}

impl Doc {
    /// Whether downloading this record requires a checkout flow
    pub fn is_paid(&self) -> bool {
        self.offer.first().is_some_and(|o| o.checkout_flow_required)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub star_rating: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(default)]
    pub checkout_flow_required: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub docs: Vec<Doc>,
}

/// Delivery descriptor for one package version
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub doc_id: String,
    pub version_code: u32,
    pub download_url: String,
    #[serde(default)]
    pub additional_files: Vec<AdditionalFile>,
}

/// Auxiliary expansion file shipped alongside the main artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalFile {
    /// `main` or `patch`
    pub file_type: String,
    pub version_code: u32,
    pub download_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub sub_token: String,
}

/// Login request body; either the credentials pair or the token pair is set
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_sub_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gsf_id: Option<u64>,
    pub device: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn token(token: &'a str, gsf_id: u64, device: &'a str) -> Self {
        Self {
            email: None,
            password: None,
            auth_sub_token: Some(token),
            gsf_id: Some(gsf_id),
            device,
        }
    }

    pub fn credentials(email: &'a str, password: &'a str, device: &'a str) -> Self {
        Self {
            email: Some(email),
            password: Some(password),
            auth_sub_token: None,
            gsf_id: None,
            device,
        }
    }
}

/// Read-only projection of a catalog record for listing
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntry {
    pub title: String,
    pub creator: String,
    /// Human-readable installation size
    pub size: String,
    pub downloads: String,
    pub last_update: String,
    pub app_id: String,
    pub version: u32,
    pub rating: String,
    pub paid: bool,
}

impl SearchEntry {
    pub fn from_doc(doc: &Doc) -> Self {
        Self {
            title: doc.title.clone(),
            creator: doc.author.clone(),
            size: format_size(doc.installation_size),
            downloads: doc.num_downloads.clone(),
            last_update: doc.upload_date.clone(),
            app_id: doc.doc_id.clone(),
            version: doc.version_code,
            rating: format!("{:.2}", doc.aggregate_rating.star_rating),
            paid: doc.is_paid(),
        }
    }
}

/// Human-readable size, binary units
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 8] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB"];
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}YiB")
}
