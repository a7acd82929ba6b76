//! Catalog operations: search and download
//!
//! Thin façade over the store client. Both operations run through the
//! session's refresh-and-retry-once recovery; per-item failures come back
//! as values for the command layer to report, while session-establishment
//! and dispenser failures propagate as errors.

use std::fs;
use std::path::PathBuf;

use crate::error::{PlayfetchError, Result};
use crate::market::model::Doc;
use crate::market::{Delivery, SearchEntry};
use crate::session::{Session, with_auth_retry};

/// Outcome of looking up an exact package id among search results
#[derive(Debug, Clone, PartialEq)]
pub enum SearchMatch {
    Found(SearchEntry),
    NotFound,
}

/// Outcome of a download request
#[derive(Debug)]
pub enum DownloadOutcome {
    Done {
        path: PathBuf,
        /// Auxiliary files that could not be written; already-written files
        /// are not rolled back
        warnings: Vec<String>,
    },
    Failed {
        package: String,
        reason: String,
    },
}

/// Query the catalog and project the results
///
/// Paid entries are dropped when `free_only` is set. If the retried query
/// still fails with an authentication classification the result is an empty
/// set, not an error.
pub fn search(
    session: &mut Session,
    query: &str,
    limit: usize,
    free_only: bool,
) -> Result<Vec<SearchEntry>> {
    let docs = match with_auth_retry(session, |s| s.client().search(query, limit)) {
        Ok(docs) => docs,
        Err(e) if e.is_auth_failure() => Vec::new(),
        Err(e) => return Err(e),
    };
    Ok(project_docs(&docs, free_only))
}

/// Find the entry whose package id equals the query exactly
pub fn exact_match(query: &str, entries: &[SearchEntry]) -> SearchMatch {
    entries
        .iter()
        .find(|entry| entry.app_id == query)
        .cloned()
        .map_or(SearchMatch::NotFound, SearchMatch::Found)
}

/// Download a package and, when requested, its auxiliary expansion files
///
/// The primary artifact goes to `<folder>/<package>.apk`, each auxiliary
/// file to `<folder>/<type>.<versionCode>.<package>.obb`. A missing package
/// and other remote failures are one non-fatal failure kind, reported per
/// call.
pub fn download(
    session: &mut Session,
    package: &str,
    version: Option<u32>,
    include_additional: bool,
) -> Result<DownloadOutcome> {
    let folder = session.config().download_folder_path.clone();
    fs::create_dir_all(&folder)?;

    let fetched = with_auth_retry(session, |s| {
        let delivery = s.client().delivery(package, version)?;
        let data = s.client().fetch_artifact(&delivery.download_url)?;
        let additional = if include_additional {
            delivery
                .additional_files
                .iter()
                .map(|file| Ok((file.clone(), s.client().fetch_artifact(&file.download_url)?)))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };
        Ok((delivery, data, additional))
    });

    let (delivery, data, additional) = match fetched {
        Ok(parts) => parts,
        Err(e) if is_per_item_failure(&e) => {
            return Ok(DownloadOutcome::Failed {
                package: package.to_string(),
                reason: e.to_string(),
            });
        }
        Err(e) => return Err(e),
    };

    let apk_path = folder.join(format!("{package}.apk"));
    if let Err(e) = fs::write(&apk_path, &data) {
        return Ok(DownloadOutcome::Failed {
            package: package.to_string(),
            reason: PlayfetchError::FileWriteFailed {
                path: apk_path.display().to_string(),
                reason: e.to_string(),
            }
            .to_string(),
        });
    }

    let mut warnings = Vec::new();
    for (file, bytes) in additional {
        let obb_path = folder.join(obb_file_name(&file.file_type, file.version_code, &delivery));
        if let Err(e) = fs::write(&obb_path, &bytes) {
            warnings.push(format!("{}: {e}", obb_path.display()));
        }
    }

    Ok(DownloadOutcome::Done {
        path: apk_path,
        warnings,
    })
}

/// `<type>.<versionCode>.<package>.obb`
fn obb_file_name(file_type: &str, version_code: u32, delivery: &Delivery) -> String {
    format!("{file_type}.{version_code}.{}.obb", delivery.doc_id)
}

fn project_docs(docs: &[Doc], free_only: bool) -> Vec<SearchEntry> {
    docs.iter()
        .filter(|doc| !(free_only && doc.is_paid()))
        .map(SearchEntry::from_doc)
        .collect()
}

/// Remote failures that are reported per call instead of terminating the
/// process. A second auth failure lands here too: the session has already
/// spent its one refresh by then.
fn is_per_item_failure(err: &PlayfetchError) -> bool {
    matches!(
        err,
        PlayfetchError::PackageNotFound { .. }
            | PlayfetchError::MarketFailed { .. }
            | PlayfetchError::AuthExpired { .. }
    )
}
