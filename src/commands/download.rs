//! Download command implementation

use std::time::Duration;

use indicatif::ProgressBar;

use crate::catalog::{self, DownloadOutcome};
use crate::error::Result;
use crate::session::Session;

/// Download a package to the configured folder and report the outcome
///
/// Per-item failures (missing package, remote failure) are printed and the
/// process still exits successfully; only session-level errors propagate.
pub fn run(session: &mut Session, package: &str, include_additional: bool) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Downloading {package} ..."));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = catalog::download(session, package, None, include_additional);
    spinner.finish_and_clear();

    match outcome? {
        DownloadOutcome::Done { path, warnings } => {
            for warning in warnings {
                eprintln!("Error while writing {package} : {warning}");
            }
            println!("Downloaded {package} to {}", path.display());
        }
        DownloadOutcome::Failed { package, reason } => {
            println!("Error while downloading {package} : {reason}");
        }
    }
    Ok(())
}
