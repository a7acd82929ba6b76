//! Search command implementation

use console::Style;

use crate::catalog::{self, SearchMatch};
use crate::error::Result;
use crate::output;
use crate::session::Session;

/// Query the catalog and print the matching entries
pub fn run(session: &mut Session, query: &str, number: usize, free_only: bool) -> Result<()> {
    let entries = catalog::search(session, query, number, free_only)?;
    if entries.is_empty() {
        println!("No result");
        return Ok(());
    }

    output::print_search_results(&entries);

    if let SearchMatch::Found(entry) = catalog::exact_match(query, &entries) {
        println!(
            "{} {} (version code {})",
            Style::new().dim().apply_to("Exact match:"),
            entry.app_id,
            entry.version
        );
    }
    Ok(())
}
