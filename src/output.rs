//! Search result listing
//!
//! Column-aligned table output for catalog entries, with a styled header.

use console::Style;

use crate::market::SearchEntry;

const HEADERS: [&str; 9] = [
    "Title",
    "Creator",
    "Size",
    "Downloads",
    "Last Update",
    "AppId",
    "Version",
    "Rating",
    "Paid",
];

/// Print entries as an aligned table
pub fn print_search_results(entries: &[SearchEntry]) {
    let rows: Vec<[String; 9]> = entries.iter().map(row).collect();

    let mut widths: [usize; 9] = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let header = Style::new().bold();
    println!("{}", header.apply_to(format_row(&HEADERS.map(String::from), &widths)));
    for row in &rows {
        println!("{}", format_row(row, &widths));
    }
}

fn row(entry: &SearchEntry) -> [String; 9] {
    [
        entry.title.clone(),
        entry.creator.clone(),
        entry.size.clone(),
        entry.downloads.clone(),
        entry.last_update.clone(),
        entry.app_id.clone(),
        entry.version.to_string(),
        entry.rating.clone(),
        if entry.paid { "yes" } else { "no" }.to_string(),
    ]
}

fn format_row(cells: &[String; 9], widths: &[usize; 9]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
