//! Text rendering of engine snapshots.
//!
//! Pure functions from a snapshot to the text printed after every change.

use std::fmt::Write;

use atlas_core::{DisplayConfig, Record};
use atlas_engine::Snapshot;

/// One country line: name, then capital and flag when enabled.
pub fn card(record: &Record, display: &DisplayConfig) -> String {
    let mut line = record.name.clone();
    if display.show_capital {
        if let Some(capital) = &record.capital {
            let _ = write!(line, ", {}", capital);
        }
    }
    if display.show_flag && !record.flag_url.is_empty() {
        let _ = write!(line, " <{}>", record.flag_url);
    }
    line
}

/// Render a full snapshot.
pub fn render(snapshot: &Snapshot, display: &DisplayConfig) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Countries List");
    if snapshot.loading {
        let _ = writeln!(out, "Loading countries...");
    }
    if let Some(notice) = &snapshot.notice {
        let _ = writeln!(out, "! {}", notice);
    }
    let _ = writeln!(out, "Search: {:?}", snapshot.query);

    let suggestions = &snapshot.view.suggestions;
    if !suggestions.is_empty() {
        let _ = writeln!(out, "Suggestions:");
        for (i, record) in suggestions.iter().take(display.max_suggestions).enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, record.name);
        }
        if suggestions.len() > display.max_suggestions {
            let _ = writeln!(
                out,
                "  ... and {} more",
                suggestions.len() - display.max_suggestions
            );
        }
    }

    let results = &snapshot.view.results;
    let _ = writeln!(out, "Results: {} of {}", results.len(), snapshot.dataset_len);
    if results.is_empty() && snapshot.dataset_len > 0 {
        let _ = writeln!(out, "  (no countries match)");
    }
    for record in results {
        let _ = writeln!(out, "  {}", card(record, display));
    }

    if snapshot.show_reset {
        let _ = writeln!(out, "[/reset] Cancel");
    }
    out
}
