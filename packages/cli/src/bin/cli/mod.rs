pub mod categories;
pub mod dashboard;
pub mod session;
pub mod tasks;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use taskflow_client::{EntityStore, Resource};

/// Table with the shared presets
pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Turn the error recorded by the last store operation into a command failure
pub fn check_store<R: Resource>(store: &EntityStore<R>) -> anyhow::Result<()> {
    match store.error() {
        Some(error) => Err(anyhow!(error.message)),
        None => Ok(()),
    }
}

/// Message for data that was fetched alongside the main listing and failed
pub fn store_warning<R: Resource>(store: &EntityStore<R>) -> Option<String> {
    store
        .error()
        .map(|error| format!("Warning: could not load {}: {}", R::COLLECTION, error.message))
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
