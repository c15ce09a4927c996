//! One-shot CLI commands that print JSON instead of serving.

use std::path::Path;

use anyhow::Context;
use devicetier_core::{classify, tier_table, EnvironmentSnapshot};

/// Classify a snapshot file, or the default snapshot when no path is given.
pub fn classify_command(path: Option<&Path>) -> anyhow::Result<String> {
    let snapshot = match path {
        Some(path) => EnvironmentSnapshot::from_path(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        None => EnvironmentSnapshot::default(),
    };
    Ok(serde_json::to_string_pretty(&classify(&snapshot))?)
}

pub fn tiers_command() -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&tier_table())?)
}

pub fn print_help() {
    println!("devicetier — device capability tier classifier");
    println!();
    println!("Usage: devicetier [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  classify [snapshot.json] Classify an environment snapshot");
    println!("  tiers                    Print every optimization level and its settings");
    println!("  help                     Show this help message");
}
