// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `bindery providers` command implementations.
//!
//! Lists the available metadata providers with their lifecycle state and
//! toggles them. Every toggle is persisted immediately through the
//! category's enabled-list store.

use std::io::IsTerminal;

use bindery_core::{BinderyError, PluginInfo, PluginStatus};
use bindery_metadata::MetadataProviderCategory;

/// Run `bindery providers list`.
pub fn run_list(
    category: &MetadataProviderCategory,
    json: bool,
    plain: bool,
) -> Result<(), BinderyError> {
    let infos = category.describe_available();

    if json {
        let out = serde_json::to_string_pretty(&infos)
            .map_err(|e| BinderyError::Internal(format!("failed to encode providers: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    let use_color = !plain && std::io::stdout().is_terminal();
    println!();
    println!("  bindery providers");
    println!("  {}", "-".repeat(50));
    if infos.is_empty() {
        println!("    (no providers available)");
    }
    for info in &infos {
        println!("{}", format_provider_line(info, use_color));
        if let Some(reason) = &info.last_error {
            println!("        last error: {reason}");
        }
    }
    println!();
    Ok(())
}

/// Run `bindery providers enable <name>`.
///
/// Construction failures are reported as errors and nothing is saved.
pub fn run_enable(category: &MetadataProviderCategory, name: &str) -> Result<(), BinderyError> {
    if !category.enable(name)? {
        let message = category
            .entry(name)
            .and_then(|entry| entry.describe().last_error)
            .unwrap_or_else(|| "construction failed".to_string());
        return Err(BinderyError::Enable {
            name: name.to_string(),
            message,
        });
    }
    let saved = category.save_to_config()?;
    println!("enabled {name} (enabled providers: {})", display_list(&saved));
    Ok(())
}

/// Run `bindery providers disable <name>`.
pub fn run_disable(category: &MetadataProviderCategory, name: &str) -> Result<(), BinderyError> {
    category.disable(name)?;
    let saved = category.save_to_config()?;
    println!("disabled {name} (enabled providers: {})", display_list(&saved));
    Ok(())
}

fn display_list(saved: &str) -> &str {
    if saved.is_empty() { "none" } else { saved }
}

fn format_provider_line(info: &PluginInfo, use_color: bool) -> String {
    let label = format!("{:<9}", info.status.to_string());
    let marker = if use_color {
        use colored::Colorize;
        match info.status {
            PluginStatus::Enabled => format!("{} {}", "✓".green(), label.green()),
            PluginStatus::Disabled => format!("{} {}", "-".dimmed(), label.dimmed()),
            PluginStatus::Failed => format!("{} {}", "✗".red(), label.red()),
        }
    } else {
        match info.status {
            PluginStatus::Enabled => format!("[ON]   {label}"),
            PluginStatus::Disabled => format!("[OFF]  {label}"),
            PluginStatus::Failed => format!("[FAIL] {label}"),
        }
    };
    format!(
        "    {marker} {:<16} {:<8} {} - {}",
        info.name, info.version, info.title, info.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(status: PluginStatus) -> PluginInfo {
        PluginInfo {
            name: "google".into(),
            title: "Google".into(),
            description: "A Google metadata provider".into(),
            version: "0.1.0".into(),
            enabled: status == PluginStatus::Enabled,
            status,
            last_error: None,
        }
    }

    #[test]
    fn plain_lines_show_status_and_identity() {
        let line = format_provider_line(&info(PluginStatus::Enabled), false);
        assert!(line.contains("[ON]"));
        assert!(line.contains("enabled"));
        assert!(line.contains("google"));
        assert!(line.contains("Google - A Google metadata provider"));

        let line = format_provider_line(&info(PluginStatus::Failed), false);
        assert!(line.contains("[FAIL] failed"));
    }

    #[test]
    fn empty_saved_list_reads_none() {
        assert_eq!(display_list(""), "none");
        assert_eq!(display_list("google"), "google");
    }
}
