// SPDX-FileCopyrightText: 2026 Bindery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Targeted config-file updates using `toml_edit`, so comments, ordering, and
//! unrelated keys survive a save.

use std::io::Write;
use std::path::Path;

use bindery_core::BinderyError;
use toml_edit::{DocumentMut, Item, Table};

/// Sets `plugins.enabled.<key> = "<value>"` in the TOML file at `path`.
///
/// A missing file (and its parent directory) is created. The file is
/// replaced atomically so a crash mid-save never leaves a truncated config.
pub fn write_enabled_list(path: &Path, key: &str, value: &str) -> Result<(), BinderyError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(persistence_error(
                format!("failed to read config file {}", path.display()),
                e,
            ));
        }
    };

    let mut doc: DocumentMut = content.parse().map_err(|e| {
        persistence_error(format!("failed to parse config file {}", path.display()), e)
    })?;

    let plugins = doc
        .as_table_mut()
        .entry("plugins")
        .or_insert_with(implicit_table)
        .as_table_like_mut()
        .ok_or_else(|| BinderyError::Persistence {
            message: format!("`plugins` in {} is not a table", path.display()),
            source: None,
        })?;
    let enabled = plugins
        .entry("enabled")
        .or_insert(Item::Table(Table::new()))
        .as_table_like_mut()
        .ok_or_else(|| BinderyError::Persistence {
            message: format!("`plugins.enabled` in {} is not a table", path.display()),
            source: None,
        })?;
    enabled.insert(key, toml_edit::value(value));

    write_atomically(path, &doc.to_string())
}

fn implicit_table() -> Item {
    let mut table = Table::new();
    table.set_implicit(true);
    Item::Table(table)
}

fn write_atomically(path: &Path, content: &str) -> Result<(), BinderyError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| {
        persistence_error(format!("failed to create config directory {}", dir.display()), e)
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| persistence_error("failed to create temporary config file".to_string(), e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| persistence_error("failed to write temporary config file".to_string(), e))?;
    tmp.persist(path).map_err(|e| {
        persistence_error(format!("failed to replace config file {}", path.display()), e)
    })?;
    Ok(())
}

fn persistence_error(
    message: String,
    source: impl std::error::Error + Send + Sync + 'static,
) -> BinderyError {
    BinderyError::Persistence {
        message: format!("{message}: {source}"),
        source: Some(Box::new(source)),
    }
}
