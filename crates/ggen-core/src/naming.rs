use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Derive the receiver / local variable name for an entity type.
///
/// Names shorter than four bytes are lowercased entirely; longer names only get
/// their leading character lowercased, so internal capitals survive:
/// - `Web` → `web`
/// - `Ab` → `ab`
/// - `Files` → `files`
/// - `URLInfo` → `uRLInfo`
pub fn instance_identifier(entity: &str) -> String {
    if entity.len() < 4 {
        return entity.to_lowercase();
    }
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// File name of the generated source for an entity, e.g. `web_gen.go`.
pub fn output_file_name(entity: &str, extension: &str) -> String {
    format!("{}_gen.{extension}", instance_identifier(entity))
}

/// Whether `name` can be used as a package / identifier in the generated dialect.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Base name of a directory, used as the package generated files join.
pub fn package_from_dir(dir: &Path) -> Option<String> {
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(String::from)
}

/// Pick the package for generated files: an explicit name wins, otherwise the
/// base name of the directory the file is written into.
///
/// An explicit name must be a valid identifier. A directory-derived name is
/// used as-is, with a warning when it is not one.
pub fn resolve_package(explicit: Option<&str>, dir: &Path) -> Result<String, ConfigError> {
    if let Some(package) = explicit {
        if !is_valid_identifier(package) {
            return Err(ConfigError::InvalidPackage(package.to_string()));
        }
        log::debug!("using explicit package {package}");
        return Ok(package.to_string());
    }

    let dir = absolute_dir(dir);
    let package = package_from_dir(&dir)
        .ok_or_else(|| ConfigError::MissingPackage(dir.display().to_string()))?;
    if !is_valid_identifier(&package) {
        log::warn!(
            "package name {package:?} derived from {} is not a valid identifier",
            dir.display()
        );
    }
    log::debug!("using package {package} from {}", dir.display());
    Ok(package)
}

fn absolute_dir(dir: &Path) -> PathBuf {
    fs::canonicalize(dir)
        .or_else(|_| std::path::absolute(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
