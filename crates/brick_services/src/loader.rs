//! JSON loaders for the tables macros read.

use crate::ServiceError;
use brick_core::{DefaultsTable, PatternRegistry};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ServiceError> {
    let text = fs::read_to_string(path).map_err(|source| ServiceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ServiceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `{ "Brick": { "width": 8, "height": 8 }, ... }`
pub fn load_defaults(path: &Path) -> Result<DefaultsTable, ServiceError> {
    let table: DefaultsTable = read_json(path)?;
    info!(path = %path.display(), things = table.len(), "loaded entity defaults");
    Ok(table)
}

/// `{ "BackRegular": { "width": 384, "entries": [["HillLarge", 0, 0], ...] } }`
pub fn load_patterns(path: &Path) -> Result<PatternRegistry, ServiceError> {
    let patterns: PatternRegistry = read_json(path)?;
    info!(path = %path.display(), patterns = patterns.len(), "loaded patterns");
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brick_core::{DefaultsProvider, ThingDefaults};
    use std::io::Write;

    fn file_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_defaults_table() {
        let file = file_with(r#"{ "Brick": { "width": 8, "height": 8 }, "Coin": { "width": 5, "height": 7 } }"#);
        let table = load_defaults(file.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.defaults_of("Coin"),
            Some(ThingDefaults { width: 5.0, height: 7.0 })
        );
    }

    #[test]
    fn loads_patterns() {
        let file = file_with(
            r#"{ "BackFence": { "width": 384, "entries": [["Fence", 96, 0, 24]] } }"#,
        );
        let patterns = load_patterns(file.path()).unwrap();
        let pattern = patterns.get("BackFence").unwrap();
        assert_eq!(pattern.entries[0].width, Some(24.0));
    }

    #[test]
    fn reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(matches!(
            load_defaults(&missing),
            Err(ServiceError::Io { path, .. }) if path == missing
        ));

        let file = file_with("{ not json");
        assert!(matches!(
            load_patterns(file.path()),
            Err(ServiceError::Parse { .. })
        ));
    }
}
