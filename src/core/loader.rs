//! Docs directory loader
//!
//! Reads every `*.json` file in the docs directory into a map keyed by the
//! file name without its extension. Any file that fails to read or parse
//! aborts the load.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::models::errors::{AppError, AppResult};
use crate::utils::constants::doc_key;

/// Documents keyed by file stem, in ascending key order
pub type DocumentMap = BTreeMap<String, Value>;

/// Load all JSON documents from `dir`
pub fn load_docs(dir: &Path) -> AppResult<DocumentMap> {
    let entries = fs::read_dir(dir).map_err(|e| AppError::docs_dir_unreadable(dir, e))?;

    let mut docs = DocumentMap::new();
    let mut skipped = 0usize;

    for entry in entries {
        let entry = entry.map_err(|e| AppError::docs_dir_unreadable(dir, e))?;
        let path = entry.path();

        let file_name = entry.file_name();
        let Some(key) = file_name.to_str().and_then(doc_key) else {
            skipped += 1;
            continue;
        };

        // Follows symlinks, so linked doc files still count
        if !path.is_file() {
            skipped += 1;
            continue;
        }

        let raw = fs::read_to_string(&path).map_err(|e| AppError::docs_read_failed(&path, e))?;
        let doc: Value =
            serde_json::from_str(&raw).map_err(|e| AppError::docs_parse_failed(&path, e))?;

        debug!("📄 Loaded {} ({} bytes)", key, raw.len());
        docs.insert(key.to_string(), doc);
    }

    if docs.is_empty() {
        warn!("⚠️ No documents found in {}", dir.display());
    } else {
        info!(
            "📚 Loaded {} documents from {} ({} other entries ignored)",
            docs.len(),
            dir.display(),
            skipped
        );
    }

    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::errors::ErrorCode;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_loads_json_files_by_stem() {
        let dir = TempDir::new().unwrap();
        write(&dir, "meta.json", r#"{"workflow": {"phases": []}}"#);
        write(&dir, "nuclei.json", r#"{"service": "nuclei"}"#);

        let docs = load_docs(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs["meta"], json!({"workflow": {"phases": []}}));
        assert_eq!(docs["nuclei"], json!({"service": "nuclei"}));
    }

    #[test]
    fn test_ignores_other_files_and_dirs() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", "[1, 2]");
        write(&dir, "README.md", "# not a doc");
        write(&dir, "notes.json.bak", "{}");
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let docs = load_docs(dir.path()).unwrap();
        assert_eq!(docs.keys().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(docs["a"], json!([1, 2]));
    }

    #[test]
    fn test_keys_are_sorted() {
        let dir = TempDir::new().unwrap();
        write(&dir, "zeta.json", "{}");
        write(&dir, "alpha.json", "{}");
        write(&dir, "meta.json", "{}");

        let docs = load_docs(dir.path()).unwrap();
        assert_eq!(docs.keys().collect::<Vec<_>>(), vec!["alpha", "meta", "zeta"]);
    }

    #[test]
    fn test_empty_dir() {
        let dir = TempDir::new().unwrap();
        let docs = load_docs(dir.path()).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_missing_dir() {
        let dir = TempDir::new().unwrap();
        let err = load_docs(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DocsDirUnreadable);
    }

    #[test]
    fn test_invalid_json_names_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.json", "{ not json");

        let err = load_docs(dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DocsParseFailed);
        assert!(err.message.contains("broken.json"));
    }
}
