//! # JSON Data Files
//!
//! Whole-file load and save of a JSON collection.
//!
//! ## Load Path
//! ```text
//! load_json(path, default)
//!      │
//!      ├── file missing?  → create it with `default`, return `default`
//!      │
//!      ├── not valid JSON? → copy raw bytes to `<name>.bak`
//!      │                     reset file to `default`, return `default`
//!      │
//!      ├── JSON, wrong shape? → StoreError::Decode (file left untouched)
//!      │
//!      └── ok → records
//! ```
//!
//! Files are written pretty-printed (2-space indent) with non-ASCII text kept
//! literal, through a `<name>.tmp` sibling that is renamed into place.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Backup location for a corrupted file (`ventas.json` → `ventas.json.bak`).
pub fn backup_path(path: &Path) -> PathBuf {
    sibling(path, ".bak")
}

/// Serializes a collection the way the data files are written.
pub fn encode<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

async fn ensure_parent(path: &Path) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}

/// Writes raw bytes via a temp file and rename.
async fn write_bytes(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    ensure_parent(path).await?;
    let tmp = sibling(path, ".tmp");
    fs::write(&tmp, bytes)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

/// Overwrites `path` with the full serialized collection.
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> StoreResult<()> {
    let bytes = encode(path, value)?;
    write_bytes(path, &bytes).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "Saved data file");
    Ok(())
}

/// Loads the collection stored at `path`, creating or repairing the file.
pub async fn load_json<T>(path: &Path, default: T) -> StoreResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let exists = fs::try_exists(path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    if !exists {
        debug!(path = %path.display(), "Creating data file with default contents");
        save_json(path, &default).await?;
        return Ok(default);
    }

    let raw = fs::read(path).await.map_err(|e| StoreError::io(path, e))?;

    let value: serde_json::Value = match serde_json::from_slice(&raw) {
        Ok(value) => value,
        Err(parse_err) => {
            let backup = backup_path(path);
            warn!(
                path = %path.display(),
                backup = %backup.display(),
                error = %parse_err,
                "Data file is not valid JSON, backing up and resetting"
            );
            write_bytes(&backup, &raw).await?;
            save_json(path, &default).await?;
            return Ok(default);
        }
    };

    serde_json::from_value(value).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use inventa_core::{Money, Product};
    use tempfile::TempDir;

    fn product() -> Product {
        Product {
            id: 1,
            name: "Café de grano".to_string(),
            price: Money::from_cents(1050),
            stock: 5,
            cost: Money::from_cents(600),
            category: "Almacén".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_created_with_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("productos.json");

        let loaded: Vec<Product> = load_json(&path, Vec::new()).await.unwrap();
        assert!(loaded.is_empty());

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk.trim(), "[]");
    }

    #[tokio::test]
    async fn test_save_is_pretty_and_keeps_non_ascii() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("productos.json");

        save_json(&path, &vec![product()]).await.unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert!(on_disk.contains("\"nombre\": \"Café de grano\""));
        assert!(on_disk.contains("\n  {\n    \"id\": 1,"));
        assert!(!dir.path().join("productos.json.tmp").exists());

        let loaded: Vec<Product> = load_json(&path, Vec::new()).await.unwrap();
        assert_eq!(loaded, vec![product()]);
    }

    #[tokio::test]
    async fn test_corrupted_file_is_backed_up_and_reset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ventas.json");
        let garbage = b"[{\"id\": 1,, oops";
        std::fs::write(&path, garbage).unwrap();

        let loaded: Vec<Product> = load_json(&path, Vec::new()).await.unwrap();
        assert!(loaded.is_empty());

        let backup = std::fs::read(dir.path().join("ventas.json.bak")).unwrap();
        assert_eq!(backup, garbage);
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_an_error_and_file_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("productos.json");
        std::fs::write(&path, r#"[{"id": "uno"}]"#).unwrap();

        let err = load_json::<Vec<Product>>(&path, Vec::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"[{"id": "uno"}]"#
        );
        assert!(!backup_path(&path).exists());
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/data/ventas.json")),
            PathBuf::from("/data/ventas.json.bak")
        );
    }
}
