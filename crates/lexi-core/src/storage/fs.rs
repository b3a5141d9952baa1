//! Filesystem helpers shared by the stores.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Result};

/// Read and parse a JSON file, returning `Ok(None)` when it does not exist.
///
/// Read and parse failures are surfaced; callers that must tolerate a
/// corrupted file decide that themselves.
pub fn read_json_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Serialize `value` as pretty JSON and atomically replace `path` with it.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let serialized = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &serialized)
}

/// Delete `path`, reporting whether a file was actually removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(error.into()),
    }
}

/// List file stems in `dir` carrying the given extension.
///
/// A missing directory yields an empty list. In-flight temporary files end
/// in `.tmp` and are dropped by the extension filter. The result is sorted.
pub fn list_file_stems(dir: &Path, extension: &str) -> Result<Vec<String>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(error.into()),
    };

    let mut stems = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }
        stems.push(stem.to_string());
    }
    stems.sort();
    Ok(stems)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = temp_path_for(path)?;
    let written = File::create(&tmp_path).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(error) = written.and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error.into());
    }

    tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| Error::Storage(format!("invalid file path {}", path.display())))?;
    Ok(path.with_file_name(format!(".{file_name}.tmp")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn read_missing_file_is_none() {
        let tmp = tempdir().unwrap();
        let value: Option<Vec<String>> =
            read_json_optional(&tmp.path().join("missing.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn read_malformed_file_is_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let result: Result<Option<Vec<String>>> = read_json_optional(&path);
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn atomic_write_creates_parents_and_leaves_no_temp_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join("dir").join("value.json");
        write_json_atomic(&path, &vec!["a", "b"]).unwrap();

        let loaded: Option<Vec<String>> = read_json_optional(&path).unwrap();
        assert_eq!(loaded, Some(vec!["a".to_string(), "b".to_string()]));
        assert!(!path.with_file_name(".value.json.tmp").exists());
    }

    #[test]
    fn list_file_stems_filters_extension_and_temp_files() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("zebra.json"), "[]").unwrap();
        fs::write(tmp.path().join("apple.json"), "[]").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join(".apple.json.tmp"), "").unwrap();
        fs::write(tmp.path().join(".net.json"), "").unwrap();

        let stems = list_file_stems(tmp.path(), "json").unwrap();
        assert_eq!(
            stems,
            vec![".net".to_string(), "apple".to_string(), "zebra".to_string()]
        );
    }

    #[test]
    fn list_file_stems_of_missing_dir_is_empty() {
        let tmp = tempdir().unwrap();
        assert!(list_file_stems(&tmp.path().join("nope"), "json")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn remove_reports_whether_file_existed() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("gone.json");
        fs::write(&path, "[]").unwrap();
        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!remove_file_if_exists(&path).unwrap());
    }
}
