//! Icon byte sources
//!
//! An icon comes either from a file, read lazily through an [`IconReader`],
//! or from a buffer copied at construction time.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use hyper::body::Bytes;

use super::error::FaviconError;

/// Where the icon bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// File on disk, read on first request
    Path(PathBuf),
    /// Bytes owned by the responder
    Buffer(Bytes),
}

impl IconSource {
    /// Copy `data` into a buffer source
    ///
    /// Later changes to the caller's buffer are not observed.
    pub fn buffer(data: &[u8]) -> Self {
        Self::Buffer(Bytes::copy_from_slice(data))
    }

    /// Interpret an untyped configuration value
    pub fn from_value(value: Option<&serde_json::Value>) -> Result<Self, FaviconError> {
        match value {
            None | Some(serde_json::Value::Null) => {
                Err(FaviconError::config("icon path is required"))
            }
            Some(serde_json::Value::String(path)) => Ok(Self::Path(PathBuf::from(path))),
            Some(other) => Err(FaviconError::config(format!(
                "icon path must be a string or byte buffer, got {}",
                value_kind(other)
            ))),
        }
    }
}

impl From<&str> for IconSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<&Path> for IconSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for IconSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<Vec<u8>> for IconSource {
    fn from(data: Vec<u8>) -> Self {
        Self::Buffer(Bytes::from(data))
    }
}

fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Resolve a configured path to an absolute regular file
pub(crate) fn resolve_file(path: &Path) -> Result<PathBuf, FaviconError> {
    if path.as_os_str().is_empty() {
        return Err(FaviconError::config("icon path is required"));
    }

    let path = std::path::absolute(path).map_err(|e| {
        FaviconError::config(format!("cannot resolve path '{}': {e}", path.display()))
    })?;

    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => Err(FaviconError::IsDirectory { path }),
        Ok(_) => Ok(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(FaviconError::NotFound { path }),
        Err(source) => Err(FaviconError::Read { path, source }),
    }
}

/// Supplies the raw bytes of a file-backed icon
///
/// Failures must keep their [`io::ErrorKind`] so a missing file stays
/// distinguishable.
pub trait IconReader: Send + Sync + 'static {
    fn read(&self, path: &Path) -> impl Future<Output = io::Result<Vec<u8>>> + Send;
}

/// Reads the icon from the file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl IconReader for FsReader {
    fn read(&self, path: &Path) -> impl Future<Output = io::Result<Vec<u8>>> + Send {
        tokio::fs::read(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_is_copied() {
        let mut data = vec![b'#'; 20];
        let source = IconSource::buffer(&data);
        data.fill(b'?');
        assert_eq!(source, IconSource::Buffer(Bytes::from(vec![b'#'; 20])));
    }

    #[test]
    fn test_from_value() {
        assert!(matches!(
            IconSource::from_value(None),
            Err(FaviconError::Config(_))
        ));
        assert!(matches!(
            IconSource::from_value(Some(&serde_json::Value::Null)),
            Err(FaviconError::Config(_))
        ));
        assert_eq!(
            IconSource::from_value(Some(&serde_json::json!("public/favicon.ico"))).unwrap(),
            IconSource::from("public/favicon.ico")
        );

        let err = IconSource::from_value(Some(&serde_json::json!(12))).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_resolve_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("favicon.ico");
        std::fs::write(&file, b"icon").unwrap();

        assert_eq!(resolve_file(&file).unwrap(), file);
        assert!(matches!(
            resolve_file(dir.path()),
            Err(FaviconError::IsDirectory { .. })
        ));
        assert!(matches!(
            resolve_file(&dir.path().join("nothing")),
            Err(FaviconError::NotFound { .. })
        ));
        assert!(matches!(
            resolve_file(Path::new("")),
            Err(FaviconError::Config(_))
        ));
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let resolved = resolve_file(Path::new("Cargo.toml")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("Cargo.toml"));
    }

    #[tokio::test]
    async fn test_fs_reader_keeps_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsReader.read(&dir.path().join("gone.ico")).await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
