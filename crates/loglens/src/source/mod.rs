//! Source — file acquisition ahead of parsing.
//!
//! Rejects non-text extensions and empty content before the parser ever
//! sees the text. The parser itself treats empty input as zero entries.

mod error;

use std::fs;
use std::io;
use std::path::Path;

use crate::conf::SourceConfig;

pub use error::SourceError;

/// Read a log file into decoded text.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn load_log_file(path: &Path, config: &SourceConfig) -> Result<String, SourceError> {
    if !has_allowed_extension(path, &config.allowed_extensions) {
        return Err(SourceError::UnsupportedExtension(path.to_path_buf()));
    }

    let bytes = fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let text = String::from_utf8_lossy(&bytes).into_owned();
    if text.trim().is_empty() {
        return Err(SourceError::Empty(path.to_path_buf()));
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded log file");
    Ok(text)
}

pub fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path
    }

    #[test]
    fn test_loads_log_and_txt() {
        let dir = tempfile::tempdir().unwrap();
        let config = SourceConfig::default();

        let log = write_file(&dir, "app.log", b"INFO: started\n");
        assert_eq!(load_log_file(&log, &config).unwrap(), "INFO: started\n");

        let txt = write_file(&dir, "APP.TXT", b"ERROR: boom\n");
        assert!(load_log_file(&txt, &config).is_ok(), "extension check is case-insensitive");
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "image.png", b"\x89PNG");
        let err = load_log_file(&path, &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedExtension(_)));

        let no_ext = write_file(&dir, "README", b"hello");
        assert!(matches!(
            load_log_file(&no_ext, &SourceConfig::default()),
            Err(SourceError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.log");
        let err = load_log_file(&path, &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "blank.log", b"  \n\t\n");
        let err = load_log_file(&path, &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, SourceError::Empty(_)));
        assert!(err.to_string().contains("blank.log"));
    }

    #[test]
    fn test_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested.log");
        fs::create_dir(&path).unwrap();
        let err = load_log_file(&path, &SourceConfig::default()).unwrap_err();
        assert!(matches!(err, SourceError::Unreadable { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "mixed.log", b"ERROR: bad \xff byte\n");
        let text = load_log_file(&path, &SourceConfig::default()).unwrap();
        assert!(text.contains('\u{fffd}'));
    }
}
