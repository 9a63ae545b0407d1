use crate::errors::CoreError;
use crate::models::LogFile;
use std::path::Path;

/// Read a whole log file into memory, unmodified.
///
/// Content that is not valid UTF-8 is rejected rather than re-encoded,
/// since it could not travel verbatim inside a JSON string.
pub fn read_log_file(path: &Path) -> Result<LogFile, CoreError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Io(format!("reading {}: {e}", path.display())))?;
    Ok(LogFile {
        path: path.to_path_buf(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_content_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.log");
        let raw = "Jan 1 sshd[1]: Failed password\r\n\tbell:\x07 nul:\0 \u{1b}[31m\n";
        std::fs::write(&path, raw).unwrap();

        let log = read_log_file(&path).unwrap();
        assert_eq!(log.path, path);
        assert_eq!(log.content.as_bytes(), raw.as_bytes());
    }

    #[test]
    fn test_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.log");
        std::fs::write(&path, "").unwrap();
        assert_eq!(read_log_file(&path).unwrap().content, "");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.log");
        match read_log_file(&path) {
            Err(CoreError::Io(msg)) => assert!(msg.contains("gone.log")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.log");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();
        assert!(matches!(read_log_file(&path), Err(CoreError::Io(_))));
    }
}
