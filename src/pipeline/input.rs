//! Input resolution: normalise a user-supplied path or URL to `.docx` bytes.
//!
//! docx-rs parses from a byte slice, so unlike backends that require a
//! filesystem path there is no temp file involved: local files are read into
//! memory and URLs are downloaded straight into the buffer. The ZIP magic
//! bytes (`PK\x03\x04`) are validated before returning so callers get a
//! meaningful error rather than an opaque parser failure on, say, a `.doc`
//! or a renamed PDF.

use crate::error::AnalyzeError;
use std::path::PathBuf;
use tracing::{debug, info};

/// ZIP local-file-header magic; every `.docx` container starts with it.
const DOCX_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Check if the input string looks like a URL.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the input string to raw `.docx` bytes.
///
/// If the input is a URL, download it. If the input is a local file, read it,
/// distinguishing missing files from permission problems. Either way the ZIP
/// magic is validated before the bytes are returned.
pub async fn resolve_input(input: &str, timeout_secs: u64) -> Result<Vec<u8>, AnalyzeError> {
    if is_url(input) {
        download_url(input, timeout_secs).await
    } else {
        resolve_local(input)
    }
}

/// Read a local file, validating existence, permissions, and magic bytes.
fn resolve_local(path_str: &str) -> Result<Vec<u8>, AnalyzeError> {
    let path = PathBuf::from(path_str);

    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(AnalyzeError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(AnalyzeError::FileNotFound { path });
        }
    };

    check_magic(&bytes, path)?;
    debug!("Resolved local document: {path_str} ({} bytes)", bytes.len());
    Ok(bytes)
}

/// Download a URL into memory and validate the magic bytes.
async fn download_url(url: &str, timeout_secs: u64) -> Result<Vec<u8>, AnalyzeError> {
    info!("Downloading document from: {url}");

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AnalyzeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            AnalyzeError::DownloadTimeout {
                url: url.to_string(),
                secs: timeout_secs,
            }
        } else {
            AnalyzeError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !response.status().is_success() {
        return Err(AnalyzeError::DownloadFailed {
            url: url.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AnalyzeError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?
        .to_vec();

    check_magic(&bytes, PathBuf::from(url))?;
    info!("Downloaded {} bytes", bytes.len());
    Ok(bytes)
}

fn check_magic(bytes: &[u8], path: PathBuf) -> Result<(), AnalyzeError> {
    let mut magic = [0u8; 4];
    let len = bytes.len().min(4);
    magic[..len].copy_from_slice(&bytes[..len]);
    if magic != DOCX_MAGIC {
        return Err(AnalyzeError::NotADocx { path, magic });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/doc.docx"));
        assert!(is_url("http://example.com/doc.docx"));
        assert!(!is_url("/tmp/doc.docx"));
        assert!(!is_url("doc.docx"));
        assert!(!is_url(""));
    }

    #[test]
    fn magic_accepts_zip_header() {
        let bytes = [0x50, 0x4B, 0x03, 0x04, 0x00, 0x00];
        assert!(check_magic(&bytes, PathBuf::from("a.docx")).is_ok());
    }

    #[test]
    fn magic_rejects_plain_text() {
        let err = check_magic(b"Hello world", PathBuf::from("a.docx")).unwrap_err();
        assert!(matches!(err, AnalyzeError::NotADocx { .. }));
    }

    #[test]
    fn magic_rejects_short_input() {
        let err = check_magic(b"PK", PathBuf::from("a.docx")).unwrap_err();
        assert!(matches!(err, AnalyzeError::NotADocx { .. }));
    }

    #[tokio::test]
    async fn missing_local_file_is_file_not_found() {
        let err = resolve_input("/definitely/not/a/real/file.docx", 5)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::FileNotFound { .. }));
    }
}
