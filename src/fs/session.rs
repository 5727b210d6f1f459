//! Transient session carry-over between the two wizard steps.
//!
//! When the user advances from the context step, the context fields are
//! written to `.postcraft/session.json` and the attachment bytes, if any,
//! to `.postcraft/session.blob` as base64. The content step consumes both
//! on submit: the files are read and then removed, so a session record is
//! used at most once.

use anyhow::{Context, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::api::Attachment;
use crate::fs::PostcraftPaths;

/// Context-step data carried over to the content step.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContextData {
    pub has_attachment: bool,
    pub attachment_name: Option<String>,
    pub profile_url: String,
    pub scrape_url: String,
    pub scrape_prompt: String,
}

/// Writes the session record, replacing any previous one.
///
/// The blob file is only written when an attachment is present; a stale
/// blob from an earlier session is removed either way.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot
/// be written.
pub fn save_session(
    paths: &PostcraftPaths,
    data: &ContextData,
    attachment: Option<&Attachment>,
) -> Result<()> {
    paths.ensure_postcraft_dir()?;

    let json = serde_json::to_string_pretty(data).context("Failed to serialize session data")?;
    std::fs::write(paths.session_file(), json).context("Failed to write session file")?;

    match attachment {
        Some(file) => {
            let encoded = BASE64.encode(&file.bytes);
            std::fs::write(paths.session_blob_file(), encoded)
                .context("Failed to write session attachment")?;
        }
        None => {
            remove_if_exists(&paths.session_blob_file())?;
        }
    }

    Ok(())
}

/// Reads and removes the session record.
///
/// Returns `None` when no session file exists. The attachment is decoded
/// back to bytes under the name recorded in the context data.
///
/// # Errors
///
/// Returns an error if a file cannot be read, the JSON cannot be parsed,
/// or the blob is not valid base64.
pub fn consume_session(
    paths: &PostcraftPaths,
) -> Result<Option<(ContextData, Option<Attachment>)>> {
    let session_path = paths.session_file();
    if !session_path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&session_path).context("Failed to read session file")?;
    let data: ContextData =
        serde_json::from_str(&content).context("Failed to parse session file")?;

    let attachment = if data.has_attachment {
        let encoded = std::fs::read_to_string(paths.session_blob_file())
            .context("Failed to read session attachment")?;
        let bytes = BASE64
            .decode(encoded.trim())
            .context("Session attachment is not valid base64")?;
        Some(Attachment {
            name: data
                .attachment_name
                .clone()
                .unwrap_or_else(|| "context_file".to_string()),
            bytes,
        })
    } else {
        None
    };

    remove_if_exists(&session_path)?;
    remove_if_exists(&paths.session_blob_file())?;

    Ok(Some((data, attachment)))
}

/// Removes any session files without reading them.
///
/// # Errors
///
/// Returns an error if a file exists but cannot be removed.
pub fn clear_session(paths: &PostcraftPaths) -> Result<()> {
    remove_if_exists(&paths.session_file())?;
    remove_if_exists(&paths.session_blob_file())
}

fn remove_if_exists(path: &std::path::Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_data() -> ContextData {
        ContextData {
            has_attachment: false,
            attachment_name: None,
            profile_url: "https://example.com/@acme".to_string(),
            scrape_url: String::new(),
            scrape_prompt: "Extract the main content from this page".to_string(),
        }
    }

    #[test]
    fn consume_without_session_returns_none() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        assert!(consume_session(&paths).unwrap().is_none());
    }

    #[test]
    fn save_and_consume_roundtrip_without_attachment() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        save_session(&paths, &sample_data(), None).unwrap();
        let (data, attachment) = consume_session(&paths).unwrap().unwrap();

        assert_eq!(data, sample_data());
        assert!(attachment.is_none());
    }

    #[test]
    fn save_and_consume_roundtrip_with_attachment() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        let data = ContextData {
            has_attachment: true,
            attachment_name: Some("brand.pdf".to_string()),
            ..sample_data()
        };
        let file = Attachment {
            name: "brand.pdf".to_string(),
            bytes: vec![0x25, 0x50, 0x44, 0x46, 0x00, 0xff],
        };

        save_session(&paths, &data, Some(&file)).unwrap();
        let (loaded, attachment) = consume_session(&paths).unwrap().unwrap();

        assert_eq!(loaded, data);
        assert_eq!(attachment.unwrap(), file);
    }

    #[test]
    fn consume_removes_session_files() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        let data = ContextData {
            has_attachment: true,
            attachment_name: Some("notes.txt".to_string()),
            ..sample_data()
        };
        let file = Attachment {
            name: "notes.txt".to_string(),
            bytes: b"hello".to_vec(),
        };

        save_session(&paths, &data, Some(&file)).unwrap();
        consume_session(&paths).unwrap();

        assert!(!paths.session_file().exists());
        assert!(!paths.session_blob_file().exists());
        assert!(consume_session(&paths).unwrap().is_none());
    }

    #[test]
    fn save_without_attachment_removes_stale_blob() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        let with_file = ContextData {
            has_attachment: true,
            attachment_name: Some("a.txt".to_string()),
            ..sample_data()
        };
        let file = Attachment {
            name: "a.txt".to_string(),
            bytes: b"stale".to_vec(),
        };
        save_session(&paths, &with_file, Some(&file)).unwrap();
        assert!(paths.session_blob_file().exists());

        save_session(&paths, &sample_data(), None).unwrap();
        assert!(!paths.session_blob_file().exists());
    }

    #[test]
    fn clear_session_removes_files() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        save_session(&paths, &sample_data(), None).unwrap();
        clear_session(&paths).unwrap();
        assert!(!paths.session_file().exists());

        // Clearing an already-clear session is fine.
        clear_session(&paths).unwrap();
    }
}
