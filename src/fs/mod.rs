//! File system operations.

use std::path::{Path, PathBuf};

use anyhow::Context;

pub mod session;
pub mod settings;

pub use session::ContextData;
pub use settings::PersistedSettings;

/// Holds all postcraft-related paths derived from a base directory.
///
/// This struct enables dependency injection of filesystem paths, allowing
/// tests to use isolated temporary directories instead of the actual
/// working directory. In production, the base is typically the current
/// working directory.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use postcraft::fs::PostcraftPaths;
///
/// let paths = PostcraftPaths::new(Path::new("/tmp/test"));
/// assert_eq!(
///     paths.settings_file(),
///     Path::new("/tmp/test/.postcraft/settings.json")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PostcraftPaths {
    base: PathBuf,
}

impl PostcraftPaths {
    /// Creates paths rooted at the given base directory.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
        }
    }

    /// Creates paths rooted at the current working directory.
    ///
    /// # Panics
    ///
    /// Panics if the current directory cannot be determined.
    #[must_use]
    #[allow(clippy::expect_used)] // Documented panic - fundamental requirement for app startup.
    pub fn from_cwd() -> Self {
        Self {
            base: std::env::current_dir().expect("Failed to get current directory"),
        }
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Returns the `.postcraft` directory path.
    #[must_use]
    pub fn postcraft_dir(&self) -> PathBuf {
        self.base.join(".postcraft")
    }

    /// Returns the settings file path (`.postcraft/settings.json`).
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.base.join(".postcraft/settings.json")
    }

    /// Returns the transient session context path (`.postcraft/session.json`).
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.base.join(".postcraft/session.json")
    }

    /// Returns the session attachment blob path (`.postcraft/session.blob`).
    #[must_use]
    pub fn session_blob_file(&self) -> PathBuf {
        self.base.join(".postcraft/session.blob")
    }

    /// Returns the saved draft path (`.postcraft/draft.md`).
    #[must_use]
    pub fn draft_file(&self) -> PathBuf {
        self.base.join(".postcraft/draft.md")
    }

    /// Ensures the `.postcraft` directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_postcraft_dir(&self) -> anyhow::Result<()> {
        let dir = self.postcraft_dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        Ok(())
    }

    /// Loads settings from the settings file.
    ///
    /// If the file doesn't exist, returns default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// The caller falls back to defaults and logs a warning.
    pub fn load_settings(&self) -> anyhow::Result<PersistedSettings> {
        settings::load_settings(&self.settings_file())
    }

    /// Saves settings to the settings file, creating `.postcraft` if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save_settings(&self, settings: &PersistedSettings) -> anyhow::Result<()> {
        self.ensure_postcraft_dir()?;
        settings::save_settings(&self.settings_file(), settings)
    }

    /// Saves the generated draft as plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save_draft(&self, content: &str) -> anyhow::Result<()> {
        self.ensure_postcraft_dir()?;
        std::fs::write(self.draft_file(), content).with_context(|| {
            format!("Failed to write draft: {}", self.draft_file().display())
        })
    }
}

impl Default for PostcraftPaths {
    fn default() -> Self {
        Self::from_cwd()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_are_derived_from_base() {
        let base = Path::new("/test/base");
        let paths = PostcraftPaths::new(base);

        assert_eq!(paths.base(), Path::new("/test/base"));
        assert_eq!(paths.postcraft_dir(), Path::new("/test/base/.postcraft"));
        assert_eq!(
            paths.settings_file(),
            Path::new("/test/base/.postcraft/settings.json")
        );
        assert_eq!(
            paths.session_file(),
            Path::new("/test/base/.postcraft/session.json")
        );
        assert_eq!(
            paths.session_blob_file(),
            Path::new("/test/base/.postcraft/session.blob")
        );
        assert_eq!(
            paths.draft_file(),
            Path::new("/test/base/.postcraft/draft.md")
        );
    }

    #[test]
    fn ensure_postcraft_dir_creates_directory() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        assert!(!paths.postcraft_dir().exists());
        paths.ensure_postcraft_dir().unwrap();
        assert!(paths.postcraft_dir().exists());
    }

    #[test]
    fn ensure_postcraft_dir_succeeds_when_exists() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        paths.ensure_postcraft_dir().unwrap();
        paths.ensure_postcraft_dir().unwrap();
        assert!(paths.postcraft_dir().exists());
    }

    #[test]
    fn save_draft_writes_plain_text() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        paths.save_draft("line one\nline two").unwrap();
        let saved = std::fs::read_to_string(paths.draft_file()).unwrap();
        assert_eq!(saved, "line one\nline two");
    }
}
