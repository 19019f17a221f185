use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem access for uploads, CSV imports, and exports.
///
/// Relative paths resolve against `base_dir`; `~` is expanded.
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: &str) -> Self {
        let expanded = shellexpand::tilde(base_dir).to_string();
        Self {
            base_dir: PathBuf::from(expanded),
        }
    }

    /// Storage rooted at the process working directory.
    pub fn current_dir() -> Self {
        Self::new(".")
    }

    /// Get absolute path for a user-supplied path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(path).to_string());
        if expanded.is_absolute() {
            expanded
        } else {
            self.base_dir.join(expanded)
        }
    }

    /// Read file bytes for upload. Returns (file name, bytes).
    pub async fn read(&self, path: &str) -> Result<(String, Vec<u8>)> {
        let abs = self.resolve(path);
        let name = abs
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Path has no file name: {}", abs.display()))?
            .to_string();
        let data = fs::read(&abs)
            .await
            .with_context(|| format!("Failed to read {}", abs.display()))?;
        Ok((name, data))
    }

    /// Read a UTF-8 text file such as an import CSV.
    pub async fn read_text(&self, path: &str) -> Result<String> {
        let abs = self.resolve(path);
        fs::read_to_string(&abs)
            .await
            .with_context(|| format!("Failed to read {}", abs.display()))
    }

    /// Write text to `path`, or to stdout when no path is given.
    pub async fn write_text(&self, path: Option<&str>, contents: &str) -> Result<Option<PathBuf>> {
        match path {
            Some(p) => {
                let abs = self.resolve(p);
                if let Some(parent) = abs.parent().filter(|d| !d.as_os_str().is_empty()) {
                    ensure_dir(parent).await?;
                }
                fs::write(&abs, contents)
                    .await
                    .with_context(|| format!("Failed to write {}", abs.display()))?;
                Ok(Some(abs))
            }
            None => {
                let mut stdout = tokio::io::stdout();
                stdout
                    .write_all(contents.as_bytes())
                    .await
                    .context("Failed to write to stdout")?;
                stdout.flush().await.context("Failed to flush stdout")?;
                Ok(None)
            }
        }
    }
}

async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create directory {}", dir.display()))
}
