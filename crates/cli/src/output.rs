//! Writing rendered documents to a file or stdout.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path`, or to stdout when no path is given.
///
/// Files are written to a temporary sibling first and renamed into place, so
/// an existing file is never left half-written.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => write_file(path, content),
        None => write_stdout(content),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote output file");
    Ok(())
}

fn write_stdout(content: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.is_empty() && !content.ends_with('\n') {
        handle.write_all(b"\n").context("Failed to write to stdout")?;
    }
    handle.flush().context("Failed to write to stdout")
}
