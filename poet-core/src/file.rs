use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{Error, Formatter, Result};

/// Trait for types that represent a generated source file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, then hand it to `formatter`.
    ///
    /// Returns the path that was written.
    fn write(&self, base: &Path, formatter: &dyn Formatter) -> Result<PathBuf> {
        let path = self.path(base);
        write_file(&path, &terminate(self.render()))?;
        debug!(path = %path.display(), formatter = formatter.name(), "formatting");
        formatter.format_file(&path)?;
        Ok(path)
    }
}

/// Ensure `content` ends with exactly one newline.
pub fn terminate(content: String) -> String {
    let trimmed = content.trim_end_matches('\n');
    let mut out = String::with_capacity(trimmed.len() + 1);
    out.push_str(trimmed);
    out.push('\n');
    out
}

/// Write `content` to `path`, replacing any existing file.
///
/// The content goes to a temporary file in the target directory first and is
/// renamed over `path`, so a failed write never leaves a partial file behind.
/// An existing file keeps its permissions; a new one gets the same mode
/// `std::fs::write` would give it.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Created through open(2), so the umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(parent)
        .map_err(|e| Error::io(parent, e))?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| Error::io(tmp.path(), e))?;
    }
    tmp.write_all(content.as_bytes())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
