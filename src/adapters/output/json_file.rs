use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use error_stack::ResultExt;
use tempfile::{Builder, NamedTempFile};
use tracing::instrument;

use crate::domain::content_map::ContentMap;
use crate::ports::{content_sink::ContentSink, sync_error::SyncError};

/// Writes the content as a JSON document, replacing the file in one rename.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Temporary file in `dir`. A fresh one is created with mode 0666 under the
    /// process umask, the same mode a plain `fs::write` would give the target.
    fn stage_in(&self, dir: &Path) -> std::io::Result<NamedTempFile> {
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        builder.tempfile_in(dir)
    }
}

impl ContentSink for JsonFileSink {
    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    #[instrument(skip(content), fields(entries = content.len()))]
    fn write(&self, content: &ContentMap) -> error_stack::Result<(), SyncError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)
            .change_context(SyncError::Io)
            .attach_printable_lazy(|| format!("Could not create directory {}", dir.display()))?;

        let document = content
            .to_json_pretty()
            .change_context(SyncError::Io)
            .attach_printable("Could not serialize content")?;

        // Staged next to the target so the final rename stays on one filesystem.
        let mut staged = self
            .stage_in(dir)
            .change_context(SyncError::Io)
            .attach_printable_lazy(|| format!("Could not create a temporary file in {}", dir.display()))?;

        staged
            .write_all(document.as_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .change_context(SyncError::Io)
            .attach_printable_lazy(|| format!("Could not write {}", staged.path().display()))?;

        if let Ok(metadata) = fs::metadata(&self.path) {
            staged
                .as_file()
                .set_permissions(metadata.permissions())
                .change_context(SyncError::Io)
                .attach_printable_lazy(|| {
                    format!("Could not carry over permissions of {}", self.path.display())
                })?;
        }

        staged
            .persist(&self.path)
            .change_context(SyncError::Io)
            .attach_printable_lazy(|| format!("Could not replace {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "Output document replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_dir_of_bare_file_name_is_cwd() {
        let sink = JsonFileSink::new("site_content.json");
        assert_eq!(sink.parent_dir(), Path::new("."));
    }

    #[test]
    fn test_parent_dir_of_nested_path() {
        let sink = JsonFileSink::new("_data/site_content.json");
        assert_eq!(sink.parent_dir(), Path::new("_data"));
        assert_eq!(sink.destination(), "_data/site_content.json");
    }

    #[test]
    fn test_write_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_content.json");
        fs::write(&path, "{\n  \"stale\": \"entry\",\n  \"more\": \"text\"\n}").unwrap();

        let mut content = ContentMap::new();
        content.insert("fresh", "value");
        JsonFileSink::new(&path).write(&content).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "{\n  \"fresh\": \"value\"\n}"
        );
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_new_file_gets_same_mode_as_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_data").join("site_content.json");
        JsonFileSink::new(&path).write(&ContentMap::new()).unwrap();

        let plain = dir.path().join("_data").join("plain.json");
        fs::write(&plain, "{}").unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn test_replaced_file_keeps_its_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site_content.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        JsonFileSink::new(&path).write(&ContentMap::new()).unwrap();

        assert_eq!(
            fs::metadata(&path).unwrap().permissions().mode() & 0o777,
            0o640
        );
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("_data");
        fs::write(&blocker, "not a directory").unwrap();

        let report = JsonFileSink::new(blocker.join("site_content.json"))
            .write(&ContentMap::new())
            .unwrap_err();
        assert_eq!(*report.current_context(), SyncError::Io);
    }
}
