use std::io::Write;

use error_stack::ResultExt;

use crate::domain::content_map::ContentMap;
use crate::ports::{content_sink::ContentSink, sync_error::SyncError};

/// Prints the document instead of writing it. Used by `--dry-run`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl ContentSink for StdoutSink {
    fn destination(&self) -> String {
        "standard output".to_string()
    }

    fn write(&self, content: &ContentMap) -> error_stack::Result<(), SyncError> {
        let document = content
            .to_json_pretty()
            .change_context(SyncError::Io)
            .attach_printable("Could not serialize content")?;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", document)
            .and_then(|_| stdout.flush())
            .change_context(SyncError::Io)
    }
}
