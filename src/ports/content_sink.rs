use crate::domain::content_map::ContentMap;

use super::sync_error::SyncError;

pub trait ContentSink: Send + Sync {
    /// Human-readable description of where the content ends up.
    fn destination(&self) -> String;

    /// Replaces whatever the destination held with `content`.
    fn write(&self, content: &ContentMap) -> error_stack::Result<(), SyncError>;
}
