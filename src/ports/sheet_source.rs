use crate::domain::{content_map::RawRow, sheets::a1_notation::A1Notation};

use super::sync_error::SyncError;

#[async_trait::async_trait]
pub trait SheetSource: Send + Sync {
    /// Reads `range` from the spreadsheet, one entry per returned row.
    ///
    /// A range holding no values yields an empty vector, not an error.
    async fn fetch(
        &self,
        spreadsheet_id: &str,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<RawRow>, SyncError>;
}
