use std::sync::Arc;

use error_stack::ResultExt;

use crate::config::sheets_config::SpreadsheetConfig;
use crate::domain::{content_map::ContentMap, sheets::a1_notation::ToA1Notation};
use crate::ports::{content_sink::ContentSink, sheet_source::SheetSource, sync_error::SyncError};

pub const ROUTINE_NAME: &str = "sheet_sync";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub rows_read: usize,
    pub entries: usize,
    pub destination: String,
}

/// Fetch → transform → write, once.
pub struct SheetSyncRoutine {
    config: SpreadsheetConfig,
    source: Arc<dyn SheetSource>,
    sink: Box<dyn ContentSink>,
}

impl std::fmt::Debug for SheetSyncRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetSyncRoutine")
            .field("spreadsheet_id", &self.config.spreadsheet_id)
            .field("range", &self.config.range)
            .field("destination", &self.sink.destination())
            .finish()
    }
}

impl SheetSyncRoutine {
    pub fn new(
        config: SpreadsheetConfig,
        source: Arc<dyn SheetSource>,
        sink: Box<dyn ContentSink>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    pub fn name(&self) -> &str {
        ROUTINE_NAME
    }

    pub async fn run(&self) -> error_stack::Result<SyncReport, SyncError> {
        let cell_range = self.config.cell_range()?;
        if cell_range.width() < 2 {
            tracing::warn!(
                range = %self.config.range,
                "Range spans a single column; no row can produce an entry"
            );
        }
        let range = cell_range.to_a1_notation();

        let rows = self
            .source
            .fetch(&self.config.spreadsheet_id, &range)
            .await?;
        let rows_read = rows.len();

        let content = ContentMap::from_rows(rows);

        let destination = self.sink.destination();
        self.sink
            .write(&content)
            .attach_printable_lazy(|| format!("Destination: {}", destination))?;

        Ok(SyncReport {
            rows_read,
            entries: content.len(),
            destination,
        })
    }
}
