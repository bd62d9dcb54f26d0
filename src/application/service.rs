use std::sync::Arc;

use tracing::Instrument;

use crate::adapters::{
    output::{json_file::JsonFileSink, stdout::StdoutSink},
    sheets::{credential::Credential, spreadsheet_manager::SpreadsheetManager},
};
use crate::config::app_config::AppConfig;
use crate::ports::{content_sink::ContentSink, sheet_source::SheetSource, sync_error::SyncError};

use super::sheet_sync_routine::{SheetSyncRoutine, SyncReport};

/// Wires the production adapters and runs one sync.
///
/// The credential is read before anything touches the network or the output
/// file, so a missing credential leaves the previous document in place.
pub async fn run_sync(
    config: AppConfig,
    dry_run: bool,
) -> error_stack::Result<SyncReport, SyncError> {
    let credential = Credential::from_env(&config.sheets.credentials_env)?;
    tracing::info!(client_email = credential.client_email(), "Authenticating");

    let source: Arc<dyn SheetSource> = Arc::new(SpreadsheetManager::connect(credential).await?);

    let sink: Box<dyn ContentSink> = if dry_run {
        Box::new(StdoutSink)
    } else {
        Box::new(JsonFileSink::new(config.output.path.clone()))
    };

    let routine = SheetSyncRoutine::new(config.sheets, source, sink);
    routine
        .run()
        .instrument(tracing::span!(
            tracing::Level::INFO,
            "routine",
            routine = routine.name()
        ))
        .await
}
