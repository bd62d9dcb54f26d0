use error_stack::{Report, ResultExt};
use google_sheets4::Sheets;
use std::fmt::Debug;
use tracing::instrument;

use crate::domain::{content_map::RawRow, sheets::a1_notation::A1Notation};
use crate::ports::{sheet_source::SheetSource, sync_error::SyncError};

use super::{
    auth::{self, READ_SCOPE},
    credential::Credential,
    http_client::{self, HttpsConnector},
    value_rows::IntoRawRows,
};

pub struct SpreadsheetManager {
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager")
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::connect")]
    pub async fn connect(credential: Credential) -> error_stack::Result<Self, SyncError> {
        let client = http_client::http_client()?;
        let auth = auth::auth(credential, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { hub })
    }
}

#[async_trait::async_trait]
impl SheetSource for SpreadsheetManager {
    #[instrument(skip(self))]
    async fn fetch(
        &self,
        spreadsheet_id: &str,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<RawRow>, SyncError> {
        let (_, value_range) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet_id, range.as_ref())
            .add_scope(READ_SCOPE)
            .doit()
            .await
            .map_err(classify_error)
            .attach_printable_lazy(|| {
                format!(
                    "Failed to fetch range {} from spreadsheet {}",
                    range, spreadsheet_id
                )
            })?;

        let rows = value_range.values.unwrap_or_default().into_raw_rows();
        tracing::debug!(rows = rows.len(), "Range fetched");
        Ok(rows)
    }
}

/// A token that cannot be obtained mid-run is still a credential problem.
fn classify_error(error: google_sheets4::Error) -> Report<SyncError> {
    let context = match error {
        google_sheets4::Error::MissingToken(_) => SyncError::Auth,
        _ => SyncError::Fetch,
    };
    Report::new(error).change_context(context)
}
