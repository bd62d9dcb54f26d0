use error_stack::{report, ResultExt};

use crate::domain::sheets::a1_notation::CellRange;
use crate::ports::sync_error::SyncError;

pub const DEFAULT_RANGE: &str = "Sheet1!A1:B";
pub const DEFAULT_CREDENTIALS_ENV: &str = "GOOGLE_SHEETS_CREDENTIALS";

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    pub range: Box<str>,
    /// Name of the environment variable holding the service-account JSON.
    pub credentials_env: Box<str>,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: option_env!("SHEET_SYNC_SPREADSHEET_ID")
                .unwrap_or_default()
                .into(),
            range: DEFAULT_RANGE.into(),
            credentials_env: DEFAULT_CREDENTIALS_ENV.into(),
        }
    }
}

impl SpreadsheetConfig {
    pub fn cell_range(&self) -> error_stack::Result<CellRange, SyncError> {
        self.range
            .parse::<CellRange>()
            .change_context(SyncError::Config)
            .attach_printable_lazy(|| format!("sheets.range = {:?}", self.range))
    }

    pub fn validate(&self) -> error_stack::Result<(), SyncError> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(report!(SyncError::Config).attach_printable(
                "sheets.spreadsheet_id is empty: set it in the config file or SHEET_SYNC_SHEETS__SPREADSHEET_ID",
            ));
        }

        if self.credentials_env.trim().is_empty() {
            return Err(report!(SyncError::Config)
                .attach_printable("sheets.credentials_env must name an environment variable"));
        }

        self.cell_range().map(|_| ())
    }
}
