use thiserror::Error;

/// Failure categories of a sync run. The attached report carries the detail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncError {
    #[error("Invalid or missing configuration")]
    Config,
    #[error("Spreadsheet service rejected the credential")]
    Auth,
    #[error("Failed to fetch spreadsheet range")]
    Fetch,
    #[error("Failed to write output document")]
    Io,
}
