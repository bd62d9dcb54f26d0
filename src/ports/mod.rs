pub mod content_sink;
pub mod sheet_source;
pub mod sync_error;
