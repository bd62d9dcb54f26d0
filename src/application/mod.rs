pub mod service;
pub mod sheet_sync_routine;
