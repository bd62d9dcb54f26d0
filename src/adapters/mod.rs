pub mod output;
pub mod sheets;
