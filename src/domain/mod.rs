pub mod content_map;
pub mod sheets;
