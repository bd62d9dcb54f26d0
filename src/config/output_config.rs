use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATH: &str = "_data/site_content.json";

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}
