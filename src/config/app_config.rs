use config::Config;
use error_stack::{report, Report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};

use crate::ports::sync_error::SyncError;

use super::{
    output_config::OutputConfig, sheets_config::SpreadsheetConfig,
    telemetry_config::TelemetryConfig,
};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "SheetSync";
pub const ENV_PREFIX: &str = "SHEET_SYNC";

#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    pub output: OutputConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Compiled defaults, then the optional config file named by `CONFIG_PATH`,
    /// then `SHEET_SYNC_*` environment variables (`__` separates nested keys).
    pub fn load() -> error_stack::Result<Self, SyncError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .change_context(SyncError::Config)
            .attach_printable_lazy(|| format!("Error reading config file '{}'", config_path))?;

        Self::from_config(config, &config_path)
    }

    pub fn from_config(config: Config, origin: &str) -> error_stack::Result<Self, SyncError> {
        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(SyncError::Config)
            .attach_printable_lazy(|| format!("Config '{}' is not a key/value document", origin))?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        let app_config = match AppConfig::deserialize(path_de) {
            Ok(app_config) => app_config,
            Err(e) => {
                let path_str = track
                    .path()
                    .iter()
                    .map(|seg| match seg {
                        Segment::Seq { index } => format!("[{}]", index),
                        Segment::Map { key } => format!(".{}", key),
                        Segment::Enum { variant } => format!("::{}", variant),
                        Segment::Unknown => String::from("<?>"),
                    })
                    .collect::<String>();
                return Err(Report::new(e)
                    .change_context(SyncError::Config)
                    .attach_printable(format!(
                        "Failed to deserialize config '{}', field path: {}",
                        origin,
                        path_str.trim_start_matches('.')
                    )));
            }
        };

        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> error_stack::Result<(), SyncError> {
        if self.telemetry.level().is_none() {
            return Err(report!(SyncError::Config).attach_printable(format!(
                "telemetry.level = {:?} is not one of trace, debug, info, warn, error",
                self.telemetry.level
            )));
        }

        self.sheets.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};
    use std::path::Path;

    fn build(toml: &str) -> error_stack::Result<AppConfig, SyncError> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .expect("config should build");
        AppConfig::from_config(config, "test")
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = build(
            r#"
            [sheets]
            spreadsheet_id = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(&*config.sheets.spreadsheet_id, "abc123");
        assert_eq!(&*config.sheets.range, "Sheet1!A1:B");
        assert_eq!(&*config.sheets.credentials_env, "GOOGLE_SHEETS_CREDENTIALS");
        assert_eq!(config.output.path, Path::new("_data/site_content.json"));
        assert_eq!(config.telemetry.level(), Some(tracing::Level::INFO));
        assert!(config.telemetry.otlp_endpoint.is_none());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let config = build(
            r#"
            [sheets]
            spreadsheet_id = "abc123"
            range = "'Site Copy'!A2:B200"

            [output]
            path = "site/_data/copy.json"

            [telemetry]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(&*config.sheets.range, "'Site Copy'!A2:B200");
        assert_eq!(config.output.path, Path::new("site/_data/copy.json"));
        assert_eq!(config.telemetry.level(), Some(tracing::Level::DEBUG));
    }

    #[test]
    fn test_override_wins_over_file() {
        let config = Config::builder()
            .add_source(File::from_str(
                "[sheets]\nspreadsheet_id = \"from-file\"",
                FileFormat::Toml,
            ))
            .set_override("sheets.spreadsheet_id", "from-env")
            .unwrap()
            .build()
            .unwrap();

        let config = AppConfig::from_config(config, "test").unwrap();
        assert_eq!(&*config.sheets.spreadsheet_id, "from-env");
    }

    #[test]
    fn test_empty_spreadsheet_id_is_rejected() {
        let report = build("[sheets]\nspreadsheet_id = \"\"").unwrap_err();
        assert_eq!(*report.current_context(), SyncError::Config);
    }

    #[test]
    fn test_malformed_range_is_rejected() {
        let report = build("[sheets]\nspreadsheet_id = \"abc\"\nrange = \"Sheet1!:B\"").unwrap_err();
        assert_eq!(*report.current_context(), SyncError::Config);
        assert!(format!("{report:?}").contains("sheets.range"));
    }

    #[test]
    fn test_wrong_type_reports_field_path() {
        let report = build("[sheets]\nspreadsheet_id = \"abc\"\nrange = [1, 2]").unwrap_err();
        assert_eq!(*report.current_context(), SyncError::Config);
        assert!(format!("{report:?}").contains("sheets.range"));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        let report =
            build("[sheets]\nspreadsheet_id = \"abc\"\n[telemetry]\nlevel = \"loud\"").unwrap_err();
        assert_eq!(*report.current_context(), SyncError::Config);
    }
}
