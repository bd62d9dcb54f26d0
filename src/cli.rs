use error_stack::report;

use crate::ports::sync_error::SyncError;

pub const USAGE: &str = "\
Usage: sheet-sync [--dry-run] [--help]

Reads the configured spreadsheet range and writes it as a JSON object.

Options:
  --dry-run   Print the document to stdout instead of writing the output file
  -h, --help  Show this message

Environment:
  GOOGLE_SHEETS_CREDENTIALS   Service-account key (JSON), required
  CONFIG_PATH                 Config file to load (default: SheetSync.*, optional)
  SHEET_SYNC_<SECTION>__<KEY> Overrides a config value, e.g. SHEET_SYNC_SHEETS__RANGE
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Sync { dry_run: bool },
    Help,
}

/// Parses the arguments that follow the program name.
pub fn parse_args<I, S>(args: I) -> error_stack::Result<Command, SyncError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut dry_run = false;
    for arg in args {
        match arg.as_ref() {
            "--dry-run" => dry_run = true,
            "-h" | "--help" => return Ok(Command::Help),
            other => {
                return Err(report!(SyncError::Config)
                    .attach_printable(format!("Unknown argument '{}'", other))
                    .attach_printable(USAGE))
            }
        }
    }
    Ok(Command::Sync { dry_run })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_sync() {
        assert_eq!(
            parse_args(Vec::<String>::new()).unwrap(),
            Command::Sync { dry_run: false }
        );
    }

    #[test]
    fn test_dry_run_flag() {
        assert_eq!(
            parse_args(["--dry-run"]).unwrap(),
            Command::Sync { dry_run: true }
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(["--dry-run", "--help"]).unwrap(), Command::Help);
        assert_eq!(parse_args(["-h"]).unwrap(), Command::Help);
    }

    #[test]
    fn test_unknown_argument_is_config_error() {
        let report = parse_args(["--sequential"]).unwrap_err();
        assert_eq!(*report.current_context(), SyncError::Config);
    }
}
