use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace as sdktrace;
use opentelemetry_sdk::Resource;
use sheet_sync::application::service::run_sync;
use sheet_sync::cli::{self, Command};
use sheet_sync::config::app_config::AppConfig;
use sheet_sync::config::telemetry_config::TelemetryConfig;
use sheet_sync::prettyprint::PrettyFormatter;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

#[tokio::main]
async fn main() -> ExitCode {
    let config = AppConfig::load();

    let telemetry = config
        .as_ref()
        .map(|config| config.telemetry.clone())
        .unwrap_or_default();
    if let Err(err) = setup_tracing(&telemetry) {
        eprintln!("Failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    let outcome = match cli::parse_args(std::env::args().skip(1)) {
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            Ok(None)
        }
        Ok(Command::Sync { dry_run }) => match config {
            Ok(config) => run_sync(config, dry_run).await.map(Some),
            Err(report) => Err(report),
        },
        Err(report) => Err(report),
    };

    let exit_code = match outcome {
        Ok(Some(report)) => {
            info!(
                entries = report.entries,
                rows = report.rows_read,
                destination = %report.destination,
                "✅ Data fetched and saved successfully!"
            );
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(report) => {
            error!("❌ Sheet sync failed: {:?}", report);
            ExitCode::FAILURE
        }
    };

    opentelemetry::global::shutdown_tracer_provider();
    exit_code
}

fn setup_tracing(telemetry: &TelemetryConfig) -> Result<(), Box<dyn std::error::Error>> {
    let level = telemetry.level().unwrap_or(tracing::Level::INFO);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = match &telemetry.log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(false))
                .with_writer(Mutex::new(std::fs::File::create(path)?))
                .with_ansi(false),
        ),
        None => None,
    };

    let otel_layer = match &telemetry.otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint.to_string());

            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(exporter)
                .with_trace_config(sdktrace::config().with_resource(Resource::new(vec![
                    KeyValue::new("service.name", "sheet_sync"),
                ])))
                .install_batch(opentelemetry_sdk::runtime::Tokio)?;

            Some(OpenTelemetryLayer::new(tracer))
        }
        None => None,
    };

    Registry::default()
        .with(tracing_subscriber::filter::Targets::new().with_target("sheet_sync", level))
        .with(otel_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
        opentelemetry::global::shutdown_tracer_provider();
    }));
}
