use crate::cli::{ExportArgs, PreviewArgs, SourceArgs};
use inventory_export::config::{AppConfig, SourceConfig};
use inventory_export::error::AppError;
use inventory_export::telemetry;
use inventory_export::workflows::inventory::{
    FileInventorySource, HttpInventorySource, InventoryExporter, InventorySource,
};
use tracing::info;

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let ExportArgs { source, output } = args;
    let output = output.unwrap_or(config.export.output_path);
    let source = build_source(source, config.source)?;

    info!(?config.environment, path = %output.display(), "starting inventory export");
    let summary = InventoryExporter::export_to_path(source.as_ref(), &output)?;

    println!("{summary}");
    println!("CSV saved as {}", output.display());
    Ok(())
}

pub(crate) fn run_preview(args: PreviewArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let source = build_source(args.source, config.source)?;
    let records = InventoryExporter::collect(source.as_ref())?;

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

/// Command-line flags win over the environment; `--input` bypasses HTTP.
pub(crate) fn build_source(
    args: SourceArgs,
    mut config: SourceConfig,
) -> Result<Box<dyn InventorySource>, AppError> {
    if let Some(path) = args.input {
        return Ok(Box::new(FileInventorySource::new(path)));
    }

    if let Some(url) = args.url {
        config.url = url;
    }
    if let Some(token) = args.token {
        config.token = Some(token);
    }
    if let Some(timeout) = args.timeout {
        config.timeout = timeout;
    }

    let token = config.require_token()?;
    let source = HttpInventorySource::new(config.url.as_str(), token, config.timeout)?;
    Ok(Box::new(source))
}
