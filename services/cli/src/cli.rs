use crate::export::{run_export, run_preview};
use clap::{Args, Parser, Subcommand};
use inventory_export::config::parse_timeout;
use inventory_export::error::AppError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "inventory-export",
    about = "Fetch the dealer vehicle inventory and flatten it into a CSV export",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, normalize and write the CSV export (default command)
    Export(ExportArgs),
    /// Print the normalized records as JSON without writing a file
    Preview(PreviewArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Override the configured inventory API URL
    #[arg(long)]
    pub(crate) url: Option<String>,
    /// Override the configured bearer token
    #[arg(long)]
    pub(crate) token: Option<String>,
    /// Read a saved JSON payload instead of calling the API
    #[arg(long, conflicts_with_all = ["url", "token", "timeout"])]
    pub(crate) input: Option<PathBuf>,
    /// Request timeout in seconds
    #[arg(long = "timeout-secs", value_parser = parse_timeout_arg)]
    pub(crate) timeout: Option<Duration>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Override the configured output path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PreviewArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
}

fn parse_timeout_arg(raw: &str) -> Result<Duration, String> {
    parse_timeout(raw).map_err(|err| err.to_string())
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Export(ExportArgs::default()));

    match command {
        Command::Export(args) => run_export(args),
        Command::Preview(args) => run_preview(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("inventory-export").chain(args.iter().copied()))
    }

    #[test]
    fn export_is_the_default_command() {
        let cli = parse(&[]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn export_accepts_overrides() {
        let cli = parse(&[
            "export",
            "--url",
            "http://127.0.0.1:8080/vehicles",
            "--token",
            "abc",
            "--timeout-secs",
            "7",
            "--output",
            "stock.csv",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Export(args)) => {
                assert_eq!(
                    args.source.url.as_deref(),
                    Some("http://127.0.0.1:8080/vehicles")
                );
                assert_eq!(args.source.token.as_deref(), Some("abc"));
                assert_eq!(args.source.timeout, Some(Duration::from_secs(7)));
                assert_eq!(args.output, Some(PathBuf::from("stock.csv")));
            }
            other => panic!("expected export command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(parse(&["export", "--timeout-secs", "0"]).is_err());
    }

    #[test]
    fn input_conflicts_with_http_options() {
        assert!(parse(&["preview", "--input", "saved.json", "--url", "http://x"]).is_err());
        let cli = parse(&["preview", "--input", "saved.json"]).expect("parses");
        match cli.command {
            Some(Command::Preview(args)) => {
                assert_eq!(args.source.input, Some(PathBuf::from("saved.json")));
            }
            other => panic!("expected preview command, got {other:?}"),
        }
    }
}
