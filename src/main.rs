use std::path::PathBuf;

use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing_subscriber::EnvFilter;

use nianio_lsp::{Backend, ConfigOverrides};

/// Completion language server for nianiolang, speaking LSP over stdio.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory searched for module files (defaults to the workspace root)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Module file extension, without the dot
    #[arg(long)]
    extension: Option<String>,

    /// Maximum type nesting followed when resolving a field chain
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log filter, e.g. `debug` or `nianio_lsp=trace` (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root: self.root.clone(),
            extension: self.extension.clone(),
            max_depth: self.max_depth,
        }
    }
}

fn init_logging(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let overrides = cli.overrides();
    tracing::info!(?overrides, "starting NianioLSP");

    let (service, socket) = LspService::new(|client| Backend::new(client, overrides));
    Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
        .serve(service)
        .await;
}
