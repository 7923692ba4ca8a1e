//! Memos MCP server binary.
//!
//! Parses flags, resolves configuration and hands over to the runtime.

use clap::Parser;
use memos_mcp::config::{Cli, Config};
use memos_mcp::serve::{self, ServeError};
use memos_mcp::version::BuildInfo;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Server error: {0}")]
    #[diagnostic(code(memos_mcp::binary::serve))]
    Serve(#[from] ServeError),
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();
    let build = BuildInfo::current();

    if cli.version {
        println!("{build}");
        return Ok(());
    }

    serve::install_crypto_provider();
    serve::init_tracing();

    serve::run(Config::from_cli(cli), build).await?;
    Ok(())
}
