//! Startup configuration.
//!
//! Precedence for every value: command-line flag, then environment
//! variable, then built-in default. Empty environment values count as unset.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5230";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "MEMOS_BASE_URL";
pub const ACCESS_TOKEN_ENV: &str = "MEMOS_ACCESS_TOKEN";
pub const API_TOKEN_ENV: &str = "MEMOS_API_TOKEN";

#[derive(Parser, Debug)]
#[command(name = "memos-mcp")]
#[command(
    author,
    about = "MCP server for Memos - a self-hosted notes application",
    long_about = None,
    disable_version_flag = true
)]
pub struct Cli {
    /// Memos base URL (default: MEMOS_BASE_URL env or http://localhost:5230)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Memos access token (default: MEMOS_ACCESS_TOKEN or MEMOS_API_TOKEN env)
    #[arg(long)]
    pub access_token: Option<String>,

    /// Alias for --access-token
    #[arg(long)]
    pub api_token: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Serve MCP over streamable HTTP at this address instead of stdio
    #[arg(long, value_name = "ADDR")]
    pub http: Option<SocketAddr>,

    /// Print version and exit
    #[arg(long)]
    pub version: bool,
}

/// How the MCP server talks to its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Stdio,
    /// Streamable HTTP, mounted at `/mcp`
    Http(SocketAddr),
}

/// Resolved, immutable configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
    pub transport: Transport,
}

impl Config {
    /// Resolve against the process environment.
    pub fn from_cli(cli: Cli) -> Self {
        Self::resolve(cli, |key| env::var(key).ok())
    }

    /// Resolve using `lookup` for environment values.
    pub fn resolve(cli: Cli, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let env_value = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let base_url = cli
            .base_url
            .or_else(|| env_value(BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let access_token = match cli.api_token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => cli
                .access_token
                .or_else(|| env_value(ACCESS_TOKEN_ENV))
                .or_else(|| env_value(API_TOKEN_ENV))
                .unwrap_or_default(),
        };

        let transport = match cli.http {
            Some(addr) => Transport::Http(addr),
            None => Transport::Stdio,
        };

        Self {
            base_url,
            access_token,
            timeout: Duration::from_secs(cli.timeout),
            transport,
        }
    }
}

