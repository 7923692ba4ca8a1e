//! Build information.
//!
//! Values are fixed at compile time. `MEMOS_MCP_GIT_COMMIT` and
//! `MEMOS_MCP_BUILD_DATE` may be set in the build environment to stamp a
//! release; otherwise they read `unknown`.

use std::fmt;

use serde::Serialize;

/// Immutable description of this binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_date: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
}

impl BuildInfo {
    pub const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            git_commit: match option_env!("MEMOS_MCP_GIT_COMMIT") {
                Some(commit) => commit,
                None => "unknown",
            },
            build_date: match option_env!("MEMOS_MCP_BUILD_DATE") {
                Some(date) => date,
                None => "unknown",
            },
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}) built on {} for {}/{}",
            self.name, self.version, self.git_commit, self.build_date, self.os, self.arch
        )
    }
}
