//! Locating the Lighthouse CLI.
//!
//! Resolution walks an ordered list of strategies and takes the first one that
//! yields a runnable command. The standard order is an optional global install
//! followed by a bundled `lighthouse-cli/index.js` next to this executable.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::log::Logger;

/// Name of the globally installed Lighthouse executable.
pub const GLOBAL_PROGRAM: &str = "lighthouse";

/// Bundled CLI locations, relative to the executable's directory, in lookup order.
const BUNDLED_CANDIDATES: &[&str] = &[
    "node_modules/lighthouse/lighthouse-cli/index.js",
    "../lighthouse/lighthouse-cli/index.js",
];

/// A resolved invocation: the program plus any leading arguments (e.g. a script path).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: OsString,
    pub prefix_args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            prefix_args: vec![],
        }
    }

    pub fn with_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.prefix_args.push(arg.into());
        self
    }

    /// A fresh `Command` with the prefix arguments already applied.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.prefix_args);
        cmd
    }

    /// Human-readable form for progress output.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.prefix_args)
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One way of finding the Lighthouse CLI.
pub trait ResolveStrategy {
    /// Short description used in warnings.
    fn describe(&self) -> String;

    /// The command to run, or `None` if this strategy finds nothing.
    fn resolve(&self) -> Option<ToolCommand>;
}

/// A program on `PATH`, accepted when `<program> --version` exits 0.
pub struct GlobalInstall {
    program: String,
}

impl GlobalInstall {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl ResolveStrategy for GlobalInstall {
    fn describe(&self) -> String {
        "Global Lighthouse install".to_string()
    }

    fn resolve(&self) -> Option<ToolCommand> {
        let status = Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .ok()?;

        status
            .success()
            .then(|| ToolCommand::new(self.program.as_str()))
    }
}

/// A Lighthouse CLI script at one of several fixed paths, run through `node`.
pub struct BundledInstall {
    candidates: Vec<PathBuf>,
}

impl BundledInstall {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// The standard candidate paths under `base_dir`.
    pub fn under(base_dir: &Path) -> Self {
        Self::new(
            BUNDLED_CANDIDATES
                .iter()
                .map(|rel| base_dir.join(rel))
                .collect(),
        )
    }
}

impl ResolveStrategy for BundledInstall {
    fn describe(&self) -> String {
        "Bundled Lighthouse install".to_string()
    }

    fn resolve(&self) -> Option<ToolCommand> {
        self.candidates
            .iter()
            .find(|p| p.is_file())
            .map(|p| ToolCommand::new("node").with_arg(p))
    }
}

/// Ordered list of strategies; the first that resolves wins.
pub struct ToolResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl ToolResolver {
    pub fn new(strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Global install (when requested) then bundled install next to the executable.
    pub fn standard(use_global: bool) -> Result<Self> {
        let exe = std::env::current_exe().context("Failed to get current executable")?;
        let base_dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::with_base_dir(use_global, base_dir))
    }

    pub fn with_base_dir(use_global: bool, base_dir: &Path) -> Self {
        let mut strategies: Vec<Box<dyn ResolveStrategy>> = vec![];
        if use_global {
            strategies.push(Box::new(GlobalInstall::new(GLOBAL_PROGRAM)));
        }
        strategies.push(Box::new(BundledInstall::under(base_dir)));
        Self::new(strategies)
    }

    pub fn resolve(&self, log: &Logger) -> Result<ToolCommand> {
        let mut remaining = self.strategies.len();
        for strategy in &self.strategies {
            remaining -= 1;
            if let Some(tool) = strategy.resolve() {
                log.detail(format!("Using Lighthouse: {}", tool.display()));
                return Ok(tool);
            }
            if remaining > 0 {
                log.warn(format!(
                    "{} not found, falling back to local one",
                    strategy.describe()
                ));
            }
        }

        anyhow::bail!("Failed to find Lighthouse CLI, aborting")
    }
}
