//! Lighthouse CLI runner: one blocking invocation per site

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use crate::resolver::ToolCommand;

/// Exit status and diagnostics of a single Lighthouse invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOutcome {
    /// Process exit code; `None` if the process never ran or was killed by a signal
    pub code: Option<i32>,
    pub stderr: String,
}

impl AuditOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Diagnostic text for a failed audit.
    pub fn error_message(&self) -> String {
        let stderr = self.stderr.trim_end();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.code {
            Some(code) => format!("Lighthouse exited with status {}", code),
            None => "Lighthouse terminated without an exit status".to_string(),
        }
    }
}

/// Runs Lighthouse against one URL at a time
pub struct LighthouseRunner {
    tool: ToolCommand,
    html: bool,
    params: Vec<String>,
}

impl LighthouseRunner {
    pub fn new(tool: ToolCommand, html: bool, params: Vec<String>) -> Self {
        Self { tool, html, params }
    }

    pub fn tool(&self) -> &ToolCommand {
        &self.tool
    }

    /// Arguments after the tool prefix: URL, output formats, output path, passthrough params.
    pub fn args(&self, url: &str, output_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![url.into(), "--output".into(), "json".into()];
        if self.html {
            args.push("--output".into());
            args.push("html".into());
        }
        args.push("--output-path".into());
        args.push(output_path.into());
        args.extend(self.params.iter().map(OsString::from));
        args
    }

    /// Run Lighthouse and wait for it. Never fails: a spawn error becomes a failed outcome.
    ///
    /// Lighthouse's stdout goes straight to the terminal; stderr is captured.
    pub fn audit(&self, url: &str, output_path: &Path) -> AuditOutcome {
        let output = self
            .tool
            .command()
            .args(self.args(url, output_path))
            .stdout(Stdio::inherit())
            .output();

        match output {
            Ok(output) => AuditOutcome {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            Err(e) => AuditOutcome {
                code: None,
                stderr: format!("Failed to execute {}: {}", self.tool.display(), e),
            },
        }
    }
}
