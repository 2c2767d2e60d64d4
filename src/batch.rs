//! Batch runner: audit every site in order and write the summary.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::log::Logger;
use crate::options::RunOptions;
use crate::resolver::ToolCommand;
use crate::runner::LighthouseRunner;
use crate::site::{self, SiteInfo};
use crate::summary::{self, SiteSummary, SUMMARY_FILE};

/// Runs Lighthouse over a site list, one site at a time.
pub struct BatchRunner {
    tool: ToolCommand,
    log: Logger,
}

impl BatchRunner {
    pub fn new(tool: ToolCommand, log: Logger) -> Self {
        Self { tool, log }
    }

    /// Audit every site sequentially and write `<out>/summary.json`.
    ///
    /// The output directory is wiped first. Per-site failures are recorded in
    /// the returned summaries; only filesystem errors on the output directory
    /// or the summary file abort the run.
    pub fn run(&self, opts: &RunOptions) -> Result<Vec<SiteSummary>> {
        opts.validate()?;
        let out = opts.out.as_path();
        reset_output_dir(out)?;

        let runner = LighthouseRunner::new(self.tool.clone(), opts.html, opts.param_args());
        let count = opts.sites.len();
        self.log.info(format!(
            "Lighthouse batch run begin for {} site{}",
            count,
            if count > 1 { "s" } else { "" }
        ));

        let mut summaries = Vec::with_capacity(count);
        for (i, site) in site::sites_info(&opts.sites, opts.html).into_iter().enumerate() {
            let prefix = format!("{}/{}: ", i + 1, count);
            let summary = self.audit_site(&runner, site, out, opts.html, &prefix);

            if summary.is_error() {
                self.log.warn(format!(
                    "{}Lighthouse analysis FAILED for {}",
                    prefix, summary.site.url
                ));
            } else {
                self.log.info(format!(
                    "{}Lighthouse analysis of '{}' complete with score {}",
                    prefix, summary.site.url, summary.score
                ));
            }

            summaries.push(summary);
        }

        let summary_path = out.join(SUMMARY_FILE);
        self.log.info("Lighthouse batch run end");
        self.log.info(format!(
            "Writing reports summary to {}",
            summary_path.display()
        ));
        summary::write_summary(&summary_path, &summaries)?;
        self.log.wrote(summary_path.display());

        Ok(summaries)
    }

    fn audit_site(
        &self,
        runner: &LighthouseRunner,
        site: SiteInfo,
        out: &Path,
        html: bool,
        prefix: &str,
    ) -> SiteSummary {
        let output_path = out.join(&site.file);
        self.log
            .info(format!("{}Lighthouse analyzing '{}'", prefix, site.url));
        self.log.detail(
            std::iter::once(runner.tool().display())
                .chain(
                    runner
                        .args(&site.url, &output_path)
                        .iter()
                        .map(|a| a.to_string_lossy().to_string()),
                )
                .collect::<Vec<_>>()
                .join(" "),
        );

        let outcome = runner.audit(&site.url, &output_path);
        if !outcome.success() {
            return SiteSummary::failed(site, outcome.error_message());
        }

        let report_path = out.join(site.json_report_file(html));
        match summary::read_report_score(&report_path) {
            Ok(score) => SiteSummary::succeeded(site, score),
            Err(e) => SiteSummary::failed(site, format!("{:#}", e)),
        }
    }
}

/// Delete the output directory if present and recreate it empty.
fn reset_output_dir(out: &Path) -> Result<()> {
    if out.exists() {
        fs::remove_dir_all(out)
            .with_context(|| format!("Failed to clear output directory: {}", out.display()))?;
    }
    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))
}
