mod batch;
mod log;
mod options;
pub mod resolver;
mod runner;
mod site;
mod summary;

pub use batch::BatchRunner;
pub use log::Logger;
pub use options::{load_sites_file, parse_site_list, RunOptions, DEFAULT_OUT};
pub use resolver::{ToolCommand, ToolResolver};
pub use runner::{AuditOutcome, LighthouseRunner};
pub use site::{normalize_url, site_name, SiteInfo};
pub use summary::{print_summary, Score, SiteSummary, SUMMARY_FILE};

use anyhow::Result;

/// Locate Lighthouse and audit every site in `options`.
pub fn execute(options: &RunOptions) -> Result<Vec<SiteSummary>> {
    let resolver = ToolResolver::standard(options.use_global)?;
    execute_with(options, &resolver)
}

/// Like [`execute`], with a caller-supplied resolver.
///
/// Nothing is written if Lighthouse cannot be resolved.
pub fn execute_with(options: &RunOptions, resolver: &ToolResolver) -> Result<Vec<SiteSummary>> {
    options.validate()?;
    let log = Logger::new(options.verbose);
    let tool = resolver.resolve(&log)?;
    BatchRunner::new(tool, log).run(options)
}
