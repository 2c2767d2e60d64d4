use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut sites = cli.urls;
    if let Some(list) = cli.sites.as_deref() {
        sites.extend(lighthouse_batch::parse_site_list(list));
    }
    if let Some(file) = cli.file.as_deref() {
        sites.extend(lighthouse_batch::load_sites_file(file)?);
    }

    let options = lighthouse_batch::RunOptions {
        sites,
        out: cli.out,
        html: cli.html,
        params: cli.params,
        use_global: cli.use_global,
        verbose: cli.verbose,
    };

    println!(
        "{} Auditing {} site(s) into {}",
        ">>".yellow(),
        options.sites.len(),
        options.out.display().to_string().cyan().bold()
    );

    let summaries = lighthouse_batch::execute(&options)?;
    lighthouse_batch::print_summary(&summaries);

    Ok(())
}

#[derive(Parser)]
#[command(
    name = "lighthouse-batch",
    about = "Run Lighthouse against a list of sites and write a JSON summary",
    version
)]
struct Cli {
    /// Site URLs to audit
    urls: Vec<String>,
    /// Comma-separated site URLs
    #[arg(short, long)]
    sites: Option<String>,
    /// File with one site URL per line
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Output directory (deleted and recreated on each run)
    #[arg(short, long, default_value = lighthouse_batch::DEFAULT_OUT)]
    out: PathBuf,
    /// Extra arguments passed to Lighthouse
    #[arg(short, long, default_value = "", allow_hyphen_values = true)]
    params: String,
    /// Also write an HTML report per site
    #[arg(long)]
    html: bool,
    /// Prefer a globally installed lighthouse
    #[arg(short = 'g', long)]
    use_global: bool,
    /// Print progress
    #[arg(short, long)]
    verbose: bool,
}
