//! Run options and site list collection.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory for reports and the summary file.
pub const DEFAULT_OUT: &str = "./report/lighthouse";

/// Options for a batch run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Raw site URLs, audited in this order
    pub sites: Vec<String>,
    /// Output directory, recreated on every run
    pub out: PathBuf,
    /// Also emit an HTML report per site
    pub html: bool,
    /// Extra arguments passed to Lighthouse verbatim
    pub params: String,
    /// Prefer a globally installed `lighthouse`
    pub use_global: bool,
    /// Print progress lines
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sites: vec![],
            out: PathBuf::from(DEFAULT_OUT),
            html: false,
            params: String::new(),
            use_global: false,
            verbose: false,
        }
    }
}

impl RunOptions {
    /// Reject options that cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        if self.sites.is_empty() {
            anyhow::bail!("No sites given: pass URLs, --sites or --file");
        }
        if let Some(blank) = self.sites.iter().position(|s| s.trim().is_empty()) {
            anyhow::bail!("Site #{} is empty", blank + 1);
        }
        Ok(())
    }

    /// Passthrough parameters split into individual arguments.
    pub fn param_args(&self) -> Vec<String> {
        split_params(&self.params)
    }
}

/// Split a comma-separated site list, dropping empty entries.
pub fn parse_site_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load sites from a file: one URL per line, blank lines and `#` comments skipped.
pub fn load_sites_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sites file: {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Split a parameter string on whitespace; single or double quotes group words.
pub fn split_params(params: &str) -> Vec<String> {
    let mut args = vec![];
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in params.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if in_arg {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_options_defaults() {
        let opts = RunOptions::default();
        assert_eq!(opts.out, PathBuf::from("./report/lighthouse"));
        assert!(opts.sites.is_empty());
        assert!(opts.params.is_empty());
        assert!(!opts.html);
        assert!(!opts.use_global);
        assert!(!opts.verbose);
    }

    #[test]
    fn validate_rejects_empty_sites() {
        let err = RunOptions::default().validate().unwrap_err();
        assert!(err.to_string().contains("No sites given"));
    }

    #[test]
    fn validate_rejects_blank_site() {
        let opts = RunOptions {
            sites: vec!["a.com".to_string(), "  ".to_string()],
            ..Default::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("#2"));
    }

    #[test]
    fn validate_accepts_sites() {
        let opts = RunOptions {
            sites: vec!["example.com".to_string()],
            ..Default::default()
        };
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn site_list_splits_on_commas() {
        assert_eq!(
            parse_site_list("a.com, b.com,,c.com "),
            vec!["a.com", "b.com", "c.com"]
        );
        assert!(parse_site_list("").is_empty());
    }

    #[test]
    fn sites_file_skips_blank_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sites.txt");
        fs::write(&path, "# prod\nexample.com\n\n  https://a.io/x  \n#b.io\n").unwrap();

        let sites = load_sites_file(&path).unwrap();
        assert_eq!(sites, vec!["example.com", "https://a.io/x"]);
    }

    #[test]
    fn sites_file_missing() {
        let err = load_sites_file(Path::new("/nonexistent/sites.txt")).unwrap_err();
        assert!(err.to_string().contains("Failed to read sites file"));
    }

    #[test]
    fn split_params_whitespace() {
        assert_eq!(
            split_params("--only-categories=performance   --quiet"),
            vec!["--only-categories=performance", "--quiet"]
        );
        assert!(split_params("   ").is_empty());
    }

    #[test]
    fn split_params_quotes_group_words() {
        assert_eq!(
            split_params(r#"--chrome-flags="--headless --no-sandbox" --preset 'desktop'"#),
            vec!["--chrome-flags=--headless --no-sandbox", "--preset", "desktop"]
        );
        assert_eq!(split_params(r#"--x """#), vec!["--x", ""]);
    }
}
