//! Site list normalization: canonical URLs, file-safe names, report file names.

use serde::{Deserialize, Serialize};

/// Characters replaced with `_` when deriving a site name.
const NAME_SEPARATORS: &[char] = &['/', '?', '#', ':', '*', '$', '@', '!', '.'];

/// Suffix Lighthouse gives JSON reports when several output formats are requested.
pub const REPORT_JSON_SUFFIX: &str = ".report.json";

/// A site to audit, derived once from a raw input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
    /// Canonical URL with an explicit http(s) scheme
    pub url: String,
    /// File-safe name derived from the URL
    pub name: String,
    /// Report file name inside the output directory
    pub file: String,
}

impl SiteInfo {
    /// Build the site record for one raw input URL.
    ///
    /// In HTML mode Lighthouse appends `.report.json` and `.report.html` to the
    /// output path itself, so the bare name is used and both files share it.
    pub fn new(raw_url: &str, html: bool) -> Self {
        let url = normalize_url(raw_url);
        let name = site_name(&url);
        let file = if html {
            name.clone()
        } else {
            format!("{}{}", name, REPORT_JSON_SUFFIX)
        };

        Self { url, name, file }
    }

    /// File name of the JSON report Lighthouse actually writes for this site.
    pub fn json_report_file(&self, html: bool) -> String {
        if html {
            format!("{}{}", self.file, REPORT_JSON_SUFFIX)
        } else {
            self.file.clone()
        }
    }
}

/// Build site records for every input URL, preserving order.
pub fn sites_info(sites: &[String], html: bool) -> Vec<SiteInfo> {
    sites.iter().map(|s| SiteInfo::new(s, html)).collect()
}

/// Ensure a URL carries an explicit scheme, defaulting to https.
pub fn normalize_url(raw: &str) -> String {
    let url = raw.trim();
    if url.starts_with("http:") || url.starts_with("https:") {
        return url.to_string();
    }

    if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        format!("https://{}", url)
    }
}

/// Strip the http(s) scheme and replace URL separators with underscores.
pub fn site_name(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    rest.chars()
        .map(|c| if NAME_SEPARATORS.contains(&c) { '_' } else { c })
        .collect()
}
