//! Image URL allow-listing.
//!
//! Image URLs are only ever rendered, never fetched, but they still cross a
//! trust boundary. [`UrlPolicy`] checks the scheme against an allow-list and
//! the host against a set of regex patterns before a draft is saved.

use regex::Regex;
use tracing::debug;

use crate::config::ContentConfig;
use crate::error::{Error, Result};

/// Splits `scheme://[userinfo@]host[:port]...`.
const URL_PATTERN: &str =
    r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.\-]*)://(?:[^@/?#]*@)?(?P<host>[^:/?#]+)";

/// Scheme and host validation for image URLs.
#[derive(Debug, Clone)]
pub struct UrlPolicy {
    enforce: bool,
    schemes: Vec<String>,
    hosts: Vec<Regex>,
    splitter: Regex,
}

impl UrlPolicy {
    /// Build a policy from the content configuration.
    ///
    /// Host patterns are matched against the whole lower-cased host.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a host pattern is not a valid regex.
    pub fn from_config(config: &ContentConfig) -> Result<Self> {
        let hosts = config
            .allowed_hosts
            .iter()
            .map(|pattern| {
                Regex::new(&format!("^(?:{pattern})$")).map_err(|_| Error::ConfigValidation {
                    message: format!("invalid host pattern: {pattern}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            enforce: config.enforce_url_policy,
            schemes: config
                .allowed_schemes
                .iter()
                .map(|s| s.to_ascii_lowercase())
                .collect(),
            hosts,
            splitter: Self::splitter(),
        })
    }

    /// A policy that accepts every URL.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            enforce: false,
            schemes: Vec::new(),
            hosts: Vec::new(),
            splitter: Self::splitter(),
        }
    }

    /// Whether URLs are checked at all.
    #[must_use]
    pub fn is_enforced(&self) -> bool {
        self.enforce
    }

    /// Check a single URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlRejected`] if the URL is malformed or its scheme
    /// or host is not allowed.
    pub fn check(&self, url: &str) -> Result<()> {
        if !self.enforce {
            return Ok(());
        }

        let url = url.trim();
        let captures = self
            .splitter
            .captures(url)
            .ok_or_else(|| Error::url_rejected(url, "not an absolute URL"))?;

        let scheme = captures["scheme"].to_ascii_lowercase();
        if !self.schemes.iter().any(|allowed| *allowed == scheme) {
            return Err(Error::url_rejected(
                url,
                format!("scheme '{scheme}' is not allowed"),
            ));
        }

        let host = captures["host"].to_ascii_lowercase();
        if !self.hosts.is_empty() && !self.hosts.iter().any(|re| re.is_match(&host)) {
            return Err(Error::url_rejected(
                url,
                format!("host '{host}' is not allowed"),
            ));
        }

        debug!(url, "URL accepted");
        Ok(())
    }

    /// Check every URL, stopping at the first rejection.
    ///
    /// # Errors
    ///
    /// Returns the first rejection.
    pub fn check_all<'a>(&self, urls: impl IntoIterator<Item = &'a str>) -> Result<()> {
        urls.into_iter().try_for_each(|url| self.check(url))
    }

    fn splitter() -> Regex {
        Regex::new(URL_PATTERN).expect("Invalid URL pattern")
    }
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self::permissive()
    }
}
