//! Run configuration assembled from CLI flags and prompts.

use crate::Result;
use crate::error::TabRotateError;
use crate::security::Credentials;
use std::fmt;
use std::time::Duration;
use url::Url;

/// REST API version used when server discovery is unavailable.
pub const DEFAULT_API_VERSION: &str = "3.4";

/// Page size requested from list endpoints unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size Tableau Server accepts.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Default per-request HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Which fields of each Oracle data source get rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Owner and connection credentials
    Both,
    /// Connection credentials only
    Conn,
}

impl UpdateMode {
    /// Whether this mode changes data source ownership.
    pub const fn changes_owner(self) -> bool {
        matches!(self, Self::Both)
    }

    /// Flag value as typed on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Conn => "conn",
        }
    }
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-secret settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL of the Tableau Server, without the `/api` suffix
    pub server: Url,
    /// Site content URL; empty for the default site
    pub site: String,
    /// What to update
    pub mode: UpdateMode,
    /// Explicit REST API version, skipping discovery
    pub api_version: Option<String>,
    /// Page size for list endpoints
    pub page_size: u32,
    /// Per-request HTTP timeout
    pub timeout: Duration,
}

impl RunConfig {
    /// Validates raw CLI values into a run configuration.
    ///
    /// # Errors
    /// Returns a configuration error if the server URL is not an absolute
    /// http(s) URL, the page size is outside `1..=1000`, or the API version
    /// is not of the form `major.minor`.
    pub fn new(server: &str, site: impl Into<String>, mode: UpdateMode) -> Result<Self> {
        let mut server = Url::parse(server).map_err(|e| {
            TabRotateError::configuration(format!("Invalid Tableau Server URL: {e}"))
        })?;

        if !matches!(server.scheme(), "http" | "https") {
            return Err(TabRotateError::configuration(format!(
                "Unsupported URL scheme '{}', expected http or https",
                server.scheme()
            )));
        }
        if server.cannot_be_a_base() || server.host_str().is_none() {
            return Err(TabRotateError::configuration(
                "Tableau Server URL must include a host",
            ));
        }

        // Normalise to a trailing slash so `join` appends instead of replacing.
        if !server.path().ends_with('/') {
            let path = format!("{}/", server.path());
            server.set_path(&path);
        }

        Ok(Self {
            server,
            site: site.into(),
            mode,
            api_version: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Pins the REST API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        let valid = version
            .split_once('.')
            .is_some_and(|(major, minor)| {
                !major.is_empty()
                    && !minor.is_empty()
                    && major.chars().all(|c| c.is_ascii_digit())
                    && minor.chars().all(|c| c.is_ascii_digit())
            });
        if !valid {
            return Err(TabRotateError::configuration(format!(
                "Invalid API version '{version}', expected MAJOR.MINOR"
            )));
        }
        self.api_version = Some(version);
        Ok(self)
    }

    /// Sets the list page size.
    pub fn with_page_size(mut self, page_size: u32) -> Result<Self> {
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(TabRotateError::configuration(format!(
                "Page size {page_size} is outside 1..={MAX_PAGE_SIZE}"
            )));
        }
        self.page_size = page_size;
        Ok(self)
    }

    /// Sets the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Secrets gathered interactively before sign-in.
#[derive(Debug, Clone)]
pub struct RunCredentials {
    /// Tableau Server account used to sign in
    pub server: Credentials,
    /// Name of the user who should own every Oracle data source
    pub new_owner: Option<String>,
    /// Database account embedded into each Oracle connection
    pub connection: Credentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_mode_flags() {
        assert!(UpdateMode::Both.changes_owner());
        assert!(!UpdateMode::Conn.changes_owner());
        assert_eq!(UpdateMode::Conn.to_string(), "conn");
    }

    #[test]
    fn test_run_config_normalises_trailing_slash() {
        let config = RunConfig::new("https://tableau.example.com", "finance", UpdateMode::Conn)
            .unwrap();
        assert_eq!(config.server.as_str(), "https://tableau.example.com/");

        let config = RunConfig::new("https://example.com/tableau", "", UpdateMode::Conn).unwrap();
        assert_eq!(config.server.as_str(), "https://example.com/tableau/");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.api_version.is_none());
    }

    #[test]
    fn test_run_config_rejects_bad_urls() {
        assert!(RunConfig::new("tableau.example.com", "s", UpdateMode::Conn).is_err());
        assert!(RunConfig::new("ftp://tableau.example.com", "s", UpdateMode::Conn).is_err());
        assert!(RunConfig::new("mailto:admin@example.com", "s", UpdateMode::Conn).is_err());
    }

    #[test]
    fn test_run_config_page_size_bounds() {
        let config = RunConfig::new("https://t.example.com", "s", UpdateMode::Both).unwrap();
        assert!(config.clone().with_page_size(0).is_err());
        assert!(config.clone().with_page_size(1001).is_err());
        assert_eq!(config.with_page_size(1000).unwrap().page_size, 1000);
    }

    #[test]
    fn test_run_config_api_version() {
        let config = RunConfig::new("https://t.example.com", "s", UpdateMode::Both).unwrap();
        assert!(config.clone().with_api_version("3").is_err());
        assert!(config.clone().with_api_version("3.x").is_err());
        assert!(config.clone().with_api_version(".4").is_err());
        let config = config.with_api_version("3.19").unwrap();
        assert_eq!(config.api_version.as_deref(), Some("3.19"));
    }
}
