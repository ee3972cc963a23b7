//! Dashboard configuration
//!
//! Loaded from a TOML file; every field has a default so a missing file or
//! a partial file both work.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::auth::DEFAULT_DEMO_PASSWORD;
use crate::error::Result;
use crate::moderation::{ContentFilter, DEFAULT_BLOCKED_TERMS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusConfig {
    /// Database file name inside the data directory
    pub database_file: String,
    /// Fill empty collections with demo records on startup
    pub seed_demo_data: bool,
    /// Password accepted by the mock sign-in
    pub demo_password: String,
    /// Records previewed per dashboard card
    pub dashboard_preview: usize,
    /// Terms rejected in submitted feedback
    pub blocked_terms: Vec<String>,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_filter: Option<String>,
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            database_file: "campus.db".to_string(),
            seed_demo_data: true,
            demo_password: DEFAULT_DEMO_PASSWORD.to_string(),
            dashboard_preview: 3,
            blocked_terms: DEFAULT_BLOCKED_TERMS.iter().map(|t| t.to_string()).collect(),
            log_filter: None,
        }
    }
}

impl CampusConfig {
    /// Parse config from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load config from `path`, using defaults when the file does not exist
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn content_filter(&self) -> ContentFilter {
        ContentFilter::new(&self.blocked_terms)
    }
}
