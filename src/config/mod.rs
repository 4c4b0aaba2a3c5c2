#[cfg(feature = "cli")]
pub mod cli;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_KEY_COLUMN: &str = "userid";
pub const DEFAULT_LOG_DIR: &str = "log";
pub const ZONEINFO_BASE: &str = "https://files.hornbill.com/instances";
/// Every remote call shares this ceiling.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for one run, built once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub api_key: String,
    pub instance_id: String,
    pub endpoint: Option<String>,
    pub zoneinfo_base: String,
    pub csv_file: PathBuf,
    pub key_column: String,
    pub debug: bool,
    pub dry_run: bool,
    pub timeout: Duration,
    pub log_dir: PathBuf,
    pub monitor: bool,
}

impl RunConfig {
    pub fn new(
        api_key: impl Into<String>,
        instance_id: impl Into<String>,
        csv_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            instance_id: instance_id.into(),
            endpoint: None,
            zoneinfo_base: ZONEINFO_BASE.to_string(),
            csv_file: csv_file.into(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            debug: true,
            dry_run: false,
            timeout: REQUEST_TIMEOUT,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            monitor: false,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_zoneinfo_base(mut self, zoneinfo_base: impl Into<String>) -> Self {
        self.zoneinfo_base = zoneinfo_base.into();
        self
    }

    pub fn with_key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = key_column.into();
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
