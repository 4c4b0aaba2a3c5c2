use crate::config::{
    RunConfig, DEFAULT_KEY_COLUMN, DEFAULT_LOG_DIR, REQUEST_TIMEOUT, ZONEINFO_BASE,
};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_exists, validate_non_empty_string, validate_required_field, validate_url,
    Validate,
};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "role-remover")]
#[command(about = "Removes every role assigned to the users listed in a CSV file")]
#[command(disable_version_flag = true)]
pub struct CliConfig {
    #[arg(long = "api", help = "API Key")]
    pub api_key: Option<String>,

    #[arg(long = "instance", help = "Instance ID")]
    pub instance_id: Option<String>,

    #[arg(long = "file", help = "CSV File")]
    pub csv_file: Option<String>,

    #[arg(long, default_value = DEFAULT_KEY_COLUMN, help = "The header/fieldname in the CSV to use")]
    pub header: String,

    #[arg(long, default_value_t = true, action = ArgAction::Set, help = "Debug mode - additional logging")]
    pub debug: bool,

    #[arg(long = "dryrun", help = "Dry Run")]
    pub dry_run: bool,

    #[arg(long, help = "Return version and end")]
    pub version: bool,

    #[arg(long, help = "API base URL of the instance, skips the zone info lookup")]
    pub endpoint: Option<String>,

    #[arg(long, default_value = DEFAULT_LOG_DIR, help = "Directory for the run log")]
    pub log_dir: PathBuf,

    #[arg(long, help = "Log process CPU and memory usage")]
    pub monitor: bool,
}

impl Validate for CliConfig {
    /// Checks run in a fixed order so the first problem reported is stable.
    fn validate(&self) -> Result<()> {
        validate_required_field("CSV file", &self.csv_file)?;
        validate_required_field("API", &self.api_key)?;
        validate_required_field("Instance ID", &self.instance_id)?;
        if let Some(path) = &self.csv_file {
            validate_file_exists(path)?;
        }
        validate_non_empty_string("header", &self.header)?;
        if let Some(endpoint) = &self.endpoint {
            validate_url("endpoint", endpoint)?;
        }
        Ok(())
    }
}

impl CliConfig {
    pub fn into_run_config(self) -> Result<RunConfig> {
        self.validate()?;
        let api_key = validate_required_field("API", &self.api_key)?.to_string();
        let instance_id = validate_required_field("Instance ID", &self.instance_id)?.to_string();
        let csv_file = validate_required_field("CSV file", &self.csv_file)?.to_string();

        Ok(RunConfig {
            api_key,
            instance_id,
            endpoint: self.endpoint,
            zoneinfo_base: ZONEINFO_BASE.to_string(),
            csv_file: PathBuf::from(csv_file),
            key_column: self.header,
            debug: self.debug,
            dry_run: self.dry_run,
            timeout: REQUEST_TIMEOUT,
            log_dir: self.log_dir,
            monitor: self.monitor,
        })
    }
}
