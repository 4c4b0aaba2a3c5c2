use crate::adapters::csv_loader::CsvLoader;
use crate::adapters::role_service::XmlmcRoleService;
use crate::adapters::xmlmc::XmlmcSession;
use crate::config::RunConfig;
use crate::core::processor::BatchProcessor;
use crate::core::{RecordSet, RoleService, RunSummary};
use crate::utils::error::Result;
use crate::utils::monitor::ResourceMonitor;

pub struct RemovalEngine {
    config: RunConfig,
    show_progress: bool,
}

impl RemovalEngine {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Loads the batch, then opens the remote session. A bad CSV file stops
    /// the run before anything is sent.
    pub async fn run(&self) -> Result<RunSummary> {
        let mut monitor = ResourceMonitor::new(self.config.monitor);

        let records = self.load()?;
        monitor.log_stats("Load");

        let session = XmlmcSession::connect(&self.config).await?;
        let summary = self
            .process_with(XmlmcRoleService::new(session), &records)
            .await;
        monitor.log_stats("Process");
        Ok(summary)
    }

    pub fn load(&self) -> Result<RecordSet> {
        CsvLoader::new(self.config.key_column.as_str()).load(&self.config.csv_file)
    }

    pub async fn process_with<R: RoleService>(&self, service: R, records: &RecordSet) -> RunSummary {
        if self.config.dry_run {
            tracing::info!("Dry run: role removals will not be sent");
        }

        let summary = BatchProcessor::from_config(service, &self.config)
            .with_progress(self.show_progress)
            .process(records)
            .await;
        tracing::info!("{}", summary);
        summary
    }
}
