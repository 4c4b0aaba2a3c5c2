use crate::config::RunConfig;
use crate::core::{CallOutcome, RecordOutcome, RecordSet, RoleService, RunSummary};
use crate::utils::progress::ProgressTracker;

/// Runs the fetch-then-remove workflow over a batch, one user at a time.
pub struct BatchProcessor<R: RoleService> {
    service: R,
    key_column: String,
    show_progress: bool,
}

impl<R: RoleService> BatchProcessor<R> {
    pub fn new(service: R, key_column: impl Into<String>) -> Self {
        Self {
            service,
            key_column: key_column.into(),
            show_progress: false,
        }
    }

    pub fn from_config(service: R, config: &RunConfig) -> Self {
        Self::new(service, config.key_column.clone())
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn service(&self) -> &R {
        &self.service
    }

    /// Never fails: each user's result is logged and counted, then the next one runs.
    pub async fn process(&self, records: &RecordSet) -> RunSummary {
        let count = records.len();
        tracing::info!("{} users to process", count);

        let mut summary = RunSummary::default();
        let mut progress = ProgressTracker::new(count, self.show_progress);

        for record in records {
            let user_id = record.get(&self.key_column).unwrap_or_default();
            summary.record(self.process_user(user_id).await);
            progress.advance(1);
        }

        progress.finish("Users Processed");
        tracing::debug!("Finished Processing Users");
        summary.elapsed = progress.elapsed();
        summary
    }

    pub async fn process_user(&self, user_id: &str) -> RecordOutcome {
        let query = self.service.get_roles(user_id).await;
        if !query.is_ok() || query.roles.is_empty() {
            tracing::info!("Skipped Role Removal: {} ({})", user_id, query.roles.len());
            return RecordOutcome::Skipped;
        }

        match self.service.remove_roles(user_id, &query.roles).await {
            CallOutcome::Success => {
                tracing::info!("Roles Removed for {}", user_id);
                RecordOutcome::Removed
            }
            // Dry-run removals keep the failure wording in the log.
            CallOutcome::DryRun => {
                tracing::error!("Failed Role Removal: {}", user_id);
                RecordOutcome::RemovalSuppressed
            }
            CallOutcome::Failed(_) => {
                tracing::error!("Failed Role Removal: {}", user_id);
                RecordOutcome::RemovalFailed
            }
        }
    }
}
