use std::sync::Arc;
use std::time::Duration;

/// One CSV data row, keyed by the header row's column names in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    pub(crate) fn new(headers: Arc<[String]>, values: Vec<String>) -> Self {
        debug_assert_eq!(headers.len(), values.len());
        Self { headers, values }
    }

    /// Value for `column`. Duplicate header names resolve to the last one.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .rposition(|h| h == column)
            .map(|i| self.values[i].as_str())
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All records of one batch, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    pub(crate) fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Result of a single remote call as seen by the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success,
    /// Mutating call suppressed because the run is a dry run.
    DryRun,
    Failed(String),
}

impl CallOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, CallOutcome::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CallOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleQueryResult {
    pub roles: Vec<String>,
    pub outcome: CallOutcome,
}

impl RoleQueryResult {
    pub fn found(roles: Vec<String>) -> Self {
        Self {
            roles,
            outcome: CallOutcome::Success,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            roles: Vec::new(),
            outcome: CallOutcome::Failed(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&str> {
        self.outcome.error()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Removed,
    RemovalFailed,
    RemovalSuppressed,
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub removed: usize,
    pub failed: usize,
    pub suppressed: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn record(&mut self, outcome: RecordOutcome) {
        self.total += 1;
        match outcome {
            RecordOutcome::Removed => self.removed += 1,
            RecordOutcome::RemovalFailed => self.failed += 1,
            RecordOutcome::RemovalSuppressed => self.suppressed += 1,
            RecordOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Records that reached the removal step, whatever its result.
    pub fn processed(&self) -> usize {
        self.removed + self.failed + self.suppressed
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} users: {} processed ({} removed, {} failed, {} dry run), {} skipped",
            self.total,
            self.processed(),
            self.removed,
            self.failed,
            self.suppressed,
            self.skipped
        )
    }
}
