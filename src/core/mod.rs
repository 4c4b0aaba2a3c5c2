pub mod engine;
pub mod processor;

pub use crate::domain::model::{
    CallOutcome, Record, RecordOutcome, RecordSet, RoleQueryResult, RunSummary,
};
pub use crate::domain::ports::RoleService;
pub use crate::utils::error::Result;
