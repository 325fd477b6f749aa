#![forbid(unsafe_code)]

pub mod audit;
pub mod codec;
pub mod config;
pub mod error;
pub mod list;
pub mod pipeline;
pub mod verify;

// Re-exports: stable API surface
pub use audit::{AuditLog, TransformRecord};
pub use config::{FailurePolicy, Mode, RunConfig};
pub use error::{BzdirError, Result};
pub use pipeline::{BatchReport, RunOutcome, run};
pub use verify::{ComparisonResult, compare_dirs};
