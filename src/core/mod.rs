// Public modules
pub mod error;
pub mod locate;
pub mod migrate;
pub mod rules;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use migrate::{FileOutcome, MigrateResult, MigrateSummary};
