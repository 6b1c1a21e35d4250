pub mod analytics;
pub mod errors;
pub mod grammar;
pub mod labels;
pub mod payload;
pub mod records;
pub mod temporal;

// Re-exports
pub use analytics::{distributions, persona, report};
pub use errors::ReportError;
