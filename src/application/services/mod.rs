pub mod reports;

pub use reports::{EmptyPercent, ReportConfig, ReportService, make_empty_report};
