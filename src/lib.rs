pub mod billing;
pub mod error;
pub mod pdf;
pub mod report;

pub use billing::{
    aggregate, generate_report, JsonTaskSource, LineItem, ReportResult, TaskBillingRecord,
    TaskSource,
};
pub use error::{ReportError, Result};
pub use report::ReportRenderer;
