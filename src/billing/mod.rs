mod aggregator;
mod task;

pub use aggregator::{aggregate, generate_report, LineItem, ReportResult};
pub use task::{JsonTaskSource, TaskBillingRecord, TaskSource, TASKS_TEMPLATE};
