use serde::Serialize;
use std::io::Write;

use crate::billing::{TaskBillingRecord, TaskSource};
use crate::error::{ReportError, Result};
use crate::report::ReportRenderer;

/// A single task's row in the billing report
#[derive(Debug, Clone, Serialize)]
pub struct LineItem {
    pub task_name: String,
    pub initial_percent: f64,
    pub final_percent: f64,
    pub value: f64,
    /// Completion progress within the billing period, clamped at zero
    pub delta_percent: f64,
    /// Fraction of the task value earned for the period, full precision.
    /// Rounding to 2 decimals happens only at render time.
    pub amount_to_pay: f64,
}

/// Aggregated billing data for one project, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct ReportResult {
    pub project_id: u32,
    pub line_items: Vec<LineItem>,
    /// Sum of all line amounts at full precision (sum-then-round)
    pub total: f64,
}

/// Compute the payable amount per task and the project total.
///
/// Negative progress (final below initial, e.g. a data correction) is
/// clamped to zero rather than producing negative billing. Input order is
/// preserved. An empty task list fails with [`ReportError::EmptyInput`]:
/// a zero-item report has no useful meaning to a caller, so the condition
/// is surfaced instead of rendering a degenerate document.
pub fn aggregate(project_id: u32, tasks: &[TaskBillingRecord]) -> Result<ReportResult> {
    if tasks.is_empty() {
        return Err(ReportError::EmptyInput(project_id));
    }

    let mut line_items = Vec::with_capacity(tasks.len());
    let mut total = 0.0f64;

    for task in tasks {
        let delta_percent = (task.final_percent - task.initial_percent).max(0.0);
        let amount_to_pay = delta_percent / 100.0 * task.value;
        total += amount_to_pay;

        line_items.push(LineItem {
            task_name: task.name.clone(),
            initial_percent: task.initial_percent,
            final_percent: task.final_percent,
            value: task.value,
            delta_percent,
            amount_to_pay,
        });
    }

    Ok(ReportResult {
        project_id,
        line_items,
        total,
    })
}

/// Fetch, aggregate and render a project report into `sink`.
///
/// This is the whole pipeline as one call: the source resolves the task
/// list, [`aggregate`] computes the line items, and the renderer streams
/// the PDF document into the sink.
pub fn generate_report<S: TaskSource, W: Write>(
    source: &S,
    project_id: u32,
    sink: &mut W,
) -> Result<()> {
    let tasks = source.tasks_for_project(project_id)?;
    let result = aggregate(project_id, &tasks)?;
    ReportRenderer::new().render(&result, sink)
}
