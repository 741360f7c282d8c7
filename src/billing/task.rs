use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// Billing fields of a single task, as returned by the task source
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaskBillingRecord {
    pub name: String,
    pub initial_percent: f64,
    pub final_percent: f64,
    pub value: f64,
}

/// Read accessor for the tasks belonging to a project.
///
/// Implementations return the tasks in a stable listing order; that order
/// is preserved all the way into the rendered report. A project with no
/// tasks yields an empty `Vec`, not an error — distinguishing an unknown
/// project from an empty one is the source's concern, not the core's.
pub trait TaskSource {
    fn tasks_for_project(&self, project_id: u32) -> Result<Vec<TaskBillingRecord>>;
}

/// One row of the tasks file: a billing record tagged with its project
#[derive(Debug, Deserialize, Serialize)]
struct TaskRow {
    project_id: u32,
    #[serde(flatten)]
    task: TaskBillingRecord,
}

/// Task source backed by a JSON file holding an array of task rows
#[derive(Debug)]
pub struct JsonTaskSource {
    rows: Vec<TaskRow>,
}

impl JsonTaskSource {
    /// Load and validate a tasks file.
    ///
    /// Validation mirrors what the upstream schema enforces: non-empty
    /// task names and completion percents within [0, 100].
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReportError::TasksFileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let rows: Vec<TaskRow> = serde_json::from_str(&content).map_err(|e| {
            ReportError::TaskParse {
                path: PathBuf::from(path),
                source: e,
            }
        })?;

        for row in &rows {
            validate_task(&row.task)?;
        }

        Ok(Self { rows })
    }
}

impl TaskSource for JsonTaskSource {
    fn tasks_for_project(&self, project_id: u32) -> Result<Vec<TaskBillingRecord>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.project_id == project_id)
            .map(|r| r.task.clone())
            .collect())
    }
}

fn validate_task(task: &TaskBillingRecord) -> Result<()> {
    if task.name.trim().is_empty() {
        return Err(ReportError::InvalidTask {
            name: task.name.clone(),
            reason: "name must not be empty".to_string(),
        });
    }

    for (field, percent) in [
        ("initial_percent", task.initial_percent),
        ("final_percent", task.final_percent),
    ] {
        if !(0.0..=100.0).contains(&percent) || percent.is_nan() {
            return Err(ReportError::InvalidTask {
                name: task.name.clone(),
                reason: format!("{field} must be between 0 and 100 (got {percent})"),
            });
        }
    }

    Ok(())
}

/// Template content for an example tasks file
pub const TASKS_TEMPLATE: &str = r#"[
  {
    "project_id": 1,
    "name": "Fundação",
    "initial_percent": 0,
    "final_percent": 50,
    "value": 1000.00
  },
  {
    "project_id": 1,
    "name": "Alvenaria",
    "initial_percent": 30,
    "final_percent": 80,
    "value": 2500.00
  },
  {
    "project_id": 2,
    "name": "Pintura",
    "initial_percent": 0,
    "final_percent": 10,
    "value": 800.00
  }
]
"#;
