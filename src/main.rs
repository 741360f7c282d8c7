mod billing;
mod error;
mod pdf;
mod report;

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use crate::billing::{aggregate, JsonTaskSource, TaskSource, TASKS_TEMPLATE};
use crate::error::{ReportError, Result};
use crate::report::layout::{format_currency, format_percent};
use crate::report::{default_filename, ReportRenderer};

#[derive(Parser)]
#[command(name = "relatorio")]
#[command(version, about = "Task-progress billing report generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the PDF billing report for a project
    Generate {
        /// Project identifier (positive number)
        #[arg(short, long, allow_hyphen_values = true)]
        project_id: String,

        /// Path to the tasks JSON file
        #[arg(short, long)]
        tasks: PathBuf,

        /// Output file path, or '-' to stream the PDF to stdout
        /// (default: relatorio_projeto_<id>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a project's line items as a terminal table
    Preview {
        /// Project identifier (positive number)
        #[arg(short, long, allow_hyphen_values = true)]
        project_id: String,

        /// Path to the tasks JSON file
        #[arg(short, long)]
        tasks: PathBuf,
    },

    /// Write an example tasks JSON file
    Sample {
        /// Output file path (default: tasks.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            project_id,
            tasks,
            output,
        } => cmd_generate(&project_id, &tasks, output),
        Commands::Preview { project_id, tasks } => cmd_preview(&project_id, &tasks),
        Commands::Sample { output } => cmd_sample(output),
    }
}

/// Parse and validate a project id: must be a positive integer
fn parse_project_id(input: &str) -> Result<u32> {
    match input.parse::<i64>() {
        Ok(id) if id > 0 && id <= i64::from(u32::MAX) => Ok(id as u32),
        _ => Err(ReportError::InvalidProjectId(input.to_string())),
    }
}

/// Generate the PDF report for a project
fn cmd_generate(project_id: &str, tasks_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let project_id = parse_project_id(project_id)?;
    let source = JsonTaskSource::from_path(tasks_path)?;

    let tasks = source.tasks_for_project(project_id)?;
    let result = aggregate(project_id, &tasks)?;
    let renderer = ReportRenderer::new();

    // '-' streams the document to stdout, nothing else is printed
    if output.as_deref() == Some(Path::new("-")) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        return renderer.render(&result, &mut lock);
    }

    let pdf_path = output.unwrap_or_else(|| PathBuf::from(default_filename(project_id)));
    let mut file = File::create(&pdf_path)?;
    renderer.render(&result, &mut file)?;

    println!("Generated report for project {project_id}");
    println!("  Tasks: {}", result.line_items.len());
    println!("  Total: R$ {}", format_currency(result.total));
    println!("  Saved: {}", pdf_path.display());

    Ok(())
}

// Table row struct for tabled
#[derive(Tabled)]
struct PreviewRow {
    #[tabled(rename = "TAREFA")]
    name: String,
    #[tabled(rename = "% INICIAL")]
    initial: String,
    #[tabled(rename = "% FINAL")]
    final_: String,
    #[tabled(rename = "DELTA %")]
    delta: String,
    #[tabled(rename = "VALOR (R$)")]
    value: String,
    #[tabled(rename = "A PAGAR (R$)")]
    amount: String,
}

/// Preview a project's line items without producing a PDF
fn cmd_preview(project_id: &str, tasks_path: &Path) -> Result<()> {
    let project_id = parse_project_id(project_id)?;
    let source = JsonTaskSource::from_path(tasks_path)?;

    let tasks = source.tasks_for_project(project_id)?;
    let result = aggregate(project_id, &tasks)?;

    let rows: Vec<PreviewRow> = result
        .line_items
        .iter()
        .map(|item| PreviewRow {
            name: item.task_name.clone(),
            initial: format!("{}%", format_percent(item.initial_percent)),
            final_: format!("{}%", format_percent(item.final_percent)),
            delta: format!("{}%", format_percent(item.delta_percent)),
            value: format_currency(item.value),
            amount: format_currency(item.amount_to_pay),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!();
    println!("Total a pagar: R$ {}", format_currency(result.total));

    Ok(())
}

/// Write an example tasks file
fn cmd_sample(output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| PathBuf::from("tasks.json"));
    if path.exists() {
        return Err(ReportError::OutputExists(path));
    }

    let mut file = File::create(&path)?;
    file.write_all(TASKS_TEMPLATE.as_bytes())?;

    println!("Wrote example tasks to: {}", path.display());
    println!();
    println!("Generate a report with:");
    println!("  relatorio generate --project-id 1 --tasks {}", path.display());

    Ok(())
}
