//! Fixed text layout of the billing report.
//!
//! All strings are emitted exactly as the upstream system labels them
//! (pt-BR), with currency figures at two decimal places throughout.

use crate::billing::LineItem;

pub const TITLE_SIZE: f64 = 16.0;
pub const BODY_SIZE: f64 = 12.0;
pub const TOTAL_SIZE: f64 = 14.0;
pub const PAGE_MARGIN: f64 = 30.0;

pub const COLUMN_HEADER: &str =
    "Nome da Tarefa | % Inicial | % Final | Valor (R$) | A Pagar (R$)";

pub fn title(project_id: u32) -> String {
    format!("Relatório de Tarefas do Projeto {project_id}")
}

pub fn row(item: &LineItem) -> String {
    format!(
        "{} | {}% | {}% | R$ {} | R$ {}",
        item.task_name,
        format_percent(item.initial_percent),
        format_percent(item.final_percent),
        format_currency(item.value),
        format_currency(item.amount_to_pay),
    )
}

pub fn total_line(total: f64) -> String {
    format!("Total a pagar: R$ {}", format_currency(total))
}

/// Default output filename for a project report
pub fn default_filename(project_id: u32) -> String {
    format!("relatorio_projeto_{project_id}.pdf")
}

/// Two-decimal currency formatting.
///
/// Uses the standard library's float formatting: nearest representable
/// value, ties resolved toward even — the documented rounding mode for
/// every figure in the report, total included.
pub fn format_currency(value: f64) -> String {
    format!("{value:.2}")
}

/// Percent display: integral values print without a decimal point,
/// fractional values print trimmed (`50`, `12.5`)
pub fn format_percent(value: f64) -> String {
    format!("{value}")
}
