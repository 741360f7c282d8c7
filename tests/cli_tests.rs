use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn relatorio_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("relatorio"))
}

fn write_sample(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("tasks.json");
    relatorio_cmd()
        .args(["sample", "--output", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote example tasks"));
    path
}

#[test]
fn test_help() {
    relatorio_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Task-progress billing report generator",
        ));
}

#[test]
fn test_version() {
    relatorio_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("relatorio"));
}

#[test]
fn test_sample_creates_tasks_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_sample(&temp_dir);

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("project_id"));
    assert!(content.contains("initial_percent"));
}

#[test]
fn test_sample_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_sample(&temp_dir);

    relatorio_cmd()
        .args(["sample", "--output", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_generate_default_filename() {
    let temp_dir = TempDir::new().unwrap();
    let tasks = write_sample(&temp_dir);

    relatorio_cmd()
        .current_dir(temp_dir.path())
        .args(["generate", "--project-id", "1", "--tasks", tasks.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated report for project 1"))
        .stdout(predicate::str::contains("Tasks: 2"))
        .stdout(predicate::str::contains("Total: R$ 1750.00"));

    let pdf = fs::read(temp_dir.path().join("relatorio_projeto_1.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));
}

#[test]
fn test_generate_custom_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let tasks = write_sample(&temp_dir);
    let out = temp_dir.path().join("report.pdf");

    relatorio_cmd()
        .args([
            "generate",
            "--project-id",
            "2",
            "--tasks",
            tasks.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(out.to_str().unwrap()));

    assert!(fs::read(&out).unwrap().starts_with(b"%PDF-1.4"));
}

#[test]
fn test_generate_streams_pdf_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let tasks = write_sample(&temp_dir);

    let output = relatorio_cmd()
        .args([
            "generate",
            "--project-id",
            "1",
            "--tasks",
            tasks.to_str().unwrap(),
            "--output",
            "-",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.starts_with(b"%PDF-1.4"));
    assert!(output.stdout.ends_with(b"%%EOF\n"));
}

#[test]
fn test_generate_project_without_tasks() {
    let temp_dir = TempDir::new().unwrap();
    let tasks = write_sample(&temp_dir);

    relatorio_cmd()
        .args(["generate", "--project-id", "99", "--tasks", tasks.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "No billable tasks found for project 99",
        ));

    // No document is produced for an empty project
    assert!(!temp_dir.path().join("relatorio_projeto_99.pdf").exists());
}

#[test]
fn test_generate_invalid_project_id() {
    let temp_dir = TempDir::new().unwrap();
    let tasks = write_sample(&temp_dir);

    for bad_id in ["0", "-3", "abc"] {
        relatorio_cmd()
            .args(["generate", "--project-id", bad_id, "--tasks", tasks.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid project id"));
    }
}

#[test]
fn test_generate_missing_tasks_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.json");

    relatorio_cmd()
        .args(["generate", "--project-id", "1", "--tasks", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tasks file not found"));
}

#[test]
fn test_generate_malformed_tasks_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.json");
    fs::write(&path, "{ not json").unwrap();

    relatorio_cmd()
        .args(["generate", "--project-id", "1", "--tasks", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse tasks file"));
}

#[test]
fn test_generate_rejects_out_of_range_percent() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.json");
    fs::write(
        &path,
        r#"[{"project_id": 1, "name": "Telhado", "initial_percent": 0, "final_percent": 150, "value": 100.0}]"#,
    )
    .unwrap();

    relatorio_cmd()
        .args(["generate", "--project-id", "1", "--tasks", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid task 'Telhado'"));
}

#[test]
fn test_preview_table_and_total() {
    let temp_dir = TempDir::new().unwrap();
    let tasks = write_sample(&temp_dir);

    relatorio_cmd()
        .args(["preview", "--project-id", "1", "--tasks", tasks.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("TAREFA"))
        .stdout(predicate::str::contains("A PAGAR (R$)"))
        .stdout(predicate::str::contains("Fundação"))
        .stdout(predicate::str::contains("Alvenaria"))
        .stdout(predicate::str::contains("Total a pagar: R$ 1750.00"));
}

#[test]
fn test_preview_clamps_negative_delta() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tasks.json");
    fs::write(
        &path,
        r#"[
  {"project_id": 5, "name": "A", "initial_percent": 0, "final_percent": 100, "value": 200.0},
  {"project_id": 5, "name": "B", "initial_percent": 30, "final_percent": 20, "value": 500.0}
]"#,
    )
    .unwrap();

    relatorio_cmd()
        .args(["preview", "--project-id", "5", "--tasks", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00"))
        .stdout(predicate::str::contains("Total a pagar: R$ 200.00"));
}
