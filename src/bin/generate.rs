//! Generate C and TypeScript codec artifacts from a container config.
//!
//! Usage:
//!   generate <config.json> [--out DIR]
//!
//! The config is expected to have passed JSON-Schema validation upstream;
//! this tool runs the semantic linter as its local gate and refuses to
//! generate when error-level findings exist. Artifacts land in the output
//! directory (default `generated`), one .h/.c/.ts triple per container.
//! A malformed container is reported and skipped; its siblings still
//! generate.

use anyhow::Context;
use cdlgen::lint::{lint, Severity};
use cdlgen::schema::ResolvedConfig;
use cdlgen::{generate_config, parse, write_artifacts};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let out_dir = if let Some(pos) = args.iter().position(|a| a == "--out") {
        args.remove(pos);
        if pos >= args.len() {
            anyhow::bail!("--out requires a directory argument");
        }
        PathBuf::from(args.remove(pos))
    } else {
        PathBuf::from("generated")
    };

    let config_path = match args.first() {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Usage: generate <config.json> [--out DIR]");
            return Ok(ExitCode::FAILURE);
        }
    };

    let source = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config file {}", config_path.display()))?;

    let config = parse(&source).context("failed to parse config")?;

    let findings = lint(&config);
    let mut has_lint_error = false;
    for m in &findings {
        let location = match &m.item {
            Some(item) => format!("{}.{}", m.container, item),
            None => m.container.clone(),
        };
        match m.severity {
            Severity::Error => {
                has_lint_error = true;
                tracing::error!("{}: {}", location, m.message);
            }
            Severity::Warning => tracing::warn!("{}: {}", location, m.message),
        }
    }
    if has_lint_error {
        anyhow::bail!("config has lint errors; no artifacts generated");
    }

    let resolved = ResolvedConfig::resolve(config).context("failed to resolve config")?;
    let report = generate_config(&resolved);

    write_artifacts(&out_dir, &report.artifacts)
        .with_context(|| format!("failed to write artifacts to {}", out_dir.display()))?;
    for artifact in &report.artifacts {
        tracing::info!(
            "generated {} ({}, {} bytes)",
            out_dir.join(&artifact.file_name).display(),
            artifact.kind.as_str(),
            artifact.contents.len()
        );
    }

    if !report.failures.is_empty() {
        for failure in &report.failures {
            tracing::error!("container `{}` skipped: {}", failure.container, failure.error);
        }
        tracing::error!(
            "{} container(s) failed, {} artifact(s) written",
            report.failures.len(),
            report.artifacts.len()
        );
        return Ok(ExitCode::FAILURE);
    }

    tracing::info!("code generation completed successfully");
    Ok(ExitCode::SUCCESS)
}
