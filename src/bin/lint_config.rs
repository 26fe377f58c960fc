//! Lint container config files: duplicate names, identifier validity,
//! array lengths, unknown type tags.
//!
//! Usage:
//!   lint_config [OPTIONS] [config.json ...]
//!   lint_config < config.json
//!
//! Options:
//!   --human, -H  Human-readable output
//!
//! If no files are given, reads from stdin. Exit code 1 if any error-level
//! findings (warnings alone do not fail the run).

use cdlgen::lint::{lint, LintMessage, LintRule, Severity};
use cdlgen::parse;
use std::io::{self, Read};

fn rule_id(rule: LintRule) -> &'static str {
    match rule {
        LintRule::DuplicateContainerName => "duplicate-container-name",
        LintRule::DuplicateItemName => "duplicate-item-name",
        LintRule::InvalidIdentifier => "invalid-identifier",
        LintRule::ArrayLengthNotPositive => "array-length-not-positive",
        LintRule::UnknownTypeTag => "unknown-type-tag",
        LintRule::StringArrayUnsupported => "string-array-unsupported",
        LintRule::EmptyContainer => "empty-container",
        LintRule::WireSizeExceedsLimit => "wire-size-exceeds-limit",
    }
}

fn print_message(path: &str, m: &LintMessage, style: OutputStyle) {
    let severity_str = match m.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    let location = match &m.item {
        Some(item) => format!("{}.{}", m.container, item),
        None => m.container.clone(),
    };
    match style {
        OutputStyle::Compact => {
            println!(
                "{}:{}: {}: {} [{}]",
                path,
                location,
                severity_str,
                m.message,
                rule_id(m.rule)
            );
        }
        OutputStyle::Human => {
            println!("  {} {}: {}", path, location, m.message);
            println!("    rule: {}", rule_id(m.rule));
        }
    }
}

#[derive(Clone, Copy)]
enum OutputStyle {
    Compact,
    Human,
}

fn lint_source(path: &str, source: &str, style: OutputStyle) -> Result<(usize, usize), String> {
    let config = parse(source).map_err(|e| format!("{}: {}", path, e))?;
    let messages = lint(&config);
    let mut errors = 0usize;
    let mut warnings = 0usize;
    for m in &messages {
        match m.severity {
            Severity::Error => errors += 1,
            Severity::Warning => warnings += 1,
        }
        print_message(path, m, style);
    }
    Ok((errors, warnings))
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let style = if let Some(pos) = args.iter().position(|a| a == "--human" || a == "-H") {
        args.remove(pos);
        OutputStyle::Human
    } else {
        OutputStyle::Compact
    };

    let mut has_error = false;
    let mut total_warnings = 0usize;
    let mut total_errors = 0usize;

    if args.is_empty() {
        let mut src = String::new();
        io::stdin().read_to_string(&mut src)?;
        match lint_source("<stdin>", &src, style) {
            Ok((errors, warnings)) => {
                total_errors += errors;
                total_warnings += warnings;
                has_error |= errors > 0;
            }
            Err(e) => {
                eprintln!("{}", e);
                has_error = true;
            }
        }
    } else {
        for path in &args {
            let src = match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    has_error = true;
                    continue;
                }
            };
            match lint_source(path, &src, style) {
                Ok((errors, warnings)) => {
                    total_errors += errors;
                    total_warnings += warnings;
                    has_error |= errors > 0;
                }
                Err(e) => {
                    eprintln!("{}", e);
                    has_error = true;
                }
            }
        }
    }

    if total_errors > 0 || total_warnings > 0 {
        eprintln!(
            "lint: {} error(s), {} warning(s)",
            total_errors, total_warnings
        );
    }
    if has_error {
        std::process::exit(1);
    }
    Ok(())
}
