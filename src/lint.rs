//! Linter for parsed container configs: structural rules the generator
//! relies on, reported with severities instead of hard failures.
//!
//! ## Rules
//!
//! - **Unique names**: container names unique in the config, item names
//!   unique within their container (errors).
//! - **Identifiers**: names must survive case transforms in every target
//!   language, so letters/digits/underscores only (error).
//! - **Array lengths**: `isArray` requires `length > 0` (error).
//! - **Unknown type tags**: generation continues with a sentinel type, but
//!   the field will not travel on the wire (warning).
//! - **String arrays**: unsupported, silently omitted from the wire format
//!   by both emitters (warning).
//! - **Empty containers**: legal but produce zero-size codecs (warning).
//! - **Wire size limit**: total container size must fit the `int` return
//!   of the generated C codecs (error).
//!
//! Run via the `lint_config` binary: `lint_config config.json` or piped:
//! `lint_config < config.json`. Exit code 1 if any error-level findings.

use crate::layout;
use crate::schema::{is_valid_identifier, Config, TypeTag};
use std::collections::HashSet;

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Identifies which rule produced the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintRule {
    /// Container names must be unique within the config.
    DuplicateContainerName,
    /// Item names must be unique within their container.
    DuplicateItemName,
    /// Names must be valid identifier fragments in every target language.
    InvalidIdentifier,
    /// `length` must be positive when `isArray` is set.
    ArrayLengthNotPositive,
    /// Type tag outside the fixed set; resolves to a sentinel type.
    UnknownTypeTag,
    /// Arrays of strings are omitted from the wire format.
    StringArrayUnsupported,
    /// Container with no items.
    EmptyContainer,
    /// Total wire size past what the generated codecs can report.
    WireSizeExceedsLimit,
}

/// A single lint message with its location in the config.
#[derive(Debug, Clone)]
pub struct LintMessage {
    pub container: String,
    pub item: Option<String>,
    pub rule: LintRule,
    pub severity: Severity,
    pub message: String,
}

/// Run all lint rules on a parsed config. Returns messages in container
/// order, items in declaration order.
pub fn lint(config: &Config) -> Vec<LintMessage> {
    let mut out = Vec::new();
    let mut seen_containers: HashSet<&str> = HashSet::new();

    for container in &config.containers {
        if !seen_containers.insert(container.name.as_str()) {
            out.push(LintMessage {
                container: container.name.clone(),
                item: None,
                rule: LintRule::DuplicateContainerName,
                severity: Severity::Error,
                message: format!("duplicate container name `{}`", container.name),
            });
        }
        if !is_valid_identifier(&container.name) {
            out.push(LintMessage {
                container: container.name.clone(),
                item: None,
                rule: LintRule::InvalidIdentifier,
                severity: Severity::Error,
                message: format!("container name `{}` is not a valid identifier", container.name),
            });
        }
        if container.items.is_empty() {
            out.push(LintMessage {
                container: container.name.clone(),
                item: None,
                rule: LintRule::EmptyContainer,
                severity: Severity::Warning,
                message: "container has no items; codecs will be zero-size".to_string(),
            });
        }

        let mut seen_items: HashSet<&str> = HashSet::new();
        for item in &container.items {
            if !seen_items.insert(item.name.as_str()) {
                out.push(LintMessage {
                    container: container.name.clone(),
                    item: Some(item.name.clone()),
                    rule: LintRule::DuplicateItemName,
                    severity: Severity::Error,
                    message: format!("duplicate item name `{}`", item.name),
                });
            }
            if !is_valid_identifier(&item.name) {
                out.push(LintMessage {
                    container: container.name.clone(),
                    item: Some(item.name.clone()),
                    rule: LintRule::InvalidIdentifier,
                    severity: Severity::Error,
                    message: format!("item name `{}` is not a valid identifier", item.name),
                });
            }
            if item.is_array && item.length == 0 {
                out.push(LintMessage {
                    container: container.name.clone(),
                    item: Some(item.name.clone()),
                    rule: LintRule::ArrayLengthNotPositive,
                    severity: Severity::Error,
                    message: "array item requires length > 0".to_string(),
                });
            }
            match item.tag() {
                None => {
                    out.push(LintMessage {
                        container: container.name.clone(),
                        item: Some(item.name.clone()),
                        rule: LintRule::UnknownTypeTag,
                        severity: Severity::Warning,
                        message: format!(
                            "unknown type tag `{}`; resolved to a sentinel type and omitted from the wire",
                            item.type_tag
                        ),
                    });
                }
                Some(TypeTag::Str) if item.is_array => {
                    out.push(LintMessage {
                        container: container.name.clone(),
                        item: Some(item.name.clone()),
                        rule: LintRule::StringArrayUnsupported,
                        severity: Severity::Warning,
                        message: "arrays of strings are unsupported and omitted from the wire"
                            .to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        let size = layout::wire_size(container);
        if size > layout::MAX_WIRE_SIZE {
            out.push(LintMessage {
                container: container.name.clone(),
                item: None,
                rule: LintRule::WireSizeExceedsLimit,
                severity: Severity::Error,
                message: format!(
                    "wire size {} bytes exceeds the {}-byte limit",
                    size,
                    layout::MAX_WIRE_SIZE
                ),
            });
        }
    }

    out
}
