//! Generation surface: validate each container, run every emitter over it,
//! and aggregate per-container outcomes.
//!
//! A failing container does not suppress artifacts for its siblings; the
//! run report carries the good artifacts plus one entry per failure so the
//! orchestrator can print a single consolidated diagnostic at the end.
//! Emission itself is a pure function of (container, resolver table,
//! byte-order policy, layout); there is no shared mutable state between
//! containers.

use crate::emit_c;
use crate::emit_ts;
use crate::layout;
use crate::schema::{is_valid_identifier, Container, ResolvedConfig};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Which target artifact a generated file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    CHeader,
    CSource,
    TypeScript,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::CHeader => "c-header",
            ArtifactKind::CSource => "c-source",
            ArtifactKind::TypeScript => "typescript",
        }
    }
}

/// One generated file: name and full text content.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub kind: ArtifactKind,
    pub contents: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("duplicate item name `{item}` in container `{container}`")]
    DuplicateItem { container: String, item: String },
    #[error("invalid identifier `{name}` in container `{container}`")]
    InvalidIdentifier { container: String, name: String },
    #[error("array item `{item}` in container `{container}` requires length > 0")]
    BadArrayLength { container: String, item: String },
    #[error(
        "container `{container}` has wire size {size} bytes, exceeding the {limit}-byte limit",
        limit = layout::MAX_WIRE_SIZE
    )]
    ContainerTooLarge { container: String, size: u64 },
}

/// A container whose generation was skipped, with the reason.
#[derive(Debug)]
pub struct ContainerFailure {
    pub container: String,
    pub error: GenerateError,
}

/// Outcome of one generation run: artifacts for every well-formed
/// container, failures for the rest.
#[derive(Debug)]
pub struct RunReport {
    pub artifacts: Vec<Artifact>,
    pub failures: Vec<ContainerFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

fn check_container(container: &Container) -> Result<(), GenerateError> {
    if !is_valid_identifier(&container.name) {
        return Err(GenerateError::InvalidIdentifier {
            container: container.name.clone(),
            name: container.name.clone(),
        });
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for item in &container.items {
        if !seen.insert(item.name.as_str()) {
            return Err(GenerateError::DuplicateItem {
                container: container.name.clone(),
                item: item.name.clone(),
            });
        }
        if !is_valid_identifier(&item.name) {
            return Err(GenerateError::InvalidIdentifier {
                container: container.name.clone(),
                name: item.name.clone(),
            });
        }
        if item.is_array && item.length == 0 {
            return Err(GenerateError::BadArrayLength {
                container: container.name.clone(),
                item: item.name.clone(),
            });
        }
    }
    let size = layout::wire_size(container);
    if size > layout::MAX_WIRE_SIZE {
        return Err(GenerateError::ContainerTooLarge {
            container: container.name.clone(),
            size,
        });
    }
    Ok(())
}

/// Generate the full artifact set for one container: C header + source
/// (lowercased file names) and the TypeScript module (case preserved).
pub fn generate_container(container: &Container) -> Result<Vec<Artifact>, GenerateError> {
    check_container(container)?;
    let lower = container.name.to_lowercase();
    Ok(vec![
        Artifact {
            file_name: format!("{}.h", lower),
            kind: ArtifactKind::CHeader,
            contents: emit_c::emit_header(container),
        },
        Artifact {
            file_name: format!("{}.c", lower),
            kind: ArtifactKind::CSource,
            contents: emit_c::emit_source(container),
        },
        Artifact {
            file_name: format!("{}.ts", container.name),
            kind: ArtifactKind::TypeScript,
            contents: emit_ts::emit_module(container),
        },
    ])
}

/// Generate artifacts for every container in the config, collecting
/// per-container failures instead of aborting the run.
pub fn generate_config(resolved: &ResolvedConfig) -> RunReport {
    let mut artifacts = Vec::new();
    let mut failures = Vec::new();
    for container in resolved.containers() {
        match generate_container(container) {
            Ok(mut set) => artifacts.append(&mut set),
            Err(error) => failures.push(ContainerFailure {
                container: container.name.clone(),
                error,
            }),
        }
    }
    RunReport { artifacts, failures }
}

/// Write artifacts into `dir`, creating it if needed. Orchestrator glue;
/// the core itself never touches storage.
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    for artifact in artifacts {
        fs::write(dir.join(&artifact.file_name), &artifact.contents)?;
    }
    Ok(())
}
