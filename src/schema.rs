//! Schema model for container definitions: Config, Containers, Items.
//!
//! Built once from the parsed input document and read-only thereafter. Item
//! order within a container is wire order and every emitter must honor it.

use serde::Deserialize;
use std::collections::HashMap;

/// Root of the input document: an ordered list of container definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub containers: Vec<Container>,
}

/// One named, fixed-layout record definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<Item>,
}

/// One field of a container: typed, optionally array-valued, optionally
/// byte-order-tagged.
#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub name: String,
    /// Raw type tag from the document. Classified leniently via
    /// [`TypeTag::from_tag`]; unknown tags resolve to a sentinel type
    /// instead of failing generation.
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "byteOrder", default)]
    pub byte_order: ByteOrder,
    #[serde(default)]
    pub units: String,
    #[serde(rename = "isArray", default)]
    pub is_array: bool,
    /// Element count; meaningful only when `is_array` is true.
    #[serde(default)]
    pub length: u32,
}

impl Item {
    /// Lenient type classification; `None` for tags outside the fixed set.
    pub fn tag(&self) -> Option<TypeTag> {
        TypeTag::from_tag(&self.type_tag)
    }
}

/// Per-item byte order declaration. Declared per item, not per container,
/// so one record can mix fields captured from hardware of either endianness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Little,
    Big,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

/// The fixed set of item type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    Float,
    Double,
    Bool,
    Str,
}

impl TypeTag {
    /// Map a document type tag to its variant. Unknown tags return `None`
    /// and are resolved to a per-target sentinel downstream.
    pub fn from_tag(tag: &str) -> Option<TypeTag> {
        match tag {
            "uint8" => Some(TypeTag::U8),
            "uint16" => Some(TypeTag::U16),
            "uint32" => Some(TypeTag::U32),
            "uint64" => Some(TypeTag::U64),
            "int8" => Some(TypeTag::I8),
            "int16" => Some(TypeTag::I16),
            "int32" => Some(TypeTag::I32),
            "int64" => Some(TypeTag::I64),
            "float" => Some(TypeTag::Float),
            "double" => Some(TypeTag::Double),
            "bool" => Some(TypeTag::Bool),
            "string" => Some(TypeTag::Str),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Duplicate container name: {0}")]
    DuplicateContainer(String),
}

/// Resolved config: containers indexed by name.
///
/// Only config-level invariants are enforced here; per-container invariants
/// (unique item names, positive array lengths, identifier validity) are
/// checked during generation so one malformed container cannot suppress
/// artifacts for its siblings.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    containers_by_name: HashMap<String, usize>,
}

impl ResolvedConfig {
    pub fn resolve(config: Config) -> Result<Self, SchemaError> {
        let mut containers_by_name = HashMap::new();
        for (i, c) in config.containers.iter().enumerate() {
            if containers_by_name.insert(c.name.clone(), i).is_some() {
                return Err(SchemaError::DuplicateContainer(c.name.clone()));
            }
        }
        Ok(ResolvedConfig {
            config,
            containers_by_name,
        })
    }

    pub fn get_container(&self, name: &str) -> Option<&Container> {
        self.containers_by_name
            .get(name)
            .map(|&i| &self.config.containers[i])
    }

    pub fn containers(&self) -> &[Container] {
        &self.config.containers
    }
}

/// True if `name` is a usable identifier fragment in every target language
/// after case transforms: leading letter or underscore, then letters,
/// digits, underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
