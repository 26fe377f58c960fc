//! Parse an input document (JSON) into the schema model.
//!
//! The document is expected to have passed JSON-Schema validation upstream;
//! this module only maps JSON into [`Config`] and applies config-level
//! resolution.

use crate::schema::{Config, ResolvedConfig, SchemaError};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Schema: {0}")]
    Schema(#[from] SchemaError),
}

/// Parse document source into a config.
pub fn parse(source: &str) -> Result<Config, ParseError> {
    let config: Config = serde_json::from_str(source)?;
    Ok(config)
}

/// Parse and resolve in one step; rejects duplicate container names.
pub fn parse_resolved(source: &str) -> Result<ResolvedConfig, ParseError> {
    let config = parse(source)?;
    Ok(ResolvedConfig::resolve(config)?)
}
