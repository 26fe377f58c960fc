//! # cdlgen — container definition compiler
//!
//! Turns a declarative JSON description of fixed-layout binary records
//! ("containers" made of typed "items") into per-target codec source:
//! a type definition, a default-value constructor, and byte-exact
//! serialize/deserialize routines for C and TypeScript. Artifacts emitted
//! for different targets agree field-for-field and byte-for-byte on wire
//! layout, endianness and defaults, so the generated code can exchange the
//! same binary buffers across language boundaries (embedded C firmware and
//! a TypeScript front end, for example).
//!
//! ## Input document
//!
//! ```json
//! { "containers": [
//!   { "name": "Telemetry", "description": "Sample record",
//!     "items": [
//!       { "name": "temp", "type": "int16", "description": "Temperature",
//!         "byteOrder": "big", "units": "degC", "isArray": false, "length": 0 },
//!       { "name": "flags", "type": "uint8", "description": "",
//!         "byteOrder": "", "units": "", "isArray": true, "length": 4 }
//!     ] } ] }
//! ```
//!
//! ## Usage
//!
//! ```
//! use cdlgen::{generate_config, parse_resolved};
//!
//! let resolved = parse_resolved(r#"{"containers": [
//!     {"name": "Telemetry", "items": [{"name": "temp", "type": "int16"}]}
//! ]}"#).expect("parse");
//! let report = generate_config(&resolved);
//! assert!(report.is_success());
//! assert_eq!(report.artifacts.len(), 3);
//! ```
//!
//! Known limitations, preserved from the wire format's definition: string
//! payload content is not transported (TypeScript reserves a 4-byte
//! placeholder; C writes null-terminated bytes and deserializes a borrowed
//! pointer), and arrays of strings are omitted from the wire entirely.

pub mod emit_c;
pub mod emit_ts;
pub mod endian;
pub mod generate;
pub mod layout;
pub mod lint;
pub mod parser;
pub mod resolver;
pub mod schema;

pub use generate::{generate_config, generate_container, write_artifacts, Artifact, ArtifactKind, RunReport};
pub use layout::wire_size;
pub use parser::{parse, parse_resolved, ParseError};
pub use resolver::Target;
pub use schema::{ByteOrder, Config, Container, Item, ResolvedConfig, TypeTag};
