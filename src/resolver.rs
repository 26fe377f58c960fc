//! Type resolver: one dispatch table keyed by type tag, consulted by every
//! emitter so per-type decisions cannot diverge between targets.
//!
//! Each row carries the concrete type names, the fixed wire size, the
//! default-value literals, the TypeScript `DataView` accessor pair, and the
//! C swap helper for big-endian fields. Byte sizes are fixed per tag
//! regardless of target; `string` carries a sentinel handle size because its
//! payload is not inlined in the fixed layout.

use crate::schema::TypeTag;

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    C,
    TypeScript,
}

/// Emission strategy for one type tag.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    pub c_name: &'static str,
    pub ts_name: &'static str,
    /// Fixed wire size in bytes of one element.
    pub size: u32,
    pub c_default: &'static str,
    pub ts_default: &'static str,
    /// `DataView` accessor pair, e.g. `getUint16`/`setUint16`.
    pub ts_read: &'static str,
    pub ts_write: &'static str,
    /// C swap expression helper for big-endian fields; `None` when the type
    /// never swaps (single byte, bool, string).
    pub c_swap: Option<&'static str>,
}

/// Sentinel row for tags outside the fixed set: `void`/`any` type names,
/// zero wire size (the field is omitted from the wire by both emitters).
pub const UNKNOWN_ENTRY: TypeEntry = TypeEntry {
    c_name: "void",
    ts_name: "any",
    size: 0,
    c_default: "0",
    ts_default: "null",
    ts_read: "getUint8",
    ts_write: "setUint8",
    c_swap: None,
};

/// Look up the emission strategy for a tag; `None` maps to the sentinel.
pub fn entry(tag: Option<TypeTag>) -> &'static TypeEntry {
    match tag {
        Some(TypeTag::U8) => &TypeEntry {
            c_name: "uint8_t",
            ts_name: "number",
            size: 1,
            c_default: "0",
            ts_default: "0",
            ts_read: "getUint8",
            ts_write: "setUint8",
            c_swap: None,
        },
        Some(TypeTag::U16) => &TypeEntry {
            c_name: "uint16_t",
            ts_name: "number",
            size: 2,
            c_default: "0",
            ts_default: "0",
            ts_read: "getUint16",
            ts_write: "setUint16",
            c_swap: Some("SWAP_UINT16"),
        },
        Some(TypeTag::U32) => &TypeEntry {
            c_name: "uint32_t",
            ts_name: "number",
            size: 4,
            c_default: "0",
            ts_default: "0",
            ts_read: "getUint32",
            ts_write: "setUint32",
            c_swap: Some("SWAP_UINT32"),
        },
        Some(TypeTag::U64) => &TypeEntry {
            c_name: "uint64_t",
            ts_name: "number",
            size: 8,
            c_default: "0",
            ts_default: "0",
            ts_read: "getBigUint64",
            ts_write: "setBigUint64",
            c_swap: Some("SWAP_UINT64"),
        },
        Some(TypeTag::I8) => &TypeEntry {
            c_name: "int8_t",
            ts_name: "number",
            size: 1,
            c_default: "0",
            ts_default: "0",
            ts_read: "getInt8",
            ts_write: "setInt8",
            c_swap: None,
        },
        Some(TypeTag::I16) => &TypeEntry {
            c_name: "int16_t",
            ts_name: "number",
            size: 2,
            c_default: "0",
            ts_default: "0",
            ts_read: "getInt16",
            ts_write: "setInt16",
            c_swap: Some("SWAP_UINT16"),
        },
        Some(TypeTag::I32) => &TypeEntry {
            c_name: "int32_t",
            ts_name: "number",
            size: 4,
            c_default: "0",
            ts_default: "0",
            ts_read: "getInt32",
            ts_write: "setInt32",
            c_swap: Some("SWAP_UINT32"),
        },
        Some(TypeTag::I64) => &TypeEntry {
            c_name: "int64_t",
            ts_name: "number",
            size: 8,
            c_default: "0",
            ts_default: "0",
            ts_read: "getBigInt64",
            ts_write: "setBigInt64",
            c_swap: Some("SWAP_UINT64"),
        },
        Some(TypeTag::Float) => &TypeEntry {
            c_name: "float",
            ts_name: "number",
            size: 4,
            c_default: "0.0",
            ts_default: "0",
            ts_read: "getFloat32",
            ts_write: "setFloat32",
            c_swap: Some("swap_float"),
        },
        Some(TypeTag::Double) => &TypeEntry {
            c_name: "double",
            ts_name: "number",
            size: 8,
            c_default: "0.0",
            ts_default: "0",
            ts_read: "getFloat64",
            ts_write: "setFloat64",
            c_swap: Some("swap_double"),
        },
        Some(TypeTag::Bool) => &TypeEntry {
            c_name: "bool",
            ts_name: "boolean",
            size: 1,
            c_default: "false",
            ts_default: "false",
            ts_read: "getUint8",
            ts_write: "setUint8",
            c_swap: None,
        },
        Some(TypeTag::Str) => &TypeEntry {
            c_name: "char*",
            ts_name: "string",
            size: 4,
            c_default: "NULL",
            ts_default: "''",
            ts_read: "getUint8",
            ts_write: "setUint8",
            c_swap: None,
        },
        None => &UNKNOWN_ENTRY,
    }
}

/// `(typeName, byteSize, scalarDefaultLiteral)` for one tag and target.
pub fn resolve(tag: Option<TypeTag>, target: Target) -> (&'static str, u32, &'static str) {
    let e = entry(tag);
    match target {
        Target::C => (e.c_name, e.size, e.c_default),
        Target::TypeScript => (e.ts_name, e.size, e.ts_default),
    }
}

/// Repeated-literal default for array items.
///
/// C arrays are fixed inline members initialized with `memset`, so the C
/// form is the memset fill byte; TypeScript arrays are actual repeated-value
/// sequences.
pub fn array_default(tag: Option<TypeTag>, length: u32, target: Target) -> String {
    let e = entry(tag);
    match target {
        Target::C => e.c_default.to_string(),
        Target::TypeScript => match tag {
            Some(TypeTag::Bool) => format!("Array({}).fill(false)", length),
            Some(TypeTag::Str) => format!("Array({}).fill('')", length),
            Some(_) => format!("Array({}).fill(0)", length),
            None => "[]".to_string(),
        },
    }
}
