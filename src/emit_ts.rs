//! TypeScript emitter: one module artifact per container.
//!
//! Emits a structural interface, a default-valued factory, and
//! `serialize`/`deserialize` functions threading a cursor through a
//! `DataView`. The buffer is allocated at exactly the container's wire size
//! (no capacity argument); per field, the accessor receives an explicit
//! little-endian flag derived from the same byte-order policy the C emitter
//! uses, so field order and endianness decisions are bit-identical across
//! targets.
//!
//! Non-array strings are an explicit stub: serialize reserves a fixed
//! 4-byte placeholder and writes nothing meaningful, deserialize skips the
//! same 4 bytes and yields `''`. This keeps sibling field offsets correct
//! without transporting string content. String arrays and unknown tags get
//! no accessor code at all, matching the C emitter.

use crate::endian;
use crate::layout;
use crate::resolver::{self, Target};
use crate::schema::{Container, Item, TypeTag};

fn ts_type(item: &Item) -> String {
    let tag = item.tag();
    let (base, _, _) = resolver::resolve(tag, Target::TypeScript);
    // Unknown tags collapse to `any` even for arrays
    if item.is_array && tag.is_some() {
        format!("{}[]", base)
    } else {
        base.to_string()
    }
}

fn ts_default(item: &Item) -> String {
    if item.is_array {
        resolver::array_default(item.tag(), item.length, Target::TypeScript)
    } else {
        let (_, _, default) = resolver::resolve(item.tag(), Target::TypeScript);
        default.to_string()
    }
}

/// `(write expr, read expr)` for one scalar element access at `offset`.
fn accessors(item: &Item, value_expr: &str) -> (String, String) {
    let entry = resolver::entry(item.tag());
    let little = endian::ts_little_endian(item);
    let flag = if entry.size > 1 {
        format!(", {}", little)
    } else {
        String::new()
    };
    match item.tag() {
        Some(TypeTag::Bool) => (
            format!("view.setUint8(offset, {} ? 1 : 0)", value_expr),
            "view.getUint8(offset) !== 0".to_string(),
        ),
        // DataView 64-bit accessors traffic in BigInt; the interface stays
        // number like every other integer field
        Some(TypeTag::U64) | Some(TypeTag::I64) => (
            format!(
                "view.{}(offset, BigInt({}){})",
                entry.ts_write, value_expr, flag
            ),
            format!("Number(view.{}(offset{}))", entry.ts_read, flag),
        ),
        _ => (
            format!("view.{}(offset, {}{})", entry.ts_write, value_expr, flag),
            format!("view.{}(offset{})", entry.ts_read, flag),
        ),
    }
}

/// Emit the TypeScript module for one container.
pub fn emit_module(container: &Container) -> String {
    let name = &container.name;
    let mut lines: Vec<String> = Vec::new();

    lines.push("/**".to_string());
    lines.push(format!("* {}", name));
    lines.push(format!("* {}", container.description));
    lines.push("*/".to_string());
    lines.push(format!("export interface {} {{", name));
    for item in &container.items {
        if item.units.is_empty() {
            lines.push(format!("  /** {} */", item.description));
        } else {
            lines.push(format!("  /** {} ({}) */", item.description, item.units));
        }
        lines.push(format!("  {}: {};", item.name, ts_type(item)));
    }
    lines.push("}".to_string());
    lines.push(String::new());

    push_factory(&mut lines, container);
    lines.push(String::new());
    push_serialize(&mut lines, container);
    lines.push(String::new());
    push_deserialize(&mut lines, container);

    lines.join("\n")
}

fn push_factory(lines: &mut Vec<String>, container: &Container) {
    let name = &container.name;
    lines.push("/**".to_string());
    lines.push(format!("* Creates a default {} object", name));
    lines.push(format!("* @returns A new {} with default values", name));
    lines.push("*/".to_string());
    lines.push(format!("export function create{}(): {} {{", name, name));
    lines.push("  return {".to_string());
    let fields: Vec<String> = container
        .items
        .iter()
        .map(|item| format!("    {}: {}", item.name, ts_default(item)))
        .collect();
    lines.push(fields.join(",\n"));
    lines.push("  };".to_string());
    lines.push("}".to_string());
}

fn push_serialize(lines: &mut Vec<String>, container: &Container) {
    let name = &container.name;
    lines.push("/**".to_string());
    lines.push(format!("* Serializes a {} object to an ArrayBuffer", name));
    lines.push(format!("* @param data The {} object to serialize", name));
    lines.push("* @returns An ArrayBuffer containing the serialized data".to_string());
    lines.push("*/".to_string());
    lines.push(format!(
        "export function serialize{}(data: {}): ArrayBuffer {{",
        name, name
    ));
    lines.push(format!(
        "  const buffer = new ArrayBuffer({});",
        layout::wire_size(container)
    ));
    lines.push("  const view = new DataView(buffer);".to_string());
    lines.push("  let offset = 0;".to_string());

    for item in &container.items {
        let tag = item.tag();
        let item_name = &item.name;
        if tag.is_none() {
            lines.push(format!(
                "  // {}: unsupported type \"{}\", not serialized",
                item_name, item.type_tag
            ));
            continue;
        }
        if item.is_array && tag == Some(TypeTag::Str) {
            lines.push(format!(
                "  // {}: string arrays are not supported, field omitted from the wire",
                item_name
            ));
            continue;
        }
        if tag == Some(TypeTag::Str) {
            lines.push(format!(
                "  // {}: string serialization not implemented, 4-byte placeholder keeps sibling offsets stable",
                item_name
            ));
            lines.push("  offset += 4;".to_string());
            continue;
        }
        let size = resolver::entry(tag).size;
        if item.is_array {
            lines.push(format!("  // Serialize {} array", item_name));
            let (write, _) = accessors(item, &format!("data.{}[i]", item_name));
            lines.push(format!("  for (let i = 0; i < {}; i++) {{", item.length));
            lines.push(format!("    {};", write));
            lines.push(format!("    offset += {};", size));
            lines.push("  }".to_string());
        } else {
            lines.push(format!("  // Serialize {} scalar", item_name));
            let (write, _) = accessors(item, &format!("data.{}", item_name));
            lines.push(format!("  {};", write));
            lines.push(format!("  offset += {};", size));
        }
    }

    lines.push(String::new());
    lines.push("  return buffer;".to_string());
    lines.push("}".to_string());
}

fn push_deserialize(lines: &mut Vec<String>, container: &Container) {
    let name = &container.name;
    lines.push("/**".to_string());
    lines.push(format!("* Deserializes an ArrayBuffer to a {} object", name));
    lines.push("* @param buffer The ArrayBuffer containing serialized data".to_string());
    lines.push(format!(
        "* @returns A {} object with the deserialized data",
        name
    ));
    lines.push("*/".to_string());
    lines.push(format!(
        "export function deserialize{}(buffer: ArrayBuffer): {} {{",
        name, name
    ));
    lines.push("  const view = new DataView(buffer);".to_string());
    lines.push("  let offset = 0;".to_string());
    lines.push(format!("  const result = create{}();", name));

    for item in &container.items {
        let tag = item.tag();
        let item_name = &item.name;
        if tag.is_none() {
            lines.push(format!(
                "  // {}: unsupported type \"{}\", not deserialized",
                item_name, item.type_tag
            ));
            continue;
        }
        if item.is_array && tag == Some(TypeTag::Str) {
            lines.push(format!(
                "  // {}: string arrays are not supported, field omitted from the wire",
                item_name
            ));
            continue;
        }
        if tag == Some(TypeTag::Str) {
            lines.push(format!(
                "  // {}: string deserialization not implemented, skip the placeholder",
                item_name
            ));
            lines.push(format!("  result.{} = '';", item_name));
            lines.push("  offset += 4;".to_string());
            continue;
        }
        let size = resolver::entry(tag).size;
        let (_, read) = accessors(item, "");
        if item.is_array {
            lines.push(format!("  // Deserialize {} array", item_name));
            lines.push(format!("  const {}Array = [];", item_name));
            lines.push(format!("  for (let i = 0; i < {}; i++) {{", item.length));
            lines.push(format!("    {}Array.push({});", item_name, read));
            lines.push(format!("    offset += {};", size));
            lines.push("  }".to_string());
            lines.push(format!("  result.{} = {}Array;", item_name, item_name));
        } else {
            lines.push(format!("  // Deserialize {} scalar", item_name));
            lines.push(format!("  result.{} = {};", item_name, read));
            lines.push(format!("  offset += {};", size));
        }
    }

    lines.push(String::new());
    lines.push("  return result;".to_string());
    lines.push("}".to_string());
}
