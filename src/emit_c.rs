//! C emitter: header and source artifacts for one container.
//!
//! Emits a fixed-layout struct, an `_init` constructor, and byte-exact
//! `_serialize`/`_deserialize` routines. Fields are visited strictly in
//! declaration order; each field's size and swap decision come from the
//! shared resolver table and byte-order policy, so the wire layout agrees
//! byte-for-byte with the TypeScript emitter. The host is assumed
//! little-endian: only big-endian multi-byte fields are swapped.
//!
//! Known, documented limitations inherited from the format: non-array
//! strings travel as null-terminated bytes and deserialize as borrowed
//! pointers into the source buffer; arrays of strings are omitted from the
//! wire entirely; unknown type tags become `void` sentinel members that are
//! never serialized.

use crate::endian;
use crate::layout;
use crate::resolver::{self, Target};
use crate::schema::{Container, Item, TypeTag};
use convert_case::{Case, Casing};

/// Unsigned carrier type for a swap helper, used for the swap temporaries.
fn swap_carrier(helper: &str) -> &'static str {
    match helper {
        "SWAP_UINT16" => "uint16_t",
        "SWAP_UINT32" => "uint32_t",
        "SWAP_UINT64" => "uint64_t",
        "swap_float" => "float",
        _ => "double",
    }
}

fn doc_comment(item: &Item, indent: &str) -> Option<String> {
    if item.description.is_empty() {
        return None;
    }
    if item.units.is_empty() {
        Some(format!("{}/* {} */", indent, item.description))
    } else {
        Some(format!("{}/* {} ({}) */", indent, item.description, item.units))
    }
}

/// Emit the header artifact: banner, include guard, struct definition and
/// the init/serialize/deserialize declarations.
pub fn emit_header(container: &Container) -> String {
    let name = &container.name;
    let guard = format!("{}_H", name.to_uppercase());
    let snake = name.to_case(Case::Snake);
    let mut lines: Vec<String> = Vec::new();

    lines.push("/**".to_string());
    lines.push(format!("* {}", name));
    lines.push(format!("* {}", container.description));
    lines.push("*/".to_string());
    lines.push(String::new());
    lines.push(format!("#ifndef {}", guard));
    lines.push(format!("#define {}", guard));
    lines.push(String::new());
    lines.push("#include <stdint.h>".to_string());
    lines.push("#include <stdbool.h>".to_string());
    lines.push("#include <stddef.h>".to_string());
    lines.push(String::new());
    lines.push("/**".to_string());
    lines.push(format!("* {}", container.description));
    lines.push("*/".to_string());
    lines.push("typedef struct {".to_string());
    for item in &container.items {
        if let Some(doc) = doc_comment(item, "    ") {
            lines.push(doc);
        }
        let (c_type, _, _) = resolver::resolve(item.tag(), Target::C);
        if item.is_array {
            lines.push(format!("    {} {}[{}];", c_type, item.name, item.length));
        } else {
            lines.push(format!("    {} {};", c_type, item.name));
        }
    }
    lines.push(format!("}} {}_t;", name));
    lines.push(String::new());
    lines.push("/**".to_string());
    lines.push(format!("* Initialize a {} structure with default values", name));
    lines.push("* @param p_data Pointer to the structure to initialize".to_string());
    lines.push("*/".to_string());
    lines.push(format!("void {}_init({}_t* p_data);", snake, name));
    lines.push(String::new());
    lines.push("/**".to_string());
    lines.push(format!(
        "* Serialize a {} structure into a byte buffer ({} wire bytes when no unsupported fields are present)",
        name,
        layout::wire_size(container)
    ));
    lines.push("* @return Bytes written, or -1 on NULL argument or insufficient buffer capacity".to_string());
    lines.push("*/".to_string());
    lines.push(format!(
        "int {}_serialize(const {}_t* p_data, uint8_t* buffer, size_t buffer_size);",
        snake, name
    ));
    lines.push(String::new());
    lines.push("/**".to_string());
    lines.push(format!("* Deserialize a byte buffer into a {} structure", name));
    lines.push(
        "* String fields borrow from the source buffer and are only valid while it is alive"
            .to_string(),
    );
    lines.push("* @return Bytes consumed, or -1 on NULL argument or truncated buffer".to_string());
    lines.push("*/".to_string());
    lines.push(format!(
        "int {}_deserialize({}_t* p_data, const uint8_t* buffer, size_t buffer_size);",
        snake, name
    ));
    lines.push(String::new());
    lines.push(format!("#endif /* {} */", guard));
    lines.push(String::new());

    lines.join("\n")
}

/// Emit the source artifact: swap helpers (when needed), init, serialize
/// and deserialize bodies.
pub fn emit_source(container: &Container) -> String {
    let name = &container.name;
    let snake = name.to_case(Case::Snake);
    let mut lines: Vec<String> = Vec::new();

    lines.push("/**".to_string());
    lines.push(format!("* {}", name));
    lines.push(format!("* {}", container.description));
    lines.push("*/".to_string());
    lines.push(String::new());
    lines.push(format!("#include \"{}.h\"", name.to_lowercase()));
    lines.push("#include <string.h>".to_string());

    if endian::swap_helpers_needed(container) {
        lines.push(String::new());
        push_swap_helpers(&mut lines, container);
    }

    lines.push(String::new());
    push_init(&mut lines, container, &snake);
    lines.push(String::new());
    push_serialize(&mut lines, container, &snake);
    lines.push(String::new());
    push_deserialize(&mut lines, container, &snake);
    lines.push(String::new());

    lines.join("\n")
}

fn push_swap_helpers(lines: &mut Vec<String>, container: &Container) {
    let mut used: Vec<&str> = Vec::new();
    for item in &container.items {
        if endian::needs_swap(item) {
            if let Some(helper) = resolver::entry(item.tag()).c_swap {
                if !used.contains(&helper) {
                    used.push(helper);
                }
            }
        }
    }
    let wants = |h: &str| used.contains(&h);
    // swap_float builds on SWAP_UINT32, swap_double on SWAP_UINT64
    if wants("SWAP_UINT16") {
        lines.push("#define SWAP_UINT16(x) ((uint16_t)((((uint16_t)(x) & 0x00ffU) << 8) | (((uint16_t)(x) & 0xff00U) >> 8)))".to_string());
    }
    if wants("SWAP_UINT32") || wants("swap_float") {
        lines.push("#define SWAP_UINT32(x) ((uint32_t)((((uint32_t)(x) & 0x000000ffUL) << 24) | (((uint32_t)(x) & 0x0000ff00UL) << 8) | (((uint32_t)(x) & 0x00ff0000UL) >> 8) | (((uint32_t)(x) & 0xff000000UL) >> 24)))".to_string());
    }
    if wants("SWAP_UINT64") || wants("swap_double") {
        lines.push("#define SWAP_UINT64(x) ((uint64_t)((((uint64_t)(x) & 0x00000000000000ffULL) << 56) | (((uint64_t)(x) & 0x000000000000ff00ULL) << 40) | (((uint64_t)(x) & 0x0000000000ff0000ULL) << 24) | (((uint64_t)(x) & 0x00000000ff000000ULL) << 8) | (((uint64_t)(x) & 0x000000ff00000000ULL) >> 8) | (((uint64_t)(x) & 0x0000ff0000000000ULL) >> 24) | (((uint64_t)(x) & 0x00ff000000000000ULL) >> 40) | (((uint64_t)(x) & 0xff00000000000000ULL) >> 56)))".to_string());
    }
    if wants("swap_float") {
        lines.push(String::new());
        lines.push("static float swap_float(float value) {".to_string());
        lines.push("    uint32_t bits;".to_string());
        lines.push("    memcpy(&bits, &value, sizeof(bits));".to_string());
        lines.push("    bits = SWAP_UINT32(bits);".to_string());
        lines.push("    memcpy(&value, &bits, sizeof(bits));".to_string());
        lines.push("    return value;".to_string());
        lines.push("}".to_string());
    }
    if wants("swap_double") {
        lines.push(String::new());
        lines.push("static double swap_double(double value) {".to_string());
        lines.push("    uint64_t bits;".to_string());
        lines.push("    memcpy(&bits, &value, sizeof(bits));".to_string());
        lines.push("    bits = SWAP_UINT64(bits);".to_string());
        lines.push("    memcpy(&value, &bits, sizeof(bits));".to_string());
        lines.push("    return value;".to_string());
        lines.push("}".to_string());
    }
}

fn push_init(lines: &mut Vec<String>, container: &Container, snake: &str) {
    lines.push(format!("void {}_init({}_t* p_data) {{", snake, container.name));
    lines.push("    if (p_data == NULL) {".to_string());
    lines.push("        return;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());
    for item in &container.items {
        let tag = item.tag();
        if tag.is_none() {
            lines.push(format!(
                "    /* {}: unsupported type \"{}\", no initializer */",
                item.name, item.type_tag
            ));
            continue;
        }
        let (_, _, default) = resolver::resolve(tag, Target::C);
        if item.is_array {
            lines.push(format!(
                "    memset(p_data->{}, 0, sizeof(p_data->{}));",
                item.name, item.name
            ));
        } else {
            lines.push(format!("    p_data->{} = {};", item.name, default));
        }
    }
    lines.push("}".to_string());
}

fn push_serialize(lines: &mut Vec<String>, container: &Container, snake: &str) {
    lines.push(format!(
        "int {}_serialize(const {}_t* p_data, uint8_t* buffer, size_t buffer_size) {{",
        snake, container.name
    ));
    lines.push("    if (p_data == NULL || buffer == NULL) {".to_string());
    lines.push("        return -1;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());
    lines.push("    size_t offset = 0;".to_string());
    lines.push("    uint8_t* ptr = buffer;".to_string());
    lines.push(String::new());

    for item in &container.items {
        push_serialize_item(lines, item);
    }

    lines.push("    return (int)offset;".to_string());
    lines.push("}".to_string());
}

fn push_serialize_item(lines: &mut Vec<String>, item: &Item) {
    let tag = item.tag();
    let name = &item.name;

    if tag.is_none() {
        lines.push(format!(
            "    /* {}: unsupported type \"{}\", not serialized */",
            name, item.type_tag
        ));
        return;
    }
    if item.is_array && tag == Some(TypeTag::Str) {
        lines.push(format!(
            "    /* {}: string arrays are not supported, field omitted from the wire */",
            name
        ));
        return;
    }

    let entry = resolver::entry(tag);
    let size = entry.size;

    if tag == Some(TypeTag::Str) {
        // Null-terminated, length-implicit; a NULL string is a lone '\0'
        lines.push(format!("    if (p_data->{} != NULL) {{", name));
        lines.push(format!(
            "        size_t {}_len = strlen(p_data->{}) + 1;",
            name, name
        ));
        lines.push(format!("        if (offset + {}_len > buffer_size) {{", name));
        lines.push("            return -1;".to_string());
        lines.push("        }".to_string());
        lines.push(format!(
            "        memcpy(ptr + offset, p_data->{}, {}_len);",
            name, name
        ));
        lines.push(format!("        offset += {}_len;", name));
        lines.push("    } else {".to_string());
        lines.push("        if (offset + 1 > buffer_size) {".to_string());
        lines.push("            return -1;".to_string());
        lines.push("        }".to_string());
        lines.push("        ptr[offset] = '\\0';".to_string());
        lines.push("        offset += 1;".to_string());
        lines.push("    }".to_string());
        return;
    }

    let total = layout::item_size(item);
    lines.push(format!("    if (offset + {} > buffer_size) {{", total));
    lines.push("        return -1;".to_string());
    lines.push("    }".to_string());

    if endian::needs_swap(item) {
        let helper = entry.c_swap.unwrap_or("SWAP_UINT16");
        let carrier = swap_carrier(helper);
        let cast = if helper.starts_with("SWAP_") {
            format!("({})", carrier)
        } else {
            String::new()
        };
        if item.is_array {
            lines.push(format!("    for (int i = 0; i < {}; i++) {{", item.length));
            lines.push(format!(
                "        {} {}_swapped = {}({}p_data->{}[i]);",
                carrier, name, helper, cast, name
            ));
            lines.push(format!(
                "        memcpy(ptr + offset, &{}_swapped, {});",
                name, size
            ));
            lines.push(format!("        offset += {};", size));
            lines.push("    }".to_string());
        } else {
            lines.push(format!(
                "    {} {}_swapped = {}({}p_data->{});",
                carrier, name, helper, cast, name
            ));
            lines.push(format!("    memcpy(ptr + offset, &{}_swapped, {});", name, size));
            lines.push(format!("    offset += {};", size));
        }
    } else if item.is_array {
        lines.push(format!("    memcpy(ptr + offset, p_data->{}, {});", name, total));
        lines.push(format!("    offset += {};", total));
    } else {
        lines.push(format!("    memcpy(ptr + offset, &p_data->{}, {});", name, size));
        lines.push(format!("    offset += {};", size));
    }
}

fn push_deserialize(lines: &mut Vec<String>, container: &Container, snake: &str) {
    lines.push(format!(
        "int {}_deserialize({}_t* p_data, const uint8_t* buffer, size_t buffer_size) {{",
        snake, container.name
    ));
    lines.push("    if (p_data == NULL || buffer == NULL) {".to_string());
    lines.push("        return -1;".to_string());
    lines.push("    }".to_string());
    lines.push(String::new());
    lines.push(format!("    {}_init(p_data);", snake));
    lines.push(String::new());
    lines.push("    size_t offset = 0;".to_string());
    lines.push("    const uint8_t* ptr = buffer;".to_string());
    lines.push(String::new());

    for item in &container.items {
        push_deserialize_item(lines, item);
    }

    lines.push("    return (int)offset;".to_string());
    lines.push("}".to_string());
}

fn push_deserialize_item(lines: &mut Vec<String>, item: &Item) {
    let tag = item.tag();
    let name = &item.name;

    if tag.is_none() {
        lines.push(format!(
            "    /* {}: unsupported type \"{}\", not deserialized */",
            name, item.type_tag
        ));
        return;
    }
    if item.is_array && tag == Some(TypeTag::Str) {
        lines.push(format!(
            "    /* {}: string arrays are not supported, field omitted from the wire */",
            name
        ));
        return;
    }

    let entry = resolver::entry(tag);
    let size = entry.size;

    if tag == Some(TypeTag::Str) {
        // Borrowed view: the string points into the source buffer, so the
        // record is only valid while the buffer is alive.
        lines.push("    if (offset >= buffer_size) {".to_string());
        lines.push("        return -1;".to_string());
        lines.push("    }".to_string());
        lines.push(format!("    p_data->{} = (char*)(ptr + offset);", name));
        lines.push(format!(
            "    const void* {}_end = memchr(ptr + offset, '\\0', buffer_size - offset);",
            name
        ));
        lines.push(format!("    if ({}_end == NULL) {{", name));
        lines.push("        return -1;".to_string());
        lines.push("    }".to_string());
        lines.push(format!(
            "    offset = (size_t)((const uint8_t*){}_end - ptr) + 1;",
            name
        ));
        return;
    }

    let total = layout::item_size(item);
    lines.push(format!("    if (offset + {} > buffer_size) {{", total));
    lines.push("        return -1;".to_string());
    lines.push("    }".to_string());

    if endian::needs_swap(item) {
        let helper = entry.c_swap.unwrap_or("SWAP_UINT16");
        let carrier = swap_carrier(helper);
        let cast = if helper.starts_with("SWAP_") {
            format!("({})", entry.c_name)
        } else {
            String::new()
        };
        if item.is_array {
            lines.push(format!("    for (int i = 0; i < {}; i++) {{", item.length));
            lines.push(format!("        {} {}_raw;", carrier, name));
            lines.push(format!(
                "        memcpy(&{}_raw, ptr + offset, {});",
                name, size
            ));
            lines.push(format!(
                "        p_data->{}[i] = {}{}({}_raw);",
                name, cast, helper, name
            ));
            lines.push(format!("        offset += {};", size));
            lines.push("    }".to_string());
        } else {
            lines.push(format!("    {} {}_raw;", carrier, name));
            lines.push(format!("    memcpy(&{}_raw, ptr + offset, {});", name, size));
            lines.push(format!(
                "    p_data->{} = {}{}({}_raw);",
                name, cast, helper, name
            ));
            lines.push(format!("    offset += {};", size));
        }
    } else if item.is_array {
        lines.push(format!("    memcpy(p_data->{}, ptr + offset, {});", name, total));
        lines.push(format!("    offset += {};", total));
    } else {
        lines.push(format!("    memcpy(&p_data->{}, ptr + offset, {});", name, size));
        lines.push(format!("    offset += {};", size));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ByteOrder;

    fn telemetry() -> Container {
        Container {
            name: "Telemetry".to_string(),
            description: "Sample record".to_string(),
            items: vec![
                Item {
                    name: "temp".to_string(),
                    type_tag: "int16".to_string(),
                    description: "Temperature".to_string(),
                    byte_order: ByteOrder::Big,
                    units: "degC".to_string(),
                    is_array: false,
                    length: 0,
                },
                Item {
                    name: "flags".to_string(),
                    type_tag: "uint8".to_string(),
                    description: String::new(),
                    byte_order: ByteOrder::Unspecified,
                    units: String::new(),
                    is_array: true,
                    length: 4,
                },
            ],
        }
    }

    #[test]
    fn header_has_guard_struct_and_declarations() {
        let h = emit_header(&telemetry());
        assert!(h.contains("#ifndef TELEMETRY_H"));
        assert!(h.contains("int16_t temp;"));
        assert!(h.contains("uint8_t flags[4];"));
        assert!(h.contains("} Telemetry_t;"));
        assert!(h.contains("void telemetry_init(Telemetry_t* p_data);"));
        assert!(h.contains("int telemetry_serialize(const Telemetry_t* p_data, uint8_t* buffer, size_t buffer_size);"));
        assert!(h.contains("/* Temperature (degC) */"));
    }

    #[test]
    fn source_swaps_big_endian_scalar_and_checks_bounds() {
        let c = emit_source(&telemetry());
        assert!(c.contains("#define SWAP_UINT16"));
        assert!(c.contains("SWAP_UINT16((uint16_t)p_data->temp)"));
        assert!(c.contains("if (offset + 2 > buffer_size)"));
        assert!(c.contains("if (offset + 4 > buffer_size)"));
        // no float helpers for a container without swapped floats
        assert!(!c.contains("swap_float"));
    }

    #[test]
    fn unknown_type_is_a_commented_no_op() {
        let mut c = telemetry();
        c.items.push(Item {
            name: "pos".to_string(),
            type_tag: "vector3".to_string(),
            description: String::new(),
            byte_order: ByteOrder::Unspecified,
            units: String::new(),
            is_array: false,
            length: 0,
        });
        let h = emit_header(&c);
        assert!(h.contains("void pos;"));
        let src = emit_source(&c);
        assert!(src.contains("/* pos: unsupported type \"vector3\", not serialized */"));
        assert!(src.contains("/* pos: unsupported type \"vector3\", not deserialized */"));
    }
}
