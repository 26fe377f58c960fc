//! Byte-order policy: per-item swap decisions shared by every emitter.
//!
//! Byte order is declared per item, not per container; a single record may
//! mix fields captured from hardware registers of different native
//! endianness. The C emitter assumes a little-endian host and swaps only
//! big-endian multi-byte fields; the TypeScript emitter passes an explicit
//! little-endian flag to `DataView`. Both decisions derive from the same
//! predicate here so the two targets cannot diverge.

use crate::resolver;
use crate::schema::{ByteOrder, Container, Item, TypeTag};

/// True iff the field's bytes must be reversed during encode/decode:
/// declared big-endian and wider than one byte. Single-byte types,
/// booleans, strings and unknown tags never swap.
pub fn needs_swap(item: &Item) -> bool {
    if item.byte_order != ByteOrder::Big {
        return false;
    }
    match item.tag() {
        Some(TypeTag::Bool) | Some(TypeTag::Str) | None => false,
        Some(tag) => resolver::entry(Some(tag)).size > 1,
    }
}

/// The `littleEndian` flag handed to `DataView` accessors: true unless the
/// item is declared big-endian. Must agree with [`needs_swap`] so both
/// emitters produce bit-identical buffers for the same container.
pub fn ts_little_endian(item: &Item) -> bool {
    item.byte_order != ByteOrder::Big
}

/// True iff any item in the container swaps; gates emission of the C swap
/// helper definitions.
pub fn swap_helpers_needed(container: &Container) -> bool {
    container.items.iter().any(needs_swap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(tag: &str, order: ByteOrder) -> Item {
        Item {
            name: "x".to_string(),
            type_tag: tag.to_string(),
            description: String::new(),
            byte_order: order,
            units: String::new(),
            is_array: false,
            length: 0,
        }
    }

    #[test]
    fn big_endian_multibyte_swaps() {
        assert!(needs_swap(&item("uint16", ByteOrder::Big)));
        assert!(needs_swap(&item("int64", ByteOrder::Big)));
        assert!(needs_swap(&item("double", ByteOrder::Big)));
    }

    #[test]
    fn single_byte_bool_string_never_swap() {
        assert!(!needs_swap(&item("uint8", ByteOrder::Big)));
        assert!(!needs_swap(&item("int8", ByteOrder::Big)));
        assert!(!needs_swap(&item("bool", ByteOrder::Big)));
        assert!(!needs_swap(&item("string", ByteOrder::Big)));
        assert!(!needs_swap(&item("vector3", ByteOrder::Big)));
    }

    #[test]
    fn little_and_unspecified_do_not_swap() {
        assert!(!needs_swap(&item("uint32", ByteOrder::Little)));
        assert!(!needs_swap(&item("uint32", ByteOrder::Unspecified)));
    }

    #[test]
    fn ts_flag_agrees_with_swap_policy() {
        // little flag is the complement of the swap decision for multi-byte types
        let big = item("uint32", ByteOrder::Big);
        let little = item("uint32", ByteOrder::Little);
        let unspecified = item("uint32", ByteOrder::Unspecified);
        assert!(!ts_little_endian(&big));
        assert!(ts_little_endian(&little));
        assert!(ts_little_endian(&unspecified));
    }
}
