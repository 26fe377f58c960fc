//! Layout calculator: unpadded wire sizes and per-field offsets.
//!
//! The computed size is the exact number of bytes the (de)serializers read
//! or write. It is *not* the `sizeof` of a natively compiled struct with the
//! same fields: targets that apply alignment padding will disagree, so this
//! value must only ever size wire buffers and bound partial reads/writes.

use crate::resolver;
use crate::schema::{Container, Item, TypeTag};

/// Largest wire size a container may declare. The generated C serialize
/// and deserialize routines return the byte count as a C `int`, so any
/// container past this bound could not report its own length.
pub const MAX_WIRE_SIZE: u64 = i32::MAX as u64;

/// Wire bytes occupied by one item: element size times array length.
/// Computed in `u64` so a declared length near `u32::MAX` cannot wrap.
///
/// Two kinds of field occupy zero bytes, identically in every emitter:
/// arrays of strings (explicitly unsupported, omitted from the wire) and
/// unknown type tags (sentinel-typed, omitted from the wire).
pub fn item_size(item: &Item) -> u64 {
    let tag = item.tag();
    if item.is_array && tag == Some(TypeTag::Str) {
        return 0;
    }
    let size = u64::from(resolver::entry(tag).size);
    if item.is_array {
        size * u64::from(item.length)
    } else {
        size
    }
}

/// Total wire size of a container: sum of resolved item sizes in
/// declaration order, no padding or alignment. Saturates rather than
/// wraps; callers compare against [`MAX_WIRE_SIZE`] before emitting.
pub fn wire_size(container: &Container) -> u64 {
    container
        .items
        .iter()
        .map(item_size)
        .fold(0u64, u64::saturating_add)
}

/// Byte offset of each item under sequential declaration-order writes.
/// Zero-size items keep their cursor position; used to check that both
/// emitters assign identical offsets.
pub fn field_offsets(container: &Container) -> Vec<(String, u64)> {
    let mut out = Vec::with_capacity(container.items.len());
    let mut offset = 0u64;
    for item in &container.items {
        out.push((item.name.clone(), offset));
        offset = offset.saturating_add(item_size(item));
    }
    out
}
