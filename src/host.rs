//! The host-array capability interface.
//!
//! The bridge never inspects a host runtime's internal object layout.
//! Anything that wants to be validated and unwrapped into a raw pointer
//! implements [`HostArray`]: element tag, element count, backing pointer.
//! [`crate::HostBufferView`] implements it; embedders wrap their own
//! runtime's arrays the same way.

use core::ptr::NonNull;

use crate::element::{ElementType, HostTag};

/// Runtime introspection capability of a host typed-array object.
pub trait HostArray {
    /// Pointer to the external backing store, or `None` when the object
    /// carries no backing data (e.g. a plain host object that is not a
    /// typed array).
    fn external_data(&self) -> Option<NonNull<u8>>;

    /// The element tag the runtime stamped on this array, or `None` when
    /// the backing store exists but carries no recognized tag.
    fn element_tag(&self) -> Option<HostTag>;

    /// Element count (not bytes).
    fn len(&self) -> usize;

    /// True when the array holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve a host array's native element type from its runtime tag
/// metadata.
///
/// Returns [`ElementType::Unknown`] when the array carries no recognized
/// tag. Both signed and unsigned 8-bit tags resolve to
/// [`ElementType::Uint8`] (see [`HostTag::element_type`]).
pub fn element_type_of(array: &dyn HostArray) -> ElementType {
    match array.element_tag() {
        Some(tag) => tag.element_type(),
        None => ElementType::Unknown,
    }
}
