//! Borrowed views of native pixel memory.

use crate::element::ElementType;

/// A raw pixel buffer owned by the native raster engine.
///
/// A span is pointer + element count + element type, borrowed for the
/// duration of one bridge call. The bridge never retains a span, never
/// frees one, and the copy path ([`crate::Bridge::copy_from`]) decouples
/// the produced view from the span's memory entirely.
#[derive(Debug, Clone, Copy)]
pub struct NativeSpan<'a> {
    bytes: &'a [u8],
    ty: ElementType,
}

impl<'a> NativeSpan<'a> {
    /// Span over a byte slice already laid out as `ty` elements.
    ///
    /// Returns `None` when `ty` has no width (`Unknown`) or the slice
    /// length is not a whole number of elements.
    pub fn from_bytes(bytes: &'a [u8], ty: ElementType) -> Option<Self> {
        let width = ty.byte_width();
        if width == 0 || !bytes.len().is_multiple_of(width) {
            return None;
        }
        Some(Self { bytes, ty })
    }

    /// Span over a typed slice. `T` must have exactly the width of `ty`.
    pub fn from_elements<T: bytemuck::NoUninit>(data: &'a [T], ty: ElementType) -> Option<Self> {
        if core::mem::size_of::<T>() != ty.byte_width() {
            return None;
        }
        Some(Self {
            bytes: bytemuck::cast_slice(data),
            ty,
        })
    }

    /// Span over raw native memory, as handed across the engine boundary.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least `len * ty.byte_width()` readable bytes
    /// that stay valid and unmodified for the lifetime `'a`. `ty` must not
    /// be [`ElementType::Unknown`].
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize, ty: ElementType) -> Self {
        debug_assert!(ty.byte_width() > 0);
        // SAFETY: caller guarantees the region is readable, sized for
        // `len` elements of `ty`, and valid for `'a`.
        let bytes = unsafe { core::slice::from_raw_parts(ptr, len * ty.byte_width()) };
        Self { bytes, ty }
    }

    /// Element type of the native buffer.
    pub fn element_type(&self) -> ElementType {
        self.ty
    }

    /// Element count.
    pub fn len(&self) -> usize {
        self.bytes.len() / self.ty.byte_width()
    }

    /// True when the span holds no elements.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Size in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// The underlying bytes.
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }
}
