//! Host-visible buffer objects.
//!
//! [`HostBufferView`] is what the bridge hands back to native code's
//! caller: a typed array object the host runtime can use directly. The
//! backing storage is either host-owned (allocated here, or copied from a
//! [`crate::NativeSpan`]) or external (zero-copy wrap over native memory,
//! unsafe opt-in).

use alloc::vec::Vec;
use core::ptr::NonNull;

use crate::element::HostTag;
use crate::host::HostArray;

// ===========================================================================
// Host-owned byte storage
// ===========================================================================

/// A host-owned, zero-initialized byte buffer.
///
/// Storage is backed by `u64` words so every supported element width views
/// it aligned, matching the alignment guarantee host runtimes make for
/// their own byte buffers.
#[derive(Debug, Clone)]
pub struct ByteBuffer {
    words: Vec<u64>,
    byte_len: usize,
}

impl ByteBuffer {
    /// Allocate `byte_len` zeroed bytes.
    pub fn zeroed(byte_len: usize) -> Self {
        Self {
            words: bytemuck::zeroed_vec(byte_len.div_ceil(8)),
            byte_len,
        }
    }

    /// Allocate and fill with a verbatim copy of `bytes`.
    pub fn copy_of(bytes: &[u8]) -> Self {
        let mut buf = Self::zeroed(bytes.len());
        buf.as_bytes_mut().copy_from_slice(bytes);
        buf
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.byte_len
    }

    /// True when the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.byte_len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &bytemuck::cast_slice(&self.words)[..self.byte_len]
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut bytemuck::cast_slice_mut(&mut self.words)[..self.byte_len]
    }
}

// ===========================================================================
// Typed views
// ===========================================================================

#[derive(Debug)]
enum Storage {
    Owned(ByteBuffer),
    External { ptr: NonNull<u8>, byte_len: usize },
}

/// A host-runtime typed array: a contiguous memory region exposed as
/// elements of one [`HostTag`].
///
/// Views are created synchronously by one bridge call and have no further
/// interaction with the bridge afterwards. View offset is always 0.
#[derive(Debug)]
pub struct HostBufferView {
    storage: Storage,
    tag: HostTag,
    len: usize,
}

impl HostBufferView {
    /// Single-step typed construction: `len` zeroed elements of `tag`,
    /// backing storage allocated here.
    pub fn of(tag: HostTag, len: usize) -> Self {
        Self {
            storage: Storage::Owned(ByteBuffer::zeroed(len * tag.byte_width())),
            tag,
            len,
        }
    }

    /// Two-step typed construction: a view of `tag` over an explicitly
    /// allocated byte buffer.
    ///
    /// Returns `None` when the buffer is not a whole number of `tag`
    /// elements.
    pub fn over(buf: ByteBuffer, tag: HostTag) -> Option<Self> {
        if !buf.len().is_multiple_of(tag.byte_width()) {
            return None;
        }
        let len = buf.len() / tag.byte_width();
        Some(Self {
            storage: Storage::Owned(buf),
            tag,
            len,
        })
    }

    /// Byte-level copy buffer: a `Uint8` view over a fresh host-owned copy
    /// of `bytes`. The copy's lifetime is independent of the source.
    pub fn copy_of(bytes: &[u8]) -> Self {
        Self {
            storage: Storage::Owned(ByteBuffer::copy_of(bytes)),
            tag: HostTag::Uint8,
            len: bytes.len(),
        }
    }

    /// Zero-copy wrap: a `Uint8` view directly over external memory,
    /// offset 0, length `byte_len`. No bytes are copied.
    ///
    /// # Safety
    ///
    /// This is the one place the bridge cannot protect the caller. `ptr`
    /// must point to `byte_len` bytes that are valid for reads and writes,
    /// are not accessed through any other alias, and **outlive the
    /// returned view** — the view holds the pointer with no lifetime of
    /// its own. Using the view after the native engine frees the memory is
    /// undefined behavior. When the native memory's lifetime is not
    /// statically guaranteed, use [`HostBufferView::copy_of`] instead.
    pub unsafe fn from_external(ptr: NonNull<u8>, byte_len: usize) -> Self {
        Self {
            storage: Storage::External { ptr, byte_len },
            tag: HostTag::Uint8,
            len: byte_len,
        }
    }

    /// Element tag of the view.
    pub fn tag(&self) -> HostTag {
        self.tag
    }

    /// Element count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the view holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size in bytes: `len() * tag().byte_width()`.
    pub fn byte_len(&self) -> usize {
        match &self.storage {
            Storage::Owned(buf) => buf.len(),
            Storage::External { byte_len, .. } => *byte_len,
        }
    }

    /// Offset of the view into its backing buffer. Always 0.
    pub fn byte_offset(&self) -> usize {
        0
    }

    /// True when the view aliases externally-owned memory.
    pub fn is_external(&self) -> bool {
        matches!(self.storage, Storage::External { .. })
    }

    /// The backing bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(buf) => buf.as_bytes(),
            // SAFETY: the `from_external` contract guarantees `ptr` is
            // valid for `byte_len` bytes for as long as the view exists.
            Storage::External { ptr, byte_len } => unsafe {
                core::slice::from_raw_parts(ptr.as_ptr(), *byte_len)
            },
        }
    }

    /// The backing bytes, mutably.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Owned(buf) => buf.as_bytes_mut(),
            // SAFETY: the `from_external` contract guarantees validity for
            // writes and exclusive access for the view's lifetime.
            Storage::External { ptr, byte_len } => unsafe {
                core::slice::from_raw_parts_mut(ptr.as_ptr(), *byte_len)
            },
        }
    }

    /// The backing bytes reinterpreted as `T` elements.
    ///
    /// Returns `None` when the byte length is not a whole number of `T`
    /// or the backing memory is misaligned for `T` (possible only for
    /// external wraps; host-owned storage is always aligned).
    pub fn as_slice<T: bytemuck::AnyBitPattern>(&self) -> Option<&[T]> {
        bytemuck::try_cast_slice(self.as_bytes()).ok()
    }

    /// Mutable variant of [`HostBufferView::as_slice`].
    pub fn as_slice_mut<T: bytemuck::Pod>(&mut self) -> Option<&mut [T]> {
        bytemuck::try_cast_slice_mut(self.as_bytes_mut()).ok()
    }

    /// Raw pointer to the backing bytes.
    pub fn as_ptr(&self) -> *const u8 {
        match &self.storage {
            Storage::Owned(buf) => buf.as_bytes().as_ptr(),
            Storage::External { ptr, .. } => ptr.as_ptr(),
        }
    }
}

impl HostArray for HostBufferView {
    fn external_data(&self) -> Option<NonNull<u8>> {
        match &self.storage {
            Storage::Owned(buf) => NonNull::new(buf.as_bytes().as_ptr().cast_mut()),
            Storage::External { ptr, .. } => Some(*ptr),
        }
    }

    fn element_tag(&self) -> Option<HostTag> {
        Some(self.tag)
    }

    fn len(&self) -> usize {
        self.len
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_view_is_zeroed_and_sized() {
        let view = HostBufferView::of(HostTag::Float32, 4);
        assert_eq!(view.len(), 4);
        assert_eq!(view.byte_len(), 16);
        assert_eq!(view.byte_offset(), 0);
        assert!(!view.is_external());
        assert!(view.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn owned_storage_is_aligned_for_every_width() {
        let view = HostBufferView::of(HostTag::Float64, 3);
        let slice = view.as_slice::<f64>().expect("aligned");
        assert_eq!(slice, &[0.0, 0.0, 0.0]);

        let view = HostBufferView::of(HostTag::Uint8, 9);
        assert_eq!(view.as_slice::<u8>().unwrap().len(), 9);
        // 9 bytes is not a whole number of u32s.
        assert!(view.as_slice::<u32>().is_none());
    }

    #[test]
    fn over_rejects_partial_elements() {
        let buf = ByteBuffer::zeroed(10);
        assert!(HostBufferView::over(buf.clone(), HostTag::Uint16).is_some());
        assert!(HostBufferView::over(buf, HostTag::Float32).is_none());
    }

    #[test]
    fn over_derives_element_count() {
        let view = HostBufferView::over(ByteBuffer::zeroed(12), HostTag::Int32).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.tag(), HostTag::Int32);
    }

    #[test]
    fn copy_survives_the_source() {
        let view;
        {
            let src = alloc::vec![1u8, 2, 3, 4];
            view = HostBufferView::copy_of(&src);
            drop(src);
        }
        assert_eq!(view.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(view.tag(), HostTag::Uint8);
        assert!(!view.is_external());
    }

    #[test]
    fn external_wrap_aliases_without_copying() {
        let mut native = alloc::vec![10u8, 20, 30];
        let ptr = NonNull::new(native.as_mut_ptr()).unwrap();
        {
            // SAFETY: `native` outlives `view` and nothing else touches it
            // while the view is alive.
            let mut view = unsafe { HostBufferView::from_external(ptr, native.len()) };
            assert!(view.is_external());
            assert_eq!(view.as_ptr(), ptr.as_ptr());
            view.as_bytes_mut()[1] = 99;
        }
        assert_eq!(native, &[10, 99, 30]);
    }

    #[test]
    fn view_implements_host_array() {
        let view = HostBufferView::of(HostTag::Int16, 5);
        let arr: &dyn HostArray = &view;
        assert_eq!(arr.element_tag(), Some(HostTag::Int16));
        assert_eq!(arr.len(), 5);
        assert!(arr.external_data().is_some());
    }

    #[test]
    fn zero_length_views() {
        let view = HostBufferView::of(HostTag::Uint32, 0);
        assert!(view.is_empty());
        assert_eq!(view.byte_len(), 0);
        assert!(view.as_bytes().is_empty());
    }
}
