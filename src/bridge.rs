//! The buffer bridge: allocation, wrapping, and validation of host-visible
//! pixel buffers.
//!
//! A [`Bridge`] is stateless apart from its injected [`CtorRegistry`] and
//! wrap mode. Every operation completes synchronously on the calling
//! thread; nothing is retained across calls.

use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::element::{ElementType, HostTag};
use crate::error::BridgeError;
use crate::host::{HostArray, element_type_of};
use crate::registry::CtorRegistry;
use crate::span::NativeSpan;
use crate::view::{ByteBuffer, HostBufferView};

/// Name used in diagnostics for the byte-buffer constructor.
const BYTE_CTOR_NAME: &str = "ArrayBuffer";

/// How [`Bridge::wrap_or_copy`] exposes native memory to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Copy the span's bytes into a fresh host-owned buffer. The default,
    /// and the only mode that is safe when the native memory's lifetime is
    /// not statically known.
    Copy,
    /// Alias the span's memory directly, no copy. Reachable only through
    /// [`Bridge::with_zero_copy_wrap`].
    ZeroCopy,
}

/// Raw pointer + element count backing a validated host array.
///
/// Borrowed from the array that produced it, so it cannot outlive the
/// current call frame; the bridge never retains one.
#[derive(Debug, Clone, Copy)]
pub struct RawSpan<'a> {
    ptr: NonNull<u8>,
    len: usize,
    _borrow: PhantomData<&'a ()>,
}

impl RawSpan<'_> {
    /// Pointer to the first element.
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// Element count of the validated array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the validated array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The typed buffer bridge.
pub struct Bridge<'r> {
    registry: &'r CtorRegistry,
    wrap_mode: WrapMode,
}

impl<'r> Bridge<'r> {
    /// Bridge over `registry`, wrapping native memory by copy.
    pub fn new(registry: &'r CtorRegistry) -> Self {
        Self {
            registry,
            wrap_mode: WrapMode::Copy,
        }
    }

    /// Bridge over `registry` with zero-copy wrapping enabled.
    ///
    /// # Safety
    ///
    /// Every [`NativeSpan`] later passed to [`Bridge::wrap_or_copy`] on
    /// this bridge must point to memory that outlives every view produced
    /// from it, is valid for reads and writes, and is not accessed through
    /// any other alias while such a view exists. The bridge cannot check
    /// any of this; a span whose memory the native engine frees after the
    /// call returns (the common case) makes later use of the view
    /// undefined behavior. Prefer [`Bridge::new`].
    pub unsafe fn with_zero_copy_wrap(registry: &'r CtorRegistry) -> Self {
        Self {
            registry,
            wrap_mode: WrapMode::ZeroCopy,
        }
    }

    /// The configured wrap mode.
    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Allocate a host-owned, zero-initialized view of `len` elements of
    /// `ty`.
    ///
    /// Resolves the host constructor through the registry: the tag's
    /// single-step typed constructor when registered, otherwise an
    /// explicit byte buffer of `len * byte_width(ty)` bytes with a typed
    /// view constructed over it. Fails with
    /// [`BridgeError::UnsupportedType`] for complex or unknown types and
    /// [`BridgeError::AllocationFailed`] when the registry cannot produce
    /// the buffer; no partially constructed view is ever returned.
    pub fn alloc(&self, ty: ElementType, len: usize) -> Result<HostBufferView, BridgeError> {
        let tag = ty.host_tag().ok_or(BridgeError::UnsupportedType(ty))?;

        if let Some(ctor) = self.registry.typed_ctor(tag) {
            let view = ctor(tag, len).ok_or(BridgeError::AllocationFailed {
                ctor: tag.constructor_name(),
            })?;
            // A constructor that hands back the wrong shape is as good as
            // no constructor at all.
            if view.tag() != tag || view.len() != len {
                return Err(BridgeError::AllocationFailed {
                    ctor: tag.constructor_name(),
                });
            }
            return Ok(view);
        }

        let buf = self.alloc_bytes(len * tag.byte_width())?;
        HostBufferView::over(buf, tag).ok_or(BridgeError::AllocationFailed {
            ctor: tag.constructor_name(),
        })
    }

    /// Produce a host-owned copy of the span's bytes as a byte-level view.
    ///
    /// Ownership of the copy belongs entirely to the host runtime
    /// afterwards; the span's memory can be freed the moment this returns.
    pub fn copy_from(&self, span: &NativeSpan<'_>) -> Result<HostBufferView, BridgeError> {
        let mut buf = self.alloc_bytes(span.byte_len())?;
        buf.as_bytes_mut().copy_from_slice(span.bytes());
        Ok(HostBufferView::over(buf, HostTag::Uint8).expect("byte views are always aligned"))
    }

    /// Wrap the span's memory in a byte-level view without copying.
    ///
    /// # Safety
    ///
    /// Same contract as [`HostBufferView::from_external`]: the span's
    /// memory must outlive the returned view and must not be accessed
    /// through any other alias while the view exists. The span's own
    /// lifetime does **not** protect the view — it is erased here.
    pub unsafe fn wrap_external(&self, span: &NativeSpan<'_>) -> HostBufferView {
        let ptr = NonNull::new(span.bytes().as_ptr().cast_mut())
            .expect("slice pointers are never null");
        // SAFETY: forwarded to the caller, see above.
        unsafe { HostBufferView::from_external(ptr, span.byte_len()) }
    }

    /// Expose the span's bytes to the host, by copy or zero-copy wrap
    /// depending on the bridge's [`WrapMode`].
    pub fn wrap_or_copy(&self, span: &NativeSpan<'_>) -> Result<HostBufferView, BridgeError> {
        match self.wrap_mode {
            WrapMode::Copy => self.copy_from(span),
            // SAFETY: zero-copy mode is only reachable through
            // `with_zero_copy_wrap`, whose contract covers every span
            // passed here.
            WrapMode::ZeroCopy => Ok(unsafe { self.wrap_external(span) }),
        }
    }

    fn alloc_bytes(&self, byte_len: usize) -> Result<ByteBuffer, BridgeError> {
        let ctor = self.registry.byte_ctor().ok_or(BridgeError::AllocationFailed {
            ctor: BYTE_CTOR_NAME,
        })?;
        let buf = ctor(byte_len).ok_or(BridgeError::AllocationFailed {
            ctor: BYTE_CTOR_NAME,
        })?;
        if buf.len() != byte_len {
            return Err(BridgeError::AllocationFailed {
                ctor: BYTE_CTOR_NAME,
            });
        }
        Ok(buf)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Vet a host-supplied array before its pointer reaches native code.
    ///
    /// Checks, in order, stopping at the first failure:
    ///
    /// 1. the array exposes backing data ([`BridgeError::NoExternalData`]);
    /// 2. `expected` is itself identifiable
    ///    ([`BridgeError::UnidentifiableType`] — a caller bug);
    /// 3. the array's element type equals `expected`
    ///    ([`BridgeError::TypeMismatch`], naming both types);
    /// 4. the element count is at least `min_len`
    ///    ([`BridgeError::LengthTooShort`], stating the minimum).
    ///
    /// On success the returned [`RawSpan`] borrows from `array`, keeping
    /// the pointer from outliving the call that produced it.
    pub fn validate<'a>(
        &self,
        array: &'a dyn HostArray,
        expected: ElementType,
        min_len: usize,
    ) -> Result<RawSpan<'a>, BridgeError> {
        let ptr = array.external_data().ok_or(BridgeError::NoExternalData)?;

        if expected.host_tag().is_none() {
            return Err(BridgeError::UnidentifiableType);
        }

        let found = element_type_of(array);
        if found != expected {
            return Err(BridgeError::TypeMismatch { found, expected });
        }

        let actual = array.len();
        if actual < min_len {
            return Err(BridgeError::LengthTooShort {
                required: min_len,
                actual,
            });
        }

        Ok(RawSpan {
            ptr,
            len: actual,
            _borrow: PhantomData,
        })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
