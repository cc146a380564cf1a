//! The injected constructor registry.
//!
//! The original binding layer reached into the host runtime's global
//! namespace at call time, looking up array constructors by name. Here the
//! registry is an explicit dependency handed to [`crate::Bridge`] at
//! setup: each host tag maps to an optional single-step typed constructor,
//! and one byte-buffer constructor backs the explicit two-step allocation
//! path. A missing entry reproduces the "constructor not found / not
//! callable" failure mode without any ambient global state.

use crate::element::HostTag;
use crate::view::{ByteBuffer, HostBufferView};

/// Single-step typed constructor: allocate `len` zeroed elements of `tag`.
/// `None` means the allocation was refused.
pub type TypedCtor = fn(tag: HostTag, len: usize) -> Option<HostBufferView>;

/// Byte-buffer constructor for the two-step path: allocate `byte_len`
/// zeroed bytes. `None` means the allocation was refused.
pub type ByteCtor = fn(byte_len: usize) -> Option<ByteBuffer>;

/// Per-tag constructor table, injected into the bridge at setup.
#[derive(Debug, Clone)]
pub struct CtorRegistry {
    typed: [Option<TypedCtor>; HostTag::ALL.len()],
    bytes: Option<ByteCtor>,
}

fn host_typed(tag: HostTag, len: usize) -> Option<HostBufferView> {
    Some(HostBufferView::of(tag, len))
}

fn host_bytes(byte_len: usize) -> Option<ByteBuffer> {
    Some(ByteBuffer::zeroed(byte_len))
}

impl CtorRegistry {
    /// Registry with no constructors at all. Every allocation fails until
    /// something is registered.
    pub fn empty() -> Self {
        Self {
            typed: [None; HostTag::ALL.len()],
            bytes: None,
        }
    }

    /// Registry wired to the crate's host-owned allocator: every tag gets
    /// a single-step typed constructor, plus the byte-buffer constructor.
    pub fn host_defaults() -> Self {
        Self {
            typed: [Some(host_typed as TypedCtor); HostTag::ALL.len()],
            bytes: Some(host_bytes),
        }
    }

    /// Registry with only the byte-buffer constructor, for host runtimes
    /// without a single-step typed constructor. Forces the bridge down the
    /// explicit allocate-then-view path.
    pub fn bytes_only() -> Self {
        Self {
            typed: [None; HostTag::ALL.len()],
            bytes: Some(host_bytes),
        }
    }

    /// Register (or replace) the typed constructor for one tag.
    pub fn register(&mut self, tag: HostTag, ctor: TypedCtor) -> &mut Self {
        self.typed[tag.index()] = Some(ctor);
        self
    }

    /// Remove the typed constructor for one tag.
    pub fn unregister(&mut self, tag: HostTag) -> &mut Self {
        self.typed[tag.index()] = None;
        self
    }

    /// Register (or replace) the byte-buffer constructor.
    pub fn register_bytes(&mut self, ctor: ByteCtor) -> &mut Self {
        self.bytes = Some(ctor);
        self
    }

    pub(crate) fn typed_ctor(&self, tag: HostTag) -> Option<TypedCtor> {
        self.typed[tag.index()]
    }

    pub(crate) fn byte_ctor(&self) -> Option<ByteCtor> {
        self.bytes
    }
}

impl Default for CtorRegistry {
    fn default() -> Self {
        Self::host_defaults()
    }
}
