//! # pixferry
//!
//! *Give your pixels safe passage.*
//!
//! A raster engine keeps its pixels in raw native buffers; a host runtime
//! keeps its numbers in typed array objects. Somebody has to carry sample
//! data across that gap without dropping it in the water. pixferry is that
//! somebody: it maps native element types to host array tags (and back),
//! allocates host-owned typed buffers, copies or wraps native memory, and
//! vets host-supplied buffers before their raw pointer is ever handed to
//! native code.
//!
//! ## The three jobs
//!
//! - **Mapping** — [`ElementType`] ↔ [`HostTag`], a small closed set in
//!   each direction. Signed and unsigned 8-bit host tags both collapse to
//!   native [`ElementType::Uint8`]; complex native types have no host
//!   mapping at all.
//! - **Construction** — [`Bridge::alloc`] builds zero-initialized typed
//!   views through an injected [`CtorRegistry`]; [`Bridge::wrap_or_copy`]
//!   turns a [`NativeSpan`] into a host-owned copy (default) or a
//!   zero-copy wrap (explicit unsafe opt-in).
//! - **Validation** — [`Bridge::validate`] checks backing data, element
//!   type, and length before releasing a raw pointer, so a mismatched or
//!   short host buffer never reaches the native layer.
//!
//! ## Copy by default
//!
//! Native pixel memory is typically valid only for the duration of the
//! call that produced it. The copy path is therefore the default and the
//! only safe one; zero-copy wrapping exists for callers who control the
//! native allocation's lifetime and are prepared to say so in an `unsafe`
//! block. See [`Bridge::with_zero_copy_wrap`].

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod bridge;
mod element;
mod error;
mod host;
mod registry;
mod span;
mod view;

pub use bridge::{Bridge, RawSpan, WrapMode};
pub use element::{ElementType, HostTag};
pub use error::BridgeError;
pub use host::{HostArray, element_type_of};
pub use registry::{ByteCtor, CtorRegistry, TypedCtor};
pub use span::NativeSpan;
pub use view::{ByteBuffer, HostBufferView};
