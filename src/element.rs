//! Element type mapping between the native raster engine and the host
//! runtime.
//!
//! [`ElementType`] is the native side: the pixel encodings a raster engine
//! reports for its bands, including complex variants and an `Unknown`
//! sentinel. [`HostTag`] is the host side: the element tags a host runtime
//! stamps on its typed array objects. The two sets do not line up exactly,
//! and the mismatches are deliberate:
//!
//! - complex native types have no host tag at all;
//! - the host's signed 8-bit tag collapses onto native [`ElementType::Uint8`]
//!   (one-directional, lossy, preserved from the original binding layer).

// ===========================================================================
// Native element types
// ===========================================================================

/// Native pixel element type, as reported by the raster engine.
///
/// Ordered the way the engine orders them; `Unknown` sorts first. Every
/// variant has a fixed [byte width](Self::byte_width) used for size
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementType {
    /// Sentinel for an unrecognized or unreported element type.
    Unknown,
    /// 8-bit unsigned integer.
    Uint8,
    /// 16-bit unsigned integer.
    Uint16,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit unsigned integer.
    Uint32,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit IEEE float.
    Float32,
    /// 64-bit IEEE float.
    Float64,
    /// Complex, two 16-bit signed parts. No host mapping.
    CInt16,
    /// Complex, two 32-bit signed parts. No host mapping.
    CInt32,
    /// Complex, two 32-bit float parts. No host mapping.
    CFloat32,
    /// Complex, two 64-bit float parts. No host mapping.
    CFloat64,
}

impl ElementType {
    /// Width of one element in bytes. `Unknown` has width 0.
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Unknown => 0,
            Self::Uint8 => 1,
            Self::Uint16 | Self::Int16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 | Self::CInt16 => 4,
            Self::Float64 | Self::CInt32 | Self::CFloat32 => 8,
            Self::CFloat64 => 16,
        }
    }

    /// Canonical name, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Uint8 => "Uint8",
            Self::Uint16 => "Uint16",
            Self::Int16 => "Int16",
            Self::Uint32 => "Uint32",
            Self::Int32 => "Int32",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::CInt16 => "CInt16",
            Self::CInt32 => "CInt32",
            Self::CFloat32 => "CFloat32",
            Self::CFloat64 => "CFloat64",
        }
    }

    /// True for the four complex variants.
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::CInt16 | Self::CInt32 | Self::CFloat32 | Self::CFloat64)
    }

    /// The host element tag this native type maps to, or `None` when the
    /// host runtime has no representation for it (`Unknown` and all
    /// complex variants).
    ///
    /// Total over the enumeration and injective over the supported subset.
    pub const fn host_tag(self) -> Option<HostTag> {
        match self {
            Self::Uint8 => Some(HostTag::Uint8),
            Self::Int16 => Some(HostTag::Int16),
            Self::Uint16 => Some(HostTag::Uint16),
            Self::Int32 => Some(HostTag::Int32),
            Self::Uint32 => Some(HostTag::Uint32),
            Self::Float32 => Some(HostTag::Float32),
            Self::Float64 => Some(HostTag::Float64),
            Self::Unknown
            | Self::CInt16
            | Self::CInt32
            | Self::CFloat32
            | Self::CFloat64 => None,
        }
    }
}

impl core::fmt::Display for ElementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ===========================================================================
// Host element tags
// ===========================================================================

/// Element tag of a host-runtime typed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HostTag {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Float64,
}

impl HostTag {
    /// Every tag, in declaration order. Indexable by [`Self::index`].
    pub const ALL: [HostTag; 8] = [
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Float32,
        Self::Float64,
    ];

    /// Width of one element in bytes.
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Canonical host constructor name for this tag.
    pub const fn constructor_name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
        }
    }

    /// The native element type this tag resolves to.
    ///
    /// `Int8` collapses onto [`ElementType::Uint8`]: the native domain has
    /// no signed 8-bit encoding, and the original binding layer folded
    /// both byte tags onto the unsigned type. Lossy and one-directional,
    /// kept as-is.
    pub const fn element_type(self) -> ElementType {
        match self {
            Self::Int8 | Self::Uint8 => ElementType::Uint8,
            Self::Int16 => ElementType::Int16,
            Self::Uint16 => ElementType::Uint16,
            Self::Int32 => ElementType::Int32,
            Self::Uint32 => ElementType::Uint32,
            Self::Float32 => ElementType::Float32,
            Self::Float64 => ElementType::Float64,
        }
    }

    /// Position in [`Self::ALL`], for registry indexing.
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for HostTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.constructor_name())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_mapping_is_injective() {
        let supported = [
            ElementType::Uint8,
            ElementType::Int16,
            ElementType::Uint16,
            ElementType::Int32,
            ElementType::Uint32,
            ElementType::Float32,
            ElementType::Float64,
        ];
        for (i, a) in supported.iter().enumerate() {
            let tag = a.host_tag().expect("supported type has a tag");
            assert_eq!(tag.element_type(), *a, "{a} must round-trip");
            for b in &supported[i + 1..] {
                assert_ne!(tag, b.host_tag().unwrap(), "{a} and {b} share a tag");
            }
        }
    }

    #[test]
    fn int8_collapses_to_uint8() {
        assert_eq!(HostTag::Int8.element_type(), ElementType::Uint8);
        assert_eq!(HostTag::Uint8.element_type(), ElementType::Uint8);
        // The reverse direction only ever produces the unsigned tag.
        assert_eq!(ElementType::Uint8.host_tag(), Some(HostTag::Uint8));
    }

    #[test]
    fn complex_and_unknown_have_no_tag() {
        for t in [
            ElementType::Unknown,
            ElementType::CInt16,
            ElementType::CInt32,
            ElementType::CFloat32,
            ElementType::CFloat64,
        ] {
            assert_eq!(t.host_tag(), None, "{t} must be unsupported");
        }
    }

    #[test]
    fn byte_widths() {
        assert_eq!(ElementType::Unknown.byte_width(), 0);
        assert_eq!(ElementType::Uint8.byte_width(), 1);
        assert_eq!(ElementType::Int16.byte_width(), 2);
        assert_eq!(ElementType::Float32.byte_width(), 4);
        assert_eq!(ElementType::Float64.byte_width(), 8);
        assert_eq!(ElementType::CFloat64.byte_width(), 16);
        for tag in HostTag::ALL {
            assert_eq!(tag.byte_width(), tag.element_type().byte_width());
        }
    }

    #[test]
    fn constructor_names() {
        assert_eq!(HostTag::Uint8.constructor_name(), "Uint8Array");
        assert_eq!(HostTag::Float64.constructor_name(), "Float64Array");
    }

    #[test]
    fn tag_indices_match_all_order() {
        for (i, tag) in HostTag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }
}
