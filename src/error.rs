use core::fmt;

use crate::element::ElementType;

/// Everything that can go wrong at the bridge boundary.
///
/// All failures are reported synchronously to the immediate caller; none
/// are retried or silently recovered, and the bridge never mutates
/// caller-visible state before failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// The element type has no host-side representation (complex or
    /// unknown).
    UnsupportedType(ElementType),
    /// The host runtime could not produce the requested buffer: the named
    /// constructor is missing, not callable, or refused the allocation.
    AllocationFailed { ctor: &'static str },
    /// The host object carries no external backing buffer at all.
    NoExternalData,
    /// The expected type itself is unidentifiable — a caller bug, not bad
    /// input.
    UnidentifiableType,
    /// The host buffer's element type disagrees with the expected native
    /// type.
    TypeMismatch {
        found: ElementType,
        expected: ElementType,
    },
    /// The host buffer has fewer elements than required.
    LengthTooShort { required: usize, actual: usize },
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType(t) => write!(f, "unsupported array type: {t}"),
            Self::AllocationFailed { ctor } => {
                write!(f, "error allocating array via {ctor}")
            }
            Self::NoExternalData => write!(f, "object has no external array data"),
            Self::UnidentifiableType => write!(f, "expected array type is unidentifiable"),
            Self::TypeMismatch { found, expected } => {
                write!(f, "array type mismatch: got {found}, expected {expected}")
            }
            Self::LengthTooShort { required, actual } => {
                write!(f, "array length too short: {actual} elements, need at least {required}")
            }
        }
    }
}

impl core::error::Error for BridgeError {}
