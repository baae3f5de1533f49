//! Error types for allocation and construction.

use core::fmt;
use std::alloc::Layout;

/// Failure to obtain backing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Requested capacity overflows `usize` or exceeds `isize::MAX` bytes.
    CapacityOverflow,
    /// The global allocator returned null.
    AllocFailed {
        /// Layout that could not be satisfied.
        layout: Layout,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::CapacityOverflow => write!(f, "capacity overflow"),
            AllocError::AllocFailed { layout } => write!(
                f,
                "memory allocation of {} bytes (align {}) failed",
                layout.size(),
                layout.align()
            ),
        }
    }
}

impl std::error::Error for AllocError {}

/// Error during array construction from an [`ArrayBuilder`](crate::ArrayBuilder)
/// or [`ResizePolicy::new`](crate::ResizePolicy::new).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildError {
    /// Growth factor must be finite and at least 1.0.
    InvalidGrowthFactor(f64),
    /// Shrink factor must be finite and within `[0.0, 1.0)`.
    InvalidShrinkFactor(f64),
    /// Initial capacity could not be allocated.
    Alloc(AllocError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidGrowthFactor(factor) => {
                write!(f, "growth factor {factor} must be finite and >= 1.0")
            }
            BuildError::InvalidShrinkFactor(factor) => {
                write!(f, "shrink factor {factor} must be finite and in [0.0, 1.0)")
            }
            BuildError::Alloc(err) => write!(f, "initial allocation: {err}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<AllocError> for BuildError {
    fn from(err: AllocError) -> Self {
        BuildError::Alloc(err)
    }
}
