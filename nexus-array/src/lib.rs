//! Growable contiguous array with a tunable resize policy.
//!
//! [`DynamicArray`] is a flat, index-addressable sequence over one heap
//! buffer. It differs from `Vec` in two ways that matter for long-running
//! systems:
//!
//! - **Policy-driven capacity**: growth and shrink are governed by a
//!   per-instance [`ResizePolicy`]. Capacity is given back once occupancy
//!   falls to a configurable fraction, so a burst does not pin memory forever.
//! - **Lenient positions**: out-of-range `set`/`insert`/`remove`/`swap` are
//!   no-ops instead of panics, and `index == len` appends.
//!
//! ```text
//! buffer:  [ e0 | e1 | e2 | e3 | ·· | ·· | ·· | ·· ]
//!            └──── len = 4 ────┘
//!            └──────────── capacity = 8 ───────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_array::dynamic_array;
//!
//! let mut array = dynamic_array![1, 2, 3];
//!
//! array.add(4);
//! array.insert(0, 0);
//! assert_eq!(array.values(), [0, 1, 2, 3, 4]);
//!
//! assert_eq!(array.get(2), Some(&2));
//! assert_eq!(array.get(9), None);
//!
//! assert_eq!(array.index_of(&3), Some(3));
//! assert!(array.contains_all(&[0, 4]));
//!
//! array.sort_by(|a, b| b.cmp(a));
//! assert_eq!(array.values(), [4, 3, 2, 1, 0]);
//!
//! println!("{array}"); // "DynamicArray\n4, 3, 2, 1, 0"
//! ```
//!
//! # Resize Policy
//!
//! | Event | Condition | New capacity |
//! |-------|-----------|--------------|
//! | grow | `len + n >= capacity` | `growth × (capacity + n)` |
//! | shrink | `len <= shrink × capacity` | `len` |
//!
//! Defaults are `growth = 2.0` and `shrink = 0.25`. A shrink factor of zero
//! disables shrinking. Use [`ArrayBuilder`] to configure both along with an
//! initial capacity:
//!
//! ```
//! use nexus_array::{ArrayBuilder, DynamicArray};
//!
//! let mut levels: DynamicArray<u64> = ArrayBuilder::default()
//!     .capacity(256)
//!     .never_shrink()
//!     .build()
//!     .unwrap();
//!
//! levels.add(100);
//! levels.remove(0);
//! assert_eq!(levels.capacity(), 256);
//! ```
//!
//! # Threading
//!
//! No internal synchronization. The array is `Send`/`Sync` when `T` is, and
//! every mutation takes `&mut self`, so sharing requires an external lock.
//!
//! # Logging
//!
//! Reallocations are reported through the [`log`](https://docs.rs/log)
//! facade at `trace` level. Nothing is emitted unless the application
//! installs a logger.

#![warn(missing_docs)]

mod array;
mod error;
mod iter;
pub mod list;
pub mod policy;
mod raw;

pub use array::DynamicArray;
pub use error::{AllocError, BuildError};
pub use iter::IntoIter;
pub use list::{Container, List};
pub use policy::{ArrayBuilder, ResizePolicy};

/// Creates a [`DynamicArray`] containing the arguments, in order.
///
/// ```
/// use nexus_array::dynamic_array;
///
/// let array = dynamic_array!["a", "b"];
/// assert_eq!(array.len(), 2);
///
/// let empty: nexus_array::DynamicArray<u8> = dynamic_array![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($value),+])
    };
}
