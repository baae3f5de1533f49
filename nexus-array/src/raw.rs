//! Raw contiguous allocation without element tracking.
//!
//! `RawBuffer` owns a block of `capacity` uninitialized slots and nothing
//! else. It never reads, writes or drops elements; the owning array is
//! responsible for which slots are initialized.

use crate::AllocError;

use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;
use std::alloc::{Layout, alloc, dealloc, realloc};

pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    /// Slot count. Logical only for zero-sized `T`.
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Empty buffer, no allocation.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        let mut buf = Self::new();
        buf.try_resize(capacity)?;
        Ok(buf)
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    fn layout(capacity: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(capacity).map_err(|_| AllocError::CapacityOverflow)
    }

    /// Reallocates to exactly `new_cap` slots.
    ///
    /// Slots below `min(old_cap, new_cap)` keep their bytes. Slots at or
    /// beyond `new_cap` are discarded without being dropped, so the caller
    /// must have moved or dropped anything initialized there.
    ///
    /// On error the existing allocation is untouched.
    pub(crate) fn try_resize(&mut self, new_cap: usize) -> Result<(), AllocError> {
        if new_cap == self.cap {
            return Ok(());
        }
        if Self::IS_ZST {
            // Validate the request the same way a real allocation would.
            Self::layout(new_cap)?;
            self.cap = new_cap;
            return Ok(());
        }
        if new_cap == 0 {
            self.release();
            return Ok(());
        }

        let new_layout = Self::layout(new_cap)?;
        let raw = if self.cap == 0 {
            // SAFETY: new_layout has non-zero size (non-ZST, new_cap > 0).
            unsafe { alloc(new_layout) }
        } else {
            let old_layout = Self::layout(self.cap)?;
            // SAFETY: ptr was allocated by us with old_layout; new size is
            // non-zero and was validated by Layout::array.
            unsafe { realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) }
        };

        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            return Err(AllocError::AllocFailed { layout: new_layout });
        };
        self.ptr = ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Frees the allocation, leaving an empty buffer.
    pub(crate) fn release(&mut self) {
        if !Self::IS_ZST && self.cap != 0 {
            // SAFETY: cap != 0 means ptr came from alloc/realloc with this layout.
            unsafe {
                let layout = Layout::array::<T>(self.cap).unwrap_unchecked();
                dealloc(self.ptr.as_ptr().cast(), layout);
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}
