//! Owning iterator.

use crate::raw::RawBuffer;

use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

/// Iterator that moves elements out of a [`DynamicArray`](crate::DynamicArray).
///
/// Created by `DynamicArray::into_iter`. Elements not yet yielded are
/// dropped along with the iterator.
pub struct IntoIter<T> {
    buf: RawBuffer<T>,
    /// Remaining elements are `[front, back)`.
    front: usize,
    back: usize,
}

// SAFETY: same ownership as DynamicArray.
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// Takes ownership of `buf` with `[0, len)` initialized.
    pub(crate) fn new(buf: RawBuffer<T>, len: usize) -> Self {
        Self {
            buf,
            front: 0,
            back: len,
        }
    }

    /// Remaining elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [front, back) is initialized and not yet yielded.
        unsafe {
            slice::from_raw_parts(self.buf.as_ptr().add(self.front), self.back - self.front)
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: front < back, slot is initialized and read exactly once.
        let value = unsafe { self.buf.as_ptr().add(self.front).read() };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: back now indexes the last unread initialized slot.
        Some(unsafe { self.buf.as_ptr().add(self.back).read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let front = self.front;
        let remaining = self.back - front;
        // Mark everything consumed before running destructors.
        self.front = self.back;
        // SAFETY: the range was initialized and is now unreachable.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_ptr().add(front),
                remaining,
            ));
        }
    }
}
