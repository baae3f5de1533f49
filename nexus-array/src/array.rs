//! Growable contiguous array with a configurable resize policy.
//!
//! Elements live in `[0, len)` of a single heap buffer. Positional insert
//! and remove shift the tail in place with one `memmove`; the buffer grows
//! and shrinks according to the array's [`ResizePolicy`].
//!
//! # Out-of-range positions
//!
//! Positional mutators are lenient. An index past the end is ignored rather
//! than panicking:
//!
//! | Operation | `index < len` | `index == len` | `index > len` |
//! |-----------|---------------|----------------|---------------|
//! | [`get`](DynamicArray::get) | `Some` | `None` | `None` |
//! | [`set`](DynamicArray::set) | overwrite | append | no-op |
//! | [`insert`](DynamicArray::insert) | shift right | append | no-op |
//! | [`remove`](DynamicArray::remove) | `Some`, shift left | `None` | `None` |
//! | [`swap`](DynamicArray::swap) | swap | no-op | no-op |
//!
//! [`Index`](core::ops::Index) is the exception: like slices, it panics.
//!
//! # Allocation failure
//!
//! Growing methods come in two flavours. `add`, `insert`, `set` behave like
//! `Vec`: capacity overflow panics and allocator failure calls
//! [`handle_alloc_error`]. The `try_` variants return [`AllocError`] and
//! leave the array unchanged, except for batch items an iterator yields
//! beyond its reported length.
//!
//! # Example
//!
//! ```
//! use nexus_array::DynamicArray;
//!
//! let mut array = DynamicArray::from([1, 2, 3]);
//!
//! array.insert_all(1, [10, 20]);
//! assert_eq!(array.values(), [1, 10, 20, 2, 3]);
//!
//! assert_eq!(array.remove(0), Some(1));
//! assert_eq!(array.len(), 4);
//!
//! array.set(4, 99); // index == len appends
//! array.set(10, 0); // ignored
//! array.swap(0, 4);
//! assert_eq!(array.values(), [99, 20, 2, 3, 10]);
//! ```

use crate::raw::RawBuffer;
use crate::{AllocError, IntoIter, ResizePolicy};

use core::any::type_name;
use core::cmp::Ordering;
use core::fmt;
use core::iter;
use core::mem::ManuallyDrop;
use core::ops::{Index, IndexMut};
use core::ptr;
use core::slice;
use std::alloc::handle_alloc_error;

/// Growable array backed by one contiguous buffer.
///
/// Not synchronized. All mutation takes `&mut self`; sharing one array
/// between threads requires an external lock.
pub struct DynamicArray<T> {
    buf: RawBuffer<T>,
    len: usize,
    policy: ResizePolicy,
}

// SAFETY: the array owns its elements; thread-safety follows T.
unsafe impl<T: Send> Send for DynamicArray<T> {}
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

#[cold]
#[track_caller]
fn handle_error(err: AllocError) -> ! {
    match err {
        AllocError::CapacityOverflow => panic!("capacity overflow"),
        AllocError::AllocFailed { layout } => handle_alloc_error(layout),
    }
}

impl<T> DynamicArray<T> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates an empty array with the default policy. Does not allocate.
    #[inline]
    pub fn new() -> Self {
        Self::with_policy(ResizePolicy::default())
    }

    /// Creates an empty array with a custom policy. Does not allocate.
    #[inline]
    pub const fn with_policy(policy: ResizePolicy) -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
            policy,
        }
    }

    /// Creates an empty array with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| handle_error(err))
    }

    /// Creates an empty array with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if the buffer cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::try_with_capacity_and_policy(capacity, ResizePolicy::default())
    }

    pub(crate) fn try_with_capacity_and_policy(
        capacity: usize,
        policy: ResizePolicy,
    ) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBuffer::try_with_capacity(capacity)?,
            len: 0,
            policy,
        })
    }

    /// Creates an array holding `values` in order.
    ///
    /// ```
    /// use nexus_array::DynamicArray;
    ///
    /// let array = DynamicArray::from_values("abc".chars());
    /// assert_eq!(array.values(), ['a', 'b', 'c']);
    /// ```
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut array = Self::new();
        array.extend(values);
        array
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the resize policy.
    #[inline]
    pub const fn policy(&self) -> ResizePolicy {
        self.policy
    }

    /// Returns the element at `index`, or `None` if out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// out of range.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Returns the first element.
    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Returns `true` if any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    /// Returns `true` if every one of `values` is present.
    ///
    /// Vacuously `true` when `values` is empty. O(n·m).
    ///
    /// ```
    /// use nexus_array::DynamicArray;
    ///
    /// let array = DynamicArray::from(["a", "b", "c"]);
    /// assert!(array.contains_all(&["c", "a"]));
    /// assert!(!array.contains_all(&["a", "d"]));
    /// assert!(array.contains_all(&[]));
    /// ```
    pub fn contains_all<'a, I>(&self, values: I) -> bool
    where
        T: PartialEq + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        values.into_iter().all(|value| self.contains(value))
    }

    /// Returns the position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|element| element == value)
    }

    /// Returns an independent copy of the elements, in order.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Views the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) is initialized; ptr is dangling-but-aligned when
        // nothing is allocated, which is valid for empty and ZST slices.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Views the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and &mut self guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Iterates over references to the elements.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates over mutable references to the elements.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    // =========================================================================
    // Append
    // =========================================================================

    /// Appends a value.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow.
    #[inline]
    pub fn add(&mut self, value: T) {
        self.try_add(value).unwrap_or_else(|err| handle_error(err));
    }

    /// Appends a value.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growth fails. The array is unchanged and
    /// `value` is dropped.
    #[inline]
    pub fn try_add(&mut self, value: T) -> Result<(), AllocError> {
        self.try_grow_by(1)?;
        // SAFETY: try_grow_by guarantees len < capacity.
        unsafe { self.buf.as_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Appends every value in order, with a single growth decision for the
    /// whole batch.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow.
    pub fn add_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.try_add_all(values)
            .unwrap_or_else(|err| handle_error(err));
    }

    /// Appends every value in order.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growth fails. If the reservation for the
    /// reported `len()` fails, the array is unchanged. Items yielded beyond
    /// the reported length are appended one at a time; if growth fails
    /// there, the items already appended are kept.
    pub fn try_add_all<I>(&mut self, values: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = values.into_iter();
        let additional = iter.len();
        self.try_extend_counted(iter, additional)
    }

    /// Reserves room for `additional` values in one step, writes up to that
    /// many, then appends any excess one at a time. A reservation the
    /// iterator did not fill is handed back through the shrink policy.
    fn try_extend_counted<I>(&mut self, mut iter: I, additional: usize) -> Result<(), AllocError>
    where
        I: Iterator<Item = T>,
    {
        self.try_grow_by(additional)?;
        // `additional` is a hint: never write past what was reserved.
        let mut written = 0;
        for value in iter.by_ref().take(additional) {
            // SAFETY: reserved capacity > len for every slot up to additional.
            unsafe { self.buf.as_ptr().add(self.len).write(value) };
            self.len += 1;
            written += 1;
        }
        if written < additional {
            self.shrink();
            return Ok(());
        }
        for value in iter {
            self.try_add(value)?;
        }
        Ok(())
    }

    // =========================================================================
    // Positional mutation
    // =========================================================================

    /// Overwrites the element at `index`, dropping the old one.
    ///
    /// `index == len` appends. Any other out-of-range index is ignored and
    /// `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow when appending.
    #[inline]
    pub fn set(&mut self, index: usize, value: T) {
        self.try_set(index, value)
            .unwrap_or_else(|err| handle_error(err));
    }

    /// Fallible [`set`](Self::set).
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if appending requires growth that fails.
    pub fn try_set(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        if let Some(slot) = self.get_mut(index) {
            *slot = value;
        } else if index == self.len {
            self.try_add(value)?;
        }
        Ok(())
    }

    /// Inserts `value` at `index`, shifting later elements right.
    ///
    /// `index == len` appends; `index > len` is ignored.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) {
        self.try_insert(index, value)
            .unwrap_or_else(|err| handle_error(err));
    }

    /// Fallible [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growth fails. The array is unchanged.
    #[inline]
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<(), AllocError> {
        self.try_insert_all(index, iter::once(value))
    }

    /// Inserts `values` starting at `index`, shifting later elements right
    /// by `values.len()`.
    ///
    /// `index == len` appends; `index > len` is ignored.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow.
    pub fn insert_all<I>(&mut self, index: usize, values: I)
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.try_insert_all(index, values)
            .unwrap_or_else(|err| handle_error(err));
    }

    /// Fallible [`insert_all`](Self::insert_all).
    ///
    /// If the iterator panics, the elements already inserted are kept and
    /// the shifted tail is leaked.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError`] if growth fails. If the reservation for the
    /// reported `len()` fails, the array is unchanged. Items yielded beyond
    /// the reported length are inserted one at a time; if growth fails
    /// there, the items already inserted are kept.
    pub fn try_insert_all<I>(&mut self, index: usize, values: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        if index > self.len {
            return Ok(());
        }
        if index == self.len {
            return self.try_add_all(values);
        }

        let mut iter = values.into_iter();
        let additional = iter.len();
        if additional == 0 {
            return Ok(());
        }
        self.try_grow_by(additional)?;

        let tail = self.len - index;
        let mut written = 0;
        // SAFETY: capacity > len + additional, so the shifted tail and the
        // gap both fit. Only [0, len) is ever exposed: len is pulled back to
        // `index` while the gap is filled.
        unsafe {
            let base = self.buf.as_ptr().add(index);
            ptr::copy(base, base.add(additional), tail);
            self.len = index;

            for value in iter.by_ref().take(additional) {
                base.add(written).write(value);
                written += 1;
                self.len = index + written;
            }

            if written < additional {
                ptr::copy(base.add(additional), base.add(written), tail);
            }
            self.len = index + written + tail;
        }

        if written < additional {
            self.shrink();
            return Ok(());
        }

        // Iterator yielded more than it reported.
        let mut at = index + written;
        for value in iter {
            self.try_insert(at, value)?;
            at += 1;
        }
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// left. May shrink the buffer per the resize policy.
    ///
    /// Returns `None` and leaves the array unchanged if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }

        // SAFETY: index < len, so the read is of an initialized slot and the
        // copy moves the initialized range (index, len) down by one.
        let value = unsafe {
            let p = self.buf.as_ptr().add(index);
            let value = p.read();
            ptr::copy(p.add(1), p, self.len - index - 1);
            value
        };
        self.len -= 1;

        self.shrink();
        Some(value)
    }

    /// Exchanges the elements at `i` and `j`. Ignored if either is out of
    /// range.
    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        if i < self.len && j < self.len {
            self.as_mut_slice().swap(i, j);
        }
    }

    // =========================================================================
    // Bulk
    // =========================================================================

    /// Drops every element and releases the buffer.
    pub fn clear(&mut self) {
        let len = self.len;
        // Zero len first: a panicking Drop must not lead to a double drop.
        self.len = 0;
        // SAFETY: [0, len) was initialized and is no longer reachable.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.as_ptr(), len));
        }
        if self.buf.capacity() != 0 {
            log::trace!(
                "DynamicArray<{}>: released {} slots",
                type_name::<T>(),
                self.buf.capacity()
            );
        }
        self.buf.release();
    }

    /// Sorts the elements with `compare`.
    ///
    /// The sort is stable: equal elements keep their relative order.
    ///
    /// ```
    /// use nexus_array::DynamicArray;
    ///
    /// let mut array = DynamicArray::from([3, 1, 2]);
    /// array.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(array.values(), [3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        if self.len < 2 {
            return;
        }
        self.as_mut_slice().sort_by(compare);
    }

    /// Sorts the elements in ascending order. Stable.
    #[inline]
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Reallocates to exactly `len` slots.
    ///
    /// Applies even when the policy never shrinks. A failed reallocation
    /// keeps the current buffer.
    pub fn shrink_to_fit(&mut self) {
        if self.buf.capacity() > self.len {
            self.shrink_to(self.len);
        }
    }

    // =========================================================================
    // Capacity management
    // =========================================================================

    /// Ensures room for `additional` more elements per the growth policy.
    #[inline]
    fn try_grow_by(&mut self, additional: usize) -> Result<(), AllocError> {
        if additional == 0 {
            return Ok(());
        }
        match self
            .policy
            .grow_target(self.buf.capacity(), self.len, additional)?
        {
            Some(new_cap) => self.try_resize(new_cap),
            None => Ok(()),
        }
    }

    /// Evaluates the shrink policy after a removal.
    #[inline]
    fn shrink(&mut self) {
        if let Some(new_cap) = self.policy.shrink_target(self.buf.capacity(), self.len) {
            self.shrink_to(new_cap);
        }
    }

    fn shrink_to(&mut self, new_cap: usize) {
        if let Err(err) = self.try_resize(new_cap) {
            log::debug!(
                "DynamicArray<{}>: shrink to {} failed, keeping {} slots: {}",
                type_name::<T>(),
                new_cap,
                self.buf.capacity(),
                err
            );
        }
    }

    #[cold]
    fn try_resize(&mut self, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(new_cap >= self.len);
        let old_cap = self.buf.capacity();
        self.buf.try_resize(new_cap)?;
        log::trace!(
            "DynamicArray<{}>: capacity {} -> {} (len {})",
            type_name::<T>(),
            old_cap,
            new_cap,
            self.len
        );
        Ok(())
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) is initialized; the buffer frees itself afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.as_ptr(),
                self.len,
            ));
        }
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut array = Self::with_policy(self.policy);
        array.add_all(self.iter().cloned());
        array
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    /// Element-wise; the resize policy is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders a `DynamicArray` label line followed by the elements separated by
/// `", "`. Diagnostics only; not a parseable format.
impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DynamicArray\n")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

/// Reserves for the iterator's lower size bound up front. If the iterator
/// yields fewer items, the unused slack is returned per the shrink policy;
/// with shrinking disabled the reservation is kept.
impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let iter = values.into_iter();
        let (lower, _) = iter.size_hint();
        self.try_extend_counted(iter, lower)
            .unwrap_or_else(|err| handle_error(err));
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, values: I) {
        self.extend(values.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        Self::from_values(values)
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(values: Vec<T>) -> Self {
        let mut array = Self::new();
        array.add_all(values);
        array
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        let mut array = Self::new();
        array.add_all(values);
        array
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so ownership of the buffer and
        // its [0, len) elements moves to the iterator exactly once.
        let buf = unsafe { ptr::read(&this.buf) };
        IntoIter::new(buf, this.len)
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
