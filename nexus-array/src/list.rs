//! Ordered, indexable sequence traits.
//!
//! Generic code that only needs "a list" is written against these traits
//! rather than a concrete type:
//!
//! ```text
//! Container<T>      - len, is_empty, clear, values
//!     │
//!     └── List<T>   - positional get/set/insert/remove, search, sort, swap
//! ```
//!
//! Positional operations follow the lenient contract of
//! [`DynamicArray`]: `index == len` appends for `set`/`insert`, other
//! out-of-range indices are ignored.
//!
//! Implemented for [`DynamicArray`] and, so generic code can run against
//! the standard library as a reference, for `Vec<T>`.
//!
//! # Example
//!
//! ```
//! use nexus_array::{DynamicArray, List};
//!
//! /// Moves the largest element to the front.
//! fn max_to_front<T: Ord, L: List<T>>(list: &mut L) {
//!     let mut best = 0;
//!     for i in 1..list.len() {
//!         if list.get(i) > list.get(best) {
//!             best = i;
//!         }
//!     }
//!     list.swap(0, best);
//! }
//!
//! let mut array = DynamicArray::from([3, 9, 4]);
//! max_to_front(&mut array);
//! assert_eq!(array.values(), [9, 3, 4]);
//! ```

use crate::DynamicArray;

use core::cmp::Ordering;

/// A collection with a length that can be emptied and copied out.
pub trait Container<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element.
    fn clear(&mut self);

    /// Returns an independent copy of the elements, in order.
    fn values(&self) -> Vec<T>
    where
        T: Clone;
}

/// An ordered sequence addressed by position.
///
/// Dyn-compatible: the comparator is taken as `&mut dyn FnMut`.
pub trait List<T>: Container<T> {
    /// Returns the element at `index`.
    fn get(&self, index: usize) -> Option<&T>;

    /// Removes and returns the element at `index`, shifting later elements
    /// left.
    fn remove(&mut self, index: usize) -> Option<T>;

    /// Appends a value.
    fn add(&mut self, value: T);

    /// Returns `true` if any element equals `value`.
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq;

    /// Returns the position of the first element equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq;

    /// Sorts in place with `compare`.
    fn sort_by(&mut self, compare: &mut dyn FnMut(&T, &T) -> Ordering);

    /// Exchanges two positions; ignored if either is out of range.
    fn swap(&mut self, i: usize, j: usize);

    /// Inserts at `index`, shifting later elements right.
    fn insert(&mut self, index: usize, value: T);

    /// Overwrites the element at `index`.
    fn set(&mut self, index: usize, value: T);
}

// =============================================================================
// DynamicArray
// =============================================================================

impl<T> Container<T> for DynamicArray<T> {
    #[inline]
    fn len(&self) -> usize {
        DynamicArray::len(self)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        DynamicArray::is_empty(self)
    }

    #[inline]
    fn clear(&mut self) {
        DynamicArray::clear(self);
    }

    #[inline]
    fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        DynamicArray::values(self)
    }
}

impl<T> List<T> for DynamicArray<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        DynamicArray::get(self, index)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        DynamicArray::remove(self, index)
    }

    #[inline]
    fn add(&mut self, value: T) {
        DynamicArray::add(self, value);
    }

    #[inline]
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        DynamicArray::contains(self, value)
    }

    #[inline]
    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        DynamicArray::index_of(self, value)
    }

    #[inline]
    fn sort_by(&mut self, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
        DynamicArray::sort_by(self, compare);
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        DynamicArray::swap(self, i, j);
    }

    #[inline]
    fn insert(&mut self, index: usize, value: T) {
        DynamicArray::insert(self, index, value);
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) {
        DynamicArray::set(self, index, value);
    }
}

// =============================================================================
// Vec
// =============================================================================

impl<T> Container<T> for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }

    #[inline]
    fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.clone()
    }
}

impl<T> List<T> for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        (index < Vec::len(self)).then(|| Vec::remove(self, index))
    }

    #[inline]
    fn add(&mut self, value: T) {
        self.push(value);
    }

    #[inline]
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(value)
    }

    #[inline]
    fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|element| element == value)
    }

    #[inline]
    fn sort_by(&mut self, compare: &mut dyn FnMut(&T, &T) -> Ordering) {
        self.as_mut_slice().sort_by(compare);
    }

    #[inline]
    fn swap(&mut self, i: usize, j: usize) {
        if i < Vec::len(self) && j < Vec::len(self) {
            self.as_mut_slice().swap(i, j);
        }
    }

    #[inline]
    fn insert(&mut self, index: usize, value: T) {
        if index <= Vec::len(self) {
            Vec::insert(self, index, value);
        }
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) {
        if let Some(slot) = self.get_mut(index) {
            *slot = value;
        } else if index == Vec::len(self) {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sorts then drops adjacent duplicates, using only the trait surface.
    fn sort_dedup<T: Ord, L: List<T>>(list: &mut L) {
        list.sort_by(&mut |a: &T, b: &T| a.cmp(b));
        let mut i = 1;
        while i < list.len() {
            if list.get(i) == list.get(i - 1) {
                list.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn exercise<L: List<u32> + Default>() -> Vec<u32> {
        let mut list = L::default();
        assert!(list.is_empty());
        for value in [5, 3, 5, 1, 3, 9] {
            list.add(value);
        }
        sort_dedup(&mut list);
        list.insert(0, 0);
        list.insert(100, 7);
        list.set(list.len(), 10);
        list.set(100, 11);
        list.swap(1, 2);
        list.swap(1, 100);
        assert_eq!(list.remove(100), None);
        assert_eq!(list.index_of(&9), Some(4));
        assert!(list.contains(&10));
        assert!(!list.contains(&11));
        list.values()
    }

    #[test]
    fn generic_algorithm_matches_vec() {
        let array = exercise::<DynamicArray<u32>>();
        let vec = exercise::<Vec<u32>>();
        assert_eq!(array, [0, 3, 1, 5, 9, 10]);
        assert_eq!(array, vec);
    }

    #[test]
    fn dyn_list() {
        let mut lists: Vec<Box<dyn List<i32>>> = Vec::new();
        lists.push(Box::new(DynamicArray::<i32>::new()));
        lists.push(Box::new(Vec::<i32>::new()));

        for list in &mut lists {
            list.add(2);
            list.add(1);
            list.sort_by(&mut |a: &i32, b: &i32| a.cmp(b));
            assert_eq!(list.get(0), Some(&1));
            assert_eq!(list.len(), 2);
            list.clear();
            assert!(list.is_empty());
        }
    }
}
