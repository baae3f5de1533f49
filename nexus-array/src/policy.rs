//! Capacity growth and shrink policy.
//!
//! A [`ResizePolicy`] decides when a [`DynamicArray`](crate::DynamicArray)
//! reallocates and to what size:
//!
//! ```text
//! grow:   len + n >= capacity            -> capacity = growth × (capacity + n)
//! shrink: len <= shrink × capacity       -> capacity = len
//!         (shrink == 0 disables shrinking)
//! ```
//!
//! Geometric growth keeps appends amortized O(1). Shrinking only triggers
//! once occupancy falls to a quarter of capacity (by default), so alternating
//! add/remove around a boundary does not thrash the allocator.

use crate::{AllocError, BuildError, DynamicArray};

/// Per-instance growth and shrink factors.
///
/// # Example
///
/// ```
/// use nexus_array::{DynamicArray, ResizePolicy};
///
/// let policy = ResizePolicy::new(1.5, 0.0).unwrap();
/// let mut array: DynamicArray<u32> = DynamicArray::with_policy(policy);
///
/// array.add(1);
/// assert_eq!(array.capacity(), 2); // 1.5 × (0 + 1) truncates to 1; growth always leaves a spare slot
/// assert_eq!(array.policy().growth_factor(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizePolicy {
    growth_factor: f64,
    shrink_factor: f64,
}

impl ResizePolicy {
    /// Grow by 100%.
    pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

    /// Shrink when length is 25% of capacity.
    pub const DEFAULT_SHRINK_FACTOR: f64 = 0.25;

    /// Creates a validated policy.
    ///
    /// # Errors
    ///
    /// - [`BuildError::InvalidGrowthFactor`] unless `growth_factor` is finite
    ///   and `>= 1.0`
    /// - [`BuildError::InvalidShrinkFactor`] unless `shrink_factor` is finite
    ///   and in `[0.0, 1.0)`
    pub fn new(growth_factor: f64, shrink_factor: f64) -> Result<Self, BuildError> {
        if !growth_factor.is_finite() || growth_factor < 1.0 {
            return Err(BuildError::InvalidGrowthFactor(growth_factor));
        }
        if !shrink_factor.is_finite() || !(0.0..1.0).contains(&shrink_factor) {
            return Err(BuildError::InvalidShrinkFactor(shrink_factor));
        }
        Ok(Self {
            growth_factor,
            shrink_factor,
        })
    }

    /// Default growth, shrinking disabled.
    pub const fn never_shrink() -> Self {
        Self {
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            shrink_factor: 0.0,
        }
    }

    /// Returns the growth factor.
    #[inline]
    pub const fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Returns the shrink factor. Zero means never shrink.
    #[inline]
    pub const fn shrink_factor(&self) -> f64 {
        self.shrink_factor
    }

    /// Returns `true` if removals may release capacity.
    #[inline]
    pub fn shrinks(&self) -> bool {
        self.shrink_factor != 0.0
    }

    /// Capacity to grow to before adding `additional` elements.
    ///
    /// Returns `Ok(None)` when the current capacity suffices. Growth is
    /// triggered once `len + additional` reaches `capacity`, so a buffer is
    /// never filled to the last slot. The returned capacity is always
    /// strictly greater than `len + additional`.
    ///
    /// # Errors
    ///
    /// [`AllocError::CapacityOverflow`] if the required length overflows.
    pub fn grow_target(
        &self,
        capacity: usize,
        len: usize,
        additional: usize,
    ) -> Result<Option<usize>, AllocError> {
        let required = len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow)?;
        if required < capacity {
            return Ok(None);
        }

        // capacity + additional >= required, so this can only overflow when
        // required itself is near usize::MAX.
        let base = capacity.saturating_add(additional);
        // Float-to-int casts saturate.
        let scaled = (self.growth_factor * base as f64) as usize;
        let floor = required
            .checked_add(1)
            .ok_or(AllocError::CapacityOverflow)?;
        Ok(Some(scaled.max(floor)))
    }

    /// Capacity to shrink to after a removal left `len` elements.
    ///
    /// Returns `None` if shrinking is disabled or occupancy is still above
    /// the threshold.
    pub fn shrink_target(&self, capacity: usize, len: usize) -> Option<usize> {
        if !self.shrinks() || len >= capacity {
            return None;
        }
        let threshold = (capacity as f64 * self.shrink_factor) as usize;
        (len <= threshold).then_some(len)
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
            shrink_factor: Self::DEFAULT_SHRINK_FACTOR,
        }
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for a [`DynamicArray`] with a custom policy and initial capacity.
///
/// # Example
///
/// ```
/// use nexus_array::{ArrayBuilder, DynamicArray};
///
/// let array: DynamicArray<u64> = ArrayBuilder::default()
///     .capacity(1024)
///     .growth_factor(1.5)
///     .never_shrink()
///     .build()
///     .unwrap();
///
/// assert_eq!(array.capacity(), 1024);
/// assert!(!array.policy().shrinks());
/// ```
#[derive(Clone, Debug)]
pub struct ArrayBuilder {
    capacity: usize,
    growth_factor: f64,
    shrink_factor: f64,
}

impl Default for ArrayBuilder {
    fn default() -> Self {
        Self {
            capacity: 0,
            growth_factor: ResizePolicy::DEFAULT_GROWTH_FACTOR,
            shrink_factor: ResizePolicy::DEFAULT_SHRINK_FACTOR,
        }
    }
}

impl ArrayBuilder {
    /// Initial capacity. Zero (the default) defers allocation to the first add.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Growth factor applied to `capacity + n` on reallocation.
    pub fn growth_factor(mut self, factor: f64) -> Self {
        self.growth_factor = factor;
        self
    }

    /// Occupancy fraction at or below which a removal shrinks to fit.
    pub fn shrink_factor(mut self, factor: f64) -> Self {
        self.shrink_factor = factor;
        self
    }

    /// Disable shrinking on removal.
    pub fn never_shrink(mut self) -> Self {
        self.shrink_factor = 0.0;
        self
    }

    /// Copies both factors from an existing policy.
    pub fn policy(mut self, policy: ResizePolicy) -> Self {
        self.growth_factor = policy.growth_factor;
        self.shrink_factor = policy.shrink_factor;
        self
    }

    /// Builds the array.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] for invalid factors or a failed initial
    /// allocation.
    pub fn build<T>(&self) -> Result<DynamicArray<T>, BuildError> {
        let policy = ResizePolicy::new(self.growth_factor, self.shrink_factor)?;
        let array = DynamicArray::try_with_capacity_and_policy(self.capacity, policy)?;
        Ok(array)
    }
}
