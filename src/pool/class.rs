//! Power-of-two size-class arithmetic.

/// Largest power of two that is `<= n`, or 0 when `n` is 0.
#[inline]
pub(crate) fn floor_power_of_two(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        1 << (usize::BITS - 1 - n.leading_zeros())
    }
}

/// The contiguous range of classes `2^min_shift ..= 2^max_shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Classes {
    min_shift: u32,
    max_shift: u32,
}

impl Classes {
    /// Builds the class range for a requested floor and ceiling.
    ///
    /// The floor is rounded up and the ceiling rounded down. Returns `None`
    /// when the ceiling is zero or the rounded floor exceeds it.
    pub(crate) fn new(min_size: usize, max_size: usize) -> Option<Self> {
        let max = floor_power_of_two(max_size);
        let min = min_size.max(1).checked_next_power_of_two()?;
        if max == 0 || min > max {
            return None;
        }
        Some(Self {
            min_shift: min.trailing_zeros(),
            max_shift: max.trailing_zeros(),
        })
    }

    #[inline]
    pub(crate) fn min(&self) -> usize {
        1 << self.min_shift
    }

    #[inline]
    pub(crate) fn max(&self) -> usize {
        1 << self.max_shift
    }

    /// Number of classes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        (self.max_shift - self.min_shift + 1) as usize
    }

    /// Smallest class that can hold `size`, clamped to the ceiling.
    ///
    /// Returns `(index, class)`.
    #[inline]
    pub(crate) fn for_size(&self, size: usize) -> (usize, usize) {
        let class = if size >= self.max() {
            self.max()
        } else {
            // size < max <= 2^(BITS-1), so this cannot overflow
            size.max(self.min()).next_power_of_two()
        };
        ((class.trailing_zeros() - self.min_shift) as usize, class)
    }

    /// Index of `capacity` if it is exactly one of the declared classes.
    #[inline]
    pub(crate) fn index_of(&self, capacity: usize) -> Option<usize> {
        if !capacity.is_power_of_two() {
            return None;
        }
        let shift = capacity.trailing_zeros();
        (self.min_shift..=self.max_shift)
            .contains(&shift)
            .then(|| (shift - self.min_shift) as usize)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> {
        (self.min_shift..=self.max_shift).map(|shift| 1usize << shift)
    }
}
