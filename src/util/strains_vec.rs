use std::{
    iter::Copied,
    slice::Iter,
};

/// A `Vec<f64>` of section peaks where all entries must be non-negative.
#[derive(Clone, Debug, Default)]
pub struct StrainsVec {
    inner: Vec<f64>,
}

impl StrainsVec {
    /// Constructs a new, empty [`StrainsVec`] with at least the specified
    /// capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Appends an element to the back.
    pub fn push(&mut self, value: f64) {
        debug_assert!(
            value >= 0.0,
            "attempted to push negative strain {value}, please report as a bug"
        );

        self.inner.push(value);
    }

    /// Sorts the entries in descending order.
    pub fn sort_desc(&mut self) {
        self.inner.sort_by(|a, b| b.total_cmp(a));
    }

    /// Removes all zero entries.
    pub fn retain_non_zero(&mut self) {
        self.inner.retain(|&a| a > 0.0);
    }

    /// Removes all zeros and sorts the remaining entries in descending order.
    pub fn retain_non_zero_and_sort(&mut self) {
        self.retain_non_zero();
        self.sort_desc();
    }

    /// Amount of entries that are not zero.
    pub fn count_non_zero(&self) -> usize {
        self.inner.iter().filter(|&&a| a > 0.0).count()
    }

    /// Sum up all values.
    pub fn sum(&self) -> f64 {
        self.inner.iter().copied().sum()
    }

    /// Returns an iterator over the values, including zeros.
    pub fn iter(&self) -> Copied<Iter<'_, f64>> {
        self.inner.iter().copied()
    }

    /// Consumes the [`StrainsVec`] and returns the underlying `Vec<f64>`.
    pub fn into_vec(self) -> Vec<f64> {
        self.inner
    }
}

impl From<Vec<f64>> for StrainsVec {
    fn from(inner: Vec<f64>) -> Self {
        Self { inner }
    }
}
