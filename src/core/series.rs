mod extremum;
mod integrate;

use crate::core::sample::Sample;

/// The series contains no samples to reduce.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("the series is empty")]
pub struct EmptySeries;

/// Chronologically ordered samples of a single physical quantity.
#[must_use]
#[derive(
    Clone,
    Debug,
    PartialEq,
    derive_more::Deref,
    derive_more::From,
    derive_more::IntoIterator,
)]
#[into_iterator(owned, ref)]
pub struct Series<V>(Vec<Sample<V>>);

impl<V> Default for Series<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> FromIterator<Sample<V>> for Series<V> {
    fn from_iter<T: IntoIterator<Item = Sample<V>>>(iterator: T) -> Self {
        Self(iterator.into_iter().collect())
    }
}

impl<V> Series<V> {
    pub fn map<T>(self, f: fn(V) -> T) -> Series<T> {
        self.0.into_iter().map(|sample| sample.map(f)).collect()
    }

    /// Keep the samples whose value strictly exceeds the threshold, preserving the order.
    ///
    /// Values at or below the threshold are treated as noise.
    pub fn above(&self, threshold: V) -> Self
    where
        V: Copy + PartialOrd,
    {
        self.iter().filter(|sample| sample.value > threshold).copied().collect()
    }
}
