use crate::core::{
    sample::Sample,
    series::{EmptySeries, Series},
};

impl<V: Copy + PartialOrd> Series<V> {
    /// Find the sample with the greatest value.
    ///
    /// Ties resolve to the earliest sample: the accumulator is only replaced
    /// by a strictly greater value.
    pub fn max_by_value(&self) -> Result<Sample<V>, EmptySeries> {
        let (first, rest) = self.split_first().ok_or(EmptySeries)?;
        Ok(rest.iter().fold(*first, |max, sample| {
            if sample.value > max.value { *sample } else { max }
        }))
    }
}
