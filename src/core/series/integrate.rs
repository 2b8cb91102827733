use std::ops::{Add, Div, Mul};

use itertools::Itertools;

use crate::{
    core::series::{EmptySeries, Series},
    quantity::{Zero, time::Hours},
};

impl<V> Series<V>
where
    V: Copy + Add<Output = V> + Div<f64, Output = V> + Mul<Hours>,
    <V as Mul<Hours>>::Output: Zero + Add<Output = <V as Mul<Hours>>::Output>,
{
    /// Integrate the values over time using the composite trapezoidal rule.
    ///
    /// Sample spacing may be irregular. Time is measured in hours since the first sample,
    /// so watts integrate into watt-hours. A single sample integrates to zero.
    pub fn integrate(&self) -> Result<<V as Mul<Hours>>::Output, EmptySeries> {
        let origin = self.first().ok_or(EmptySeries)?.time;
        let zero = <<V as Mul<Hours>>::Output as Zero>::ZERO;
        Ok(self.iter().tuple_windows().fold(zero, |total, (from, to)| {
            let width = Hours::from(to.time - origin) - Hours::from(from.time - origin);
            total + (from.value + to.value) / 2.0 * width
        }))
    }
}
