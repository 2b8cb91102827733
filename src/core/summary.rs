use bon::Builder;
use chrono::NaiveDate;

use crate::{
    core::sample::Sample,
    quantity::{energy::WattHours, power::Watts, temperature::Celsius},
};

/// Daily statistics derived from the generation, temperature and consumption series.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct DailySummary {
    pub day: NaiveDate,

    /// Integral of the generation power above the noise threshold.
    pub energy_generated: WattHours,

    /// Peak generation power above the noise threshold, and when it happened.
    pub peak_power: Sample<Watts>,

    pub peak_temperature: Sample<Celsius>,

    /// Integral of the unfiltered consumption power.
    pub total_consumption: WattHours,

    pub peak_consumption: Sample<Watts>,
}
