use chrono::NaiveDate;

use crate::{
    core::{
        channel::{Channel, Channels},
        feed::{Feed, FetchError},
        interval::Interval,
        series::EmptySeries,
        summary::DailySummary,
    },
    prelude::*,
    quantity::{power::Watts, temperature::Celsius},
};

#[derive(Debug, thiserror::Error)]
pub enum DayError {
    #[error("failed to fetch the {channel} series")]
    Fetch {
        channel: Channel,

        #[source]
        source: FetchError,
    },

    #[error("no usable {channel} samples on {day}")]
    EmptySeries {
        channel: Channel,
        day: NaiveDate,

        #[source]
        source: EmptySeries,
    },
}

/// Fetch the day's series and reduce them into the summary.
///
/// Generation readings at or below `generation_threshold` are excluded from both
/// the generated energy and the peak power.
#[instrument(skip_all, fields(day = %day))]
pub fn summarize_day(
    feed: &impl Feed,
    channels: &Channels,
    generation_threshold: Watts,
    day: NaiveDate,
    interval: Interval,
) -> Result<DailySummary, DayError> {
    let fetch = |channel: Channel| {
        feed.fetch_series(channels.id(channel), interval)
            .map_err(|source| DayError::Fetch { channel, source })
    };
    let empty = |channel: Channel| move |source| DayError::EmptySeries { channel, day, source };

    let temperature = fetch(Channel::Temperature)?.map(Celsius);
    let generation = fetch(Channel::Generation)?.map(Watts);
    let consumption = fetch(Channel::Consumption)?.map(Watts);

    let generating = generation.above(generation_threshold);
    info!(
        n_temperature = temperature.len(),
        n_generation = generation.len(),
        n_generating = generating.len(),
        n_consumption = consumption.len(),
        "fetched"
    );

    let summary = DailySummary::builder()
        .day(day)
        .energy_generated(generating.integrate().map_err(empty(Channel::Generation))?)
        .peak_power(generating.max_by_value().map_err(empty(Channel::Generation))?)
        .peak_temperature(temperature.max_by_value().map_err(empty(Channel::Temperature))?)
        .total_consumption(consumption.integrate().map_err(empty(Channel::Consumption))?)
        .peak_consumption(consumption.max_by_value().map_err(empty(Channel::Consumption))?)
        .build();
    info!(
        energy_generated = %summary.energy_generated,
        peak_power = %summary.peak_power.value,
        total_consumption = %summary.total_consumption,
        "summarized"
    );
    Ok(summary)
}
