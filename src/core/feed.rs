use std::error::Error;

use crate::core::{interval::Interval, series::Series};

#[derive(Debug, thiserror::Error)]
#[error("failed to fetch the datastream `{channel_id}`")]
pub struct FetchError {
    pub channel_id: String,

    #[source]
    pub source: Box<dyn Error + Send + Sync>,
}

/// Source of raw datastream readings.
pub trait Feed {
    /// Fetch the chronologically ordered readings of the datastream within the interval.
    fn fetch_series(&self, channel_id: &str, interval: Interval)
    -> Result<Series<f64>, FetchError>;
}
