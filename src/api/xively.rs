use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use serde_with::serde_as;
use ureq::Agent;

use crate::{
    core::{
        feed::{Feed, FetchError},
        interval::Interval,
        sample::Sample,
        series::Series,
    },
    prelude::*,
};

/// Xively returns at most this many datapoints per history request.
const MAX_DATAPOINTS: usize = 1000;

pub struct Api {
    client: Agent,
    base_url: String,
    api_key: String,
    feed_id: String,
    sampling_interval: Option<Duration>,
}

impl Api {
    pub fn new(
        base_url: String,
        api_key: String,
        feed_id: String,
        sampling_interval: Option<Duration>,
    ) -> Self {
        let client =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(30))).build().into();
        Self { client, base_url, api_key, feed_id, sampling_interval }
    }

    /// Get all the datapoints within the interval, requesting the following pages
    /// while the feed keeps returning full ones.
    #[instrument(skip_all, fields(feed_id = %self.feed_id, channel_id = %channel_id, interval = ?interval))]
    pub fn get_datastream(
        &self,
        channel_id: &str,
        interval: Interval,
    ) -> Result<Datastream, FetchError> {
        let datastream =
            Datastream::paginate(interval, |interval| self.get_page(channel_id, interval))
                .map_err(|source| FetchError {
                    channel_id: channel_id.to_string(),
                    source: source.into(),
                })?;
        info!(n_datapoints = datastream.datapoints.len(), "fetched");
        Ok(datastream)
    }

    fn get_page(&self, channel_id: &str, interval: Interval) -> Result<Datastream, ureq::Error> {
        let url = format!(
            "{}/feeds/{}/datastreams/{}.json",
            self.base_url.trim_end_matches('/'),
            self.feed_id,
            channel_id,
        );
        let mut request = self
            .client
            .get(&url)
            .header("X-ApiKey", self.api_key.as_str())
            .query("start", interval.start.to_rfc3339_opts(SecondsFormat::Secs, true))
            .query("end", interval.end.to_rfc3339_opts(SecondsFormat::Secs, true))
            .query("limit", MAX_DATAPOINTS.to_string());
        if let Some(sampling_interval) = self.sampling_interval {
            request = request.query("interval", sampling_interval.as_secs().to_string());
        }
        request.call()?.body_mut().read_json::<Datastream>()
    }
}

impl Feed for Api {
    fn fetch_series(
        &self,
        channel_id: &str,
        interval: Interval,
    ) -> Result<Series<f64>, FetchError> {
        Ok(self.get_datastream(channel_id, interval)?.into_series(interval))
    }
}

#[must_use]
#[serde_as]
#[derive(Deserialize)]
pub struct Datastream {
    #[serde_as(as = "Option<serde_with::DisplayFromStr>")]
    pub current_value: Option<f64>,

    #[serde(default)]
    pub datapoints: Vec<Datapoint>,
}

impl Datastream {
    /// Collect the pages starting from the interval start.
    ///
    /// Each following page starts at the latest datapoint seen so far,
    /// the datapoints that are not later than that are skipped as already collected.
    fn paginate<E>(
        interval: Interval,
        mut get_page: impl FnMut(Interval) -> Result<Self, E>,
    ) -> Result<Self, E> {
        let mut datastream = get_page(interval)?;
        let mut n_last_page = datastream.datapoints.len();
        while n_last_page >= MAX_DATAPOINTS {
            let Some(last_at) = datastream.datapoints.iter().map(|datapoint| datapoint.at).max()
            else {
                break;
            };
            let page = get_page(Interval::new(last_at, interval.end))?;
            n_last_page = page.datapoints.len();
            let n_collected = datastream.datapoints.len();
            datastream
                .datapoints
                .extend(page.datapoints.into_iter().filter(|datapoint| datapoint.at > last_at));
            if datastream.datapoints.len() == n_collected {
                warn!(%last_at, n_collected, "no later datapoints on the next page, stopping");
                break;
            }
            debug!(n_collected = datastream.datapoints.len(), "fetched the next page");
        }
        Ok(datastream)
    }

    /// Convert the datapoints into a chronological series, keeping only finite values
    /// within the interval.
    pub fn into_series(self, interval: Interval) -> Series<f64> {
        let mut datapoints = self.datapoints;
        if !datapoints.is_sorted_by_key(|datapoint| datapoint.at) {
            warn!("datapoints are out of order, sorting");
            datapoints.sort_by_key(|datapoint| datapoint.at);
        }
        datapoints
            .into_iter()
            .filter(|datapoint| interval.contains(datapoint.at))
            .filter(|datapoint| {
                let is_finite = datapoint.value.is_finite();
                if !is_finite {
                    warn!(at = %datapoint.at, value = datapoint.value, "non-finite, skipping");
                }
                is_finite
            })
            .map(|datapoint| Sample::new(datapoint.at, datapoint.value))
            .collect()
    }
}

#[must_use]
#[serde_as]
#[derive(Deserialize)]
pub struct Datapoint {
    pub at: DateTime<Utc>,

    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub value: f64,
}
