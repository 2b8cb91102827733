use clap::Parser;

use crate::api::xively;

#[derive(Parser)]
pub struct FeedArgs {
    #[clap(long = "xively-api-key", env = "XIVELY_API_KEY")]
    pub xively_api_key: String,

    #[clap(long = "xively-feed-id", env = "XIVELY_FEED_ID")]
    pub xively_feed_id: String,

    #[clap(
        long = "xively-base-url",
        env = "XIVELY_BASE_URL",
        default_value = "https://api.xively.com/v2"
    )]
    pub xively_base_url: String,

    /// Let the feed aggregate the readings over this interval, for example `5min`.
    ///
    /// Raw datapoints are returned when omitted.
    #[clap(long, env = "SAMPLING_INTERVAL")]
    sampling_interval: Option<humantime::Duration>,
}

impl FeedArgs {
    pub fn new_client(&self) -> xively::Api {
        xively::Api::new(
            self.xively_base_url.clone(),
            self.xively_api_key.clone(),
            self.xively_feed_id.clone(),
            self.sampling_interval.map(Into::into),
        )
    }
}
