use clap::Parser;

use crate::api::{pvoutput, retry::RetryPolicy};

#[derive(Parser)]
pub struct PvOutputArgs {
    /// PVOutput API key, uploads are disabled when missing.
    #[clap(long = "pvoutput-api-key", env = "PVOUTPUT_API_KEY")]
    pub pvoutput_api_key: Option<String>,

    /// PVOutput system ID, uploads are disabled when missing.
    #[clap(long = "pvoutput-system-id", env = "PVOUTPUT_SYSTEM_ID")]
    pub pvoutput_system_id: Option<String>,

    #[clap(
        long = "pvoutput-base-url",
        env = "PVOUTPUT_BASE_URL",
        default_value = "https://pvoutput.org"
    )]
    pub pvoutput_base_url: String,

    /// Total number of upload attempts per day.
    #[clap(
        long = "upload-attempts",
        env = "UPLOAD_ATTEMPTS",
        default_value = "5",
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    n_attempts: u32,

    /// Delay between the upload attempts.
    #[clap(long = "upload-retry-delay", env = "UPLOAD_RETRY_DELAY", default_value = "10s")]
    retry_delay: humantime::Duration,
}

impl PvOutputArgs {
    pub fn new_client(&self) -> Option<pvoutput::Api> {
        let (Some(api_key), Some(system_id)) = (&self.pvoutput_api_key, &self.pvoutput_system_id)
        else {
            return None;
        };
        let retry_policy =
            RetryPolicy { n_attempts: self.n_attempts, delay: self.retry_delay.into() };
        Some(pvoutput::Api::new(
            self.pvoutput_base_url.clone(),
            api_key.clone(),
            system_id.clone(),
            retry_policy,
        ))
    }
}
