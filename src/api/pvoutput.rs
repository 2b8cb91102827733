use std::time::Duration;

use bon::Builder;
use chrono::{NaiveDate, NaiveTime, TimeZone};
use ureq::Agent;

use crate::{
    api::retry::RetryPolicy,
    core::summary::DailySummary,
    prelude::*,
    quantity::{energy::WattHours, power::Watts},
};

#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("failed to send the request")]
    Transport(#[from] ureq::Error),

    #[error("PVOutput responded with {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, thiserror::Error)]
#[error("failed to upload the output for {date} after {n_attempts} attempts")]
pub struct UploadFailure {
    pub date: NaiveDate,
    pub n_attempts: u32,

    #[source]
    pub source: AttemptError,
}

pub struct Api {
    client: Agent,
    base_url: String,
    api_key: String,
    system_id: String,
    retry_policy: RetryPolicy,
}

impl Api {
    pub fn new(
        base_url: String,
        api_key: String,
        system_id: String,
        retry_policy: RetryPolicy,
    ) -> Self {
        let client = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .http_status_as_error(false)
            .build()
            .into();
        Self { client, base_url, api_key, system_id, retry_policy }
    }

    /// Upload the daily output, retrying any failure according to the retry policy.
    #[instrument(skip_all, fields(date = %output.date, system_id = %self.system_id))]
    pub fn upload_daily_summary(&self, output: &Output) -> Result<(), UploadFailure> {
        let form = output.form();
        debug!(?form, "uploading…");
        self.retry_policy.run(|| self.add_output(&form)).map_err(|source| UploadFailure {
            date: output.date,
            n_attempts: self.retry_policy.max_attempts(),
            source,
        })?;
        info!("uploaded");
        Ok(())
    }

    fn add_output(&self, form: &[(&str, String)]) -> Result<(), AttemptError> {
        let mut response = self
            .client
            .post(format!("{}/service/r2/addoutput.jsp", self.base_url.trim_end_matches('/')))
            .header("X-Pvoutput-Apikey", self.api_key.as_str())
            .header("X-Pvoutput-SystemId", self.system_id.as_str())
            .send_form(form.iter().map(|(key, value)| (*key, value.as_str())))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.body_mut().read_to_string().unwrap_or_default();
            Err(AttemptError::Status { status: status.as_u16(), body })
        }
    }
}

/// Daily output in the units PVOutput expects.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Builder)]
pub struct Output {
    pub date: NaiveDate,
    pub peak_power: Watts,

    /// Local time of the peak power.
    pub peak_power_time: NaiveTime,

    pub energy_generated: WattHours,
    pub energy_consumed: WattHours,
}

impl Output {
    pub fn from_summary<Tz: TimeZone>(summary: &DailySummary, time_zone: &Tz) -> Self {
        Self::builder()
            .date(summary.day)
            .peak_power(summary.peak_power.value)
            .peak_power_time(summary.peak_power.time.with_timezone(time_zone).time())
            .energy_generated(summary.energy_generated)
            .energy_consumed(summary.total_consumption)
            .build()
    }

    fn form(&self) -> [(&'static str, String); 5] {
        [
            ("d", self.date.format("%Y%m%d").to_string()),
            ("g", self.energy_generated.whole().to_string()),
            ("pp", format!("{:.0}", self.peak_power.0)),
            ("pt", self.peak_power_time.format("%H:%M").to_string()),
            ("c", self.energy_consumed.whole().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{BufRead, BufReader, Read, Write},
        net::TcpListener,
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        thread,
    };

    use chrono::{FixedOffset, TimeDelta, Utc};

    use super::*;
    use crate::{
        core::{sample::Sample, series::tests::midnight},
        quantity::temperature::Celsius,
    };

    fn summary() -> DailySummary {
        DailySummary::builder()
            .day(midnight().date_naive())
            .energy_generated(WattHours(14.583))
            .peak_power(Sample::new(midnight() + TimeDelta::minutes(10), Watts(200.4)))
            .peak_temperature(Sample::new(midnight(), Celsius(18.0)))
            .total_consumption(WattHours(2_345.9))
            .peak_consumption(Sample::new(midnight(), Watts(50.0)))
            .build()
    }

    #[test]
    fn test_form_ok() {
        let form = Output::from_summary(&summary(), &Utc).form();
        assert_eq!(form[0], ("d", "20150529".to_string()));
        assert_eq!(form[1], ("g", "14".to_string()));
        assert_eq!(form[2], ("pp", "200".to_string()));
        assert_eq!(form[3], ("pt", "00:10".to_string()));
        assert_eq!(form[4], ("c", "2345".to_string()));
    }

    #[test]
    fn test_peak_time_is_local() {
        let time_zone = FixedOffset::east_opt(10 * 3600).unwrap();
        let output = Output::from_summary(&summary(), &time_zone);
        assert_eq!(output.peak_power_time, NaiveTime::from_hms_opt(10, 10, 0).unwrap());
        assert_eq!(output.date, NaiveDate::from_ymd_opt(2015, 5, 29).unwrap());
    }

    /// Serve every request with `503 Service Unavailable`, counting the requests.
    fn serve_unavailable() -> Result<(String, Arc<AtomicUsize>)> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let n_requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&n_requests);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let mut reader = BufReader::new(&stream);
                let mut content_length = 0;
                let mut line = String::new();
                while reader.read_line(&mut line).is_ok_and(|n_read| n_read != 0) {
                    if line == "\r\n" {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':')
                        && name.eq_ignore_ascii_case("content-length")
                    {
                        content_length = value.trim().parse().unwrap_or_default();
                    }
                    line.clear();
                }
                let mut body = vec![0; content_length];
                let _ = reader.read_exact(&mut body);
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = (&stream).write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\n\
                    Content-Length: 4\r\n\
                    Connection: close\r\n\r\nbusy",
                );
            }
        });
        Ok((base_url, n_requests))
    }

    #[test]
    fn test_unsuccessful_status_is_retried() -> Result {
        let (base_url, n_requests) = serve_unavailable()?;
        let api = Api::new(
            base_url,
            "key".to_string(),
            "1".to_string(),
            RetryPolicy { n_attempts: 3, delay: Duration::ZERO },
        );
        let failure =
            api.upload_daily_summary(&Output::from_summary(&summary(), &Utc)).unwrap_err();
        assert_eq!(failure.n_attempts, 3);
        assert_eq!(n_requests.load(Ordering::SeqCst), 3);
        match failure.source {
            AttemptError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "busy");
            }
            AttemptError::Transport(error) => panic!("unexpected transport error: {error}"),
        }
        Ok(())
    }

    #[test]
    fn test_failure_reports_attempts_made() {
        let api = Api::new(
            "http://127.0.0.1:9".to_string(),
            "key".to_string(),
            "1".to_string(),
            RetryPolicy { n_attempts: 0, delay: Duration::ZERO },
        );
        let failure =
            api.upload_daily_summary(&Output::from_summary(&summary(), &Utc)).unwrap_err();
        assert_eq!(failure.n_attempts, 1);
    }

    #[test]
    fn test_unreachable_service_fails() {
        let api = Api::new(
            "http://127.0.0.1:9".to_string(),
            "key".to_string(),
            "1".to_string(),
            RetryPolicy { n_attempts: 2, delay: Duration::ZERO },
        );
        let failure =
            api.upload_daily_summary(&Output::from_summary(&summary(), &Utc)).unwrap_err();
        assert_eq!(failure.n_attempts, 2);
        assert!(matches!(failure.source, AttemptError::Transport(_)));
    }
}
