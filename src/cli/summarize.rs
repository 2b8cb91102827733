use chrono::{Local, NaiveDate};
use clap::Parser;

use crate::{
    api::{pvoutput::Output, xively},
    cli::{feed::FeedArgs, pvoutput::PvOutputArgs},
    core::{channel::Channels, day::summarize_day, interval::Interval, summary::DailySummary},
    prelude::*,
    quantity::power::Watts,
    tables::build_summaries_table,
};

#[derive(Parser)]
pub struct SummarizeArgs {
    /// First day to summarize, `YYYY-MM-DD`. Defaults to yesterday.
    start: Option<NaiveDate>,

    /// Last day to summarize, inclusive. Defaults to the first day.
    end: Option<NaiveDate>,

    /// Generation readings at or below this power are considered noise.
    #[clap(
        long = "generation-threshold-watts",
        env = "GENERATION_THRESHOLD_WATTS",
        default_value = "100"
    )]
    generation_threshold: Watts,

    /// Do not upload the summaries to PVOutput (dry run).
    #[clap(long)]
    scout: bool,

    #[clap(flatten)]
    feed: FeedArgs,

    #[clap(flatten)]
    channels: Channels,

    #[clap(flatten)]
    pvoutput: PvOutputArgs,
}

impl SummarizeArgs {
    pub fn run(self) -> Result {
        let days = resolve_days(self.start, self.end, Local::now().date_naive())?;
        info!(n_days = days.len(), "summarizing…");

        let feed = self.feed.new_client();
        let pvoutput = if self.scout { None } else { self.pvoutput.new_client() };
        if pvoutput.is_none() {
            info!("the summaries will not be uploaded");
        }

        let mut summaries = Vec::with_capacity(days.len());
        let mut n_failures = 0_usize;
        for day in days {
            let summary = match self.summarize(&feed, day) {
                Ok(summary) => summary,
                Err(error) => {
                    error!(%day, "failed to summarize: {error:#}");
                    n_failures += 1;
                    continue;
                }
            };
            if let Some(pvoutput) = &pvoutput
                && let Err(failure) =
                    pvoutput.upload_daily_summary(&Output::from_summary(&summary, &Local))
            {
                error!(%day, "{:#}", Error::from(failure));
                n_failures += 1;
            }
            summaries.push(summary);
        }

        println!("{}", build_summaries_table(&summaries));
        ensure!(n_failures == 0, "{n_failures} day(s) failed");
        Ok(())
    }

    fn summarize(&self, feed: &xively::Api, day: NaiveDate) -> Result<DailySummary> {
        let interval = Interval::from_day(day, &Local)
            .with_context(|| format!("midnight does not exist on {day}"))?;
        Ok(summarize_day(feed, &self.channels, self.generation_threshold, day, interval)?)
    }
}

/// Expand the optional command-line range into the list of days to process.
///
/// Without the start, only yesterday is processed. Without the end, only the start day is.
fn resolve_days(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<Vec<NaiveDate>> {
    let start = match start {
        Some(start) => start,
        None => today.pred_opt().context("there is no yesterday")?,
    };
    let end = end.unwrap_or(start);
    ensure!(start <= end, "the end {end} precedes the start {start}");
    Ok(start.iter_days().take_while(|day| *day <= end).collect())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;
    use crate::cli::{Args, Command};

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, month, day).unwrap()
    }

    #[test]
    fn test_resolve_days_defaults_to_yesterday() -> Result {
        assert_eq!(resolve_days(None, None, date(6, 1))?, vec![date(5, 31)]);
        Ok(())
    }

    #[test]
    fn test_resolve_days_single() -> Result {
        assert_eq!(resolve_days(Some(date(5, 29)), None, date(6, 1))?, vec![date(5, 29)]);
        Ok(())
    }

    #[test]
    fn test_resolve_days_inclusive_range() -> Result {
        let days = resolve_days(Some(date(5, 30)), Some(date(6, 2)), date(6, 10))?;
        assert_eq!(days, vec![date(5, 30), date(5, 31), date(6, 1), date(6, 2)]);
        Ok(())
    }

    #[test]
    fn test_resolve_days_reversed_range() {
        assert!(resolve_days(Some(date(6, 2)), Some(date(5, 30)), date(6, 10)).is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "helio",
            "summarize",
            "2015-05-29",
            "2015-05-31",
            "--xively-api-key",
            "key",
            "--xively-feed-id",
            "42",
            "--pvoutput-api-key",
            "upload-key",
            "--pvoutput-system-id",
            "7",
            "--generation-threshold-watts",
            "110",
            "--scout",
        ])
        .unwrap();
        let Command::Summarize(args) = args.command else { panic!("unexpected command") };
        assert_eq!(args.start, Some(date(5, 29)));
        assert_eq!(args.end, Some(date(5, 31)));
        assert_eq!(args.generation_threshold, Watts(110.0));
        assert!(args.scout);
        assert_eq!(args.channels.generation, "1");
        assert_eq!(args.feed.xively_api_key, "key");
        assert_eq!(args.feed.xively_base_url, "https://api.xively.com/v2");
        assert_eq!(args.pvoutput.pvoutput_api_key.as_deref(), Some("upload-key"));
        assert_eq!(args.pvoutput.pvoutput_system_id.as_deref(), Some("7"));
        assert_eq!(args.pvoutput.pvoutput_base_url, "https://pvoutput.org");
    }

    #[test]
    fn test_command_is_consistent() {
        Args::command().debug_assert();
    }
}
