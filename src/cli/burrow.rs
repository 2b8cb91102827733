use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use crate::{cli::feed::FeedArgs, core::interval::Interval, prelude::*, tables::build_series_table};

#[derive(Parser)]
pub struct BurrowArgs {
    #[command(subcommand)]
    command: BurrowCommand,
}

impl BurrowArgs {
    pub fn run(self) -> Result {
        match self.command {
            BurrowCommand::Series(args) => args.run(),
        }
    }
}

#[derive(Subcommand)]
enum BurrowCommand {
    /// Print the raw readings of a single datastream.
    Series(BurrowSeriesArgs),
}

#[derive(Parser)]
struct BurrowSeriesArgs {
    /// Datastream ID.
    #[clap(long)]
    channel: String,

    /// Day to fetch, defaults to yesterday.
    #[clap(long)]
    on: Option<NaiveDate>,

    #[clap(flatten)]
    feed: FeedArgs,
}

impl BurrowSeriesArgs {
    #[instrument(skip_all, fields(channel = %self.channel))]
    fn run(self) -> Result {
        let day = match self.on {
            Some(day) => day,
            None => Local::now().date_naive().pred_opt().context("there is no yesterday")?,
        };
        let interval = Interval::from_day(day, &Local)
            .with_context(|| format!("midnight does not exist on {day}"))?;
        let datastream = self.feed.new_client().get_datastream(&self.channel, interval)?;
        info!(current_value = ?datastream.current_value, "gotcha");
        println!("{}", build_series_table(&datastream.into_series(interval)));
        Ok(())
    }
}
