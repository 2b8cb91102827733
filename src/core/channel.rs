use std::fmt::{Display, Formatter};

/// Physical quantity carried by a feed datastream.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Channel {
    Temperature,
    Generation,
    Consumption,
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperature => write!(f, "temperature"),
            Self::Generation => write!(f, "generation"),
            Self::Consumption => write!(f, "consumption"),
        }
    }
}

/// Datastream IDs of the feed, one per [`Channel`].
#[derive(Clone, Debug, clap::Parser)]
pub struct Channels {
    /// Datastream with the temperature readings.
    #[clap(long = "temperature-channel", env = "TEMPERATURE_CHANNEL", default_value = "0")]
    pub temperature: String,

    /// Datastream with the generated power readings.
    #[clap(long = "generation-channel", env = "GENERATION_CHANNEL", default_value = "1")]
    pub generation: String,

    /// Datastream with the consumed power readings.
    #[clap(long = "consumption-channel", env = "CONSUMPTION_CHANNEL", default_value = "2")]
    pub consumption: String,
}

impl Channels {
    #[must_use]
    pub fn id(&self, channel: Channel) -> &str {
        match channel {
            Channel::Temperature => &self.temperature,
            Channel::Generation => &self.generation,
            Channel::Consumption => &self.consumption,
        }
    }
}
