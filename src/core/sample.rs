use chrono::{DateTime, Utc};

/// A single timestamped reading.
#[derive(Copy, Clone, Debug, PartialEq, derive_more::Constructor)]
pub struct Sample<V> {
    pub time: DateTime<Utc>,
    pub value: V,
}

impl<V> Sample<V> {
    pub fn map<T>(self, f: fn(V) -> T) -> Sample<T> {
        Sample::new(self.time, f(self.value))
    }
}
