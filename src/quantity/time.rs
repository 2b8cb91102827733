use std::ops::Mul;

use chrono::TimeDelta;

quantity!(Hours, via: f64, suffix: "h", precision: 3);

impl From<TimeDelta> for Hours {
    fn from(time_delta: TimeDelta) -> Self {
        Self(time_delta.as_seconds_f64() / 3600.0)
    }
}

/// Bare values integrate into bare value-hours.
impl Mul<Hours> for f64 {
    type Output = Self;

    fn mul(self, hours: Hours) -> Self::Output {
        self * hours.0
    }
}
