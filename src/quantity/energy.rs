quantity!(WattHours, via: f64, suffix: "Wh", precision: 0);

impl WattHours {
    /// Whole watt-hours, truncated towards zero.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn whole(self) -> i64 {
        self.0.trunc() as i64
    }
}
