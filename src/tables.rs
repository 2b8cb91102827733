use chrono::{DateTime, Local, Utc};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{series::Series, summary::DailySummary};

pub fn build_summaries_table(summaries: &[DailySummary]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Day",
        "Generated",
        "Peak",
        "At",
        "Temperature",
        "At",
        "Consumed",
        "Peak",
        "At",
    ]);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(summary.day.format("%Y-%m-%d")),
            Cell::new(summary.energy_generated)
                .set_alignment(CellAlignment::Right)
                .fg(Color::Green),
            Cell::new(summary.peak_power.value).set_alignment(CellAlignment::Right),
            time_cell(summary.peak_power.time),
            Cell::new(summary.peak_temperature.value).set_alignment(CellAlignment::Right),
            time_cell(summary.peak_temperature.time),
            Cell::new(summary.total_consumption)
                .set_alignment(CellAlignment::Right)
                .fg(Color::Red),
            Cell::new(summary.peak_consumption.value).set_alignment(CellAlignment::Right),
            time_cell(summary.peak_consumption.time),
        ]);
    }
    table
}

pub fn build_series_table(series: &Series<f64>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Time", "Value"]);
    for sample in series {
        let time = sample.time.with_timezone(&Local);
        table.add_row(vec![
            Cell::new(time.format("%b %d")).add_attribute(Attribute::Dim),
            Cell::new(time.format("%H:%M:%S")),
            Cell::new(sample.value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Local wall-clock time of the instant.
fn time_cell(time: DateTime<Utc>) -> Cell {
    Cell::new(time.with_timezone(&Local).format("%H:%M")).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::{
        core::{
            sample::Sample,
            series::tests::{midnight, series},
        },
        quantity::{energy::WattHours, power::Watts, temperature::Celsius},
    };

    #[test]
    fn test_build_summaries_table() {
        let summary = DailySummary::builder()
            .day(midnight().date_naive())
            .energy_generated(WattHours(14.583))
            .peak_power(Sample::new(midnight() + TimeDelta::minutes(10), Watts(200.0)))
            .peak_temperature(Sample::new(midnight(), Celsius(18.25)))
            .total_consumption(WattHours(0.0))
            .peak_consumption(Sample::new(midnight(), Watts(50.0)))
            .build();
        let table = build_summaries_table(&[summary]).to_string();
        assert!(table.contains("2015-05-29"));
        assert!(table.contains("15 Wh"));
        assert!(table.contains("200 W"));
    }

    #[test]
    fn test_build_series_table() {
        let table = build_series_table(&series(&[(0, 152.5), (5, 164.0)]));
        assert_eq!(table.row_count(), 2);
    }
}
