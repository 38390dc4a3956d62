use chrono::{Datelike, NaiveDate};

use crate::figure::Figure;

/// Padded data domains for the PNG renderer. Dates live on the x axis as
/// day numbers so plotters can treat them as a continuous `f64` range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

pub fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

pub fn day_label(day: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day.round() as i32)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn figure_bounds(figure: &Figure) -> Bounds {
    let mut x = MinMax::default();
    let mut y = MinMax::default();

    for trace in &figure.data {
        for &date in &trace.x {
            x.include(day_number(date));
        }
        for &value in &trace.y {
            y.include(value);
        }
    }

    Bounds {
        x: x.padded(),
        y: y.padded(),
    }
}

#[derive(Debug, Clone)]
struct MinMax {
    min: f64,
    max: f64,
}

impl Default for MinMax {
    fn default() -> Self {
        MinMax {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl MinMax {
    fn include(&mut self, value: f64) {
        if value < self.min { self.min = value; }
        if value > self.max { self.max = value; }
    }

    fn padded(&self) -> (f64, f64) {
        // Nothing plotted: fall back to a unit range
        if self.min > self.max {
            return pad_range(0.0, 1.0);
        }
        pad_range(self.min, self.max)
    }
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        (min - 1.0, max + 1.0)
    } else {
        let padding = (max - min) * 0.05;
        (min - padding, max + padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Line, Marker, Trace, TraceKind, TraceMode};
    use crate::series::Direction;

    fn figure_with(points: &[(NaiveDate, f64)]) -> Figure {
        let mut figure = Figure::empty();
        figure.add_trace(Trace {
            kind: TraceKind::Scatter,
            mode: TraceMode::MarkersLines,
            name: "one_day_return".to_string(),
            x: points.iter().map(|p| p.0).collect(),
            y: points.iter().map(|p| p.1).collect(),
            marker: Marker { color: vec!["green"; points.len()], size: 8 },
            line: Line { color: "#1f77b4" },
            directions: vec![Direction::Down; points.len()],
        });
        figure
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_bounds_continuous_padding() {
        let figure = figure_with(&[(date(1), 0.0), (date(21), 100.0)]);
        let bounds = figure_bounds(&figure);
        assert_eq!(bounds.x, (day_number(date(1)) - 1.0, day_number(date(21)) + 1.0));
        assert_eq!(bounds.y, (-5.0, 105.0));
    }

    #[test]
    fn test_bounds_single_point() {
        let figure = figure_with(&[(date(5), 2.5)]);
        let bounds = figure_bounds(&figure);
        assert_eq!(bounds.x, (day_number(date(5)) - 1.0, day_number(date(5)) + 1.0));
        assert_eq!(bounds.y, (1.5, 3.5));
    }

    #[test]
    fn test_bounds_empty_figure() {
        let bounds = figure_bounds(&Figure::empty());
        assert_eq!(bounds.x, (-0.05, 1.05));
        assert_eq!(bounds.y, (-0.05, 1.05));
    }

    #[test]
    fn test_day_label_round_trips() {
        assert_eq!(day_label(day_number(date(17))), "2025-01-17");
        assert_eq!(day_label(day_number(date(17)) + 0.4), "2025-01-17");
    }
}
