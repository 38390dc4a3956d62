use chrono::NaiveDate;
use serde::Serialize;

use crate::table::ReturnField;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// The present values of one return field, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub field: ReturnField,
    pub points: Vec<SeriesPoint>,
}

/// Whether the series moves up from a point to its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub direction: Direction,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn colored(&self) -> Vec<ColoredPoint> {
        let directions = tag_directions(&self.values());
        self.points
            .iter()
            .zip(directions)
            .map(|(point, direction)| ColoredPoint {
                date: point.date,
                value: point.value,
                direction,
            })
            .collect()
    }
}

/// Tag each value against its successor in the slice.
///
/// A point is `Up` only when the next value is strictly greater. The final
/// point has no successor and repeats the tag before it, or `Down` when it
/// is the only point.
pub fn tag_directions(values: &[f64]) -> Vec<Direction> {
    let mut tags: Vec<Direction> = values
        .windows(2)
        .map(|pair| if pair[1] > pair[0] { Direction::Up } else { Direction::Down })
        .collect();

    if !values.is_empty() {
        let last = tags.last().copied().unwrap_or(Direction::Down);
        tags.push(last);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::Direction::{Down, Up};

    fn series_of(values: &[f64]) -> Series {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Series {
            field: ReturnField::OneDay,
            points: values
                .iter()
                .enumerate()
                .map(|(i, &value)| SeriesPoint {
                    // every other day, the tags must not care about gaps
                    date: start + chrono::Duration::days(2 * i as i64),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_tag_directions_rise_then_fall() {
        assert_eq!(tag_directions(&[10.0, 20.0, 15.0]), vec![Up, Down, Down]);
    }

    #[test]
    fn test_tag_directions_last_repeats_previous() {
        assert_eq!(tag_directions(&[3.0, 1.0, 2.0]), vec![Down, Up, Up]);
    }

    #[test]
    fn test_tag_directions_equal_is_down() {
        assert_eq!(tag_directions(&[5.0, 5.0, 5.0]), vec![Down, Down, Down]);
    }

    #[test]
    fn test_tag_directions_single_point() {
        assert_eq!(tag_directions(&[7.0]), vec![Down]);
    }

    #[test]
    fn test_tag_directions_two_points() {
        assert_eq!(tag_directions(&[1.0, 2.0]), vec![Up, Up]);
        assert_eq!(tag_directions(&[2.0, 1.0]), vec![Down, Down]);
    }

    #[test]
    fn test_tag_directions_empty() {
        assert!(tag_directions(&[]).is_empty());
    }

    #[test]
    fn test_tag_directions_negative_values() {
        assert_eq!(tag_directions(&[-3.0, -1.0, -2.0, -2.5]), vec![Up, Down, Down, Down]);
    }

    #[test]
    fn test_colored_keeps_dates_and_values() {
        let series = series_of(&[10.0, 20.0, 15.0]);
        let colored = series.colored();
        assert_eq!(colored.len(), 3);
        assert_eq!(colored[0].direction, Up);
        assert_eq!(colored[1].direction, Down);
        assert_eq!(colored[2].direction, Down);
        for (point, raw) in colored.iter().zip(&series.points) {
            assert_eq!(point.date, raw.date);
            assert_eq!(point.value, raw.value);
        }
    }

    #[test]
    fn test_colored_single_point_is_down() {
        let colored = series_of(&[0.4]).colored();
        assert_eq!(colored.len(), 1);
        assert_eq!(colored[0].direction, Down);
    }
}
