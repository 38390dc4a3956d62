//! Chart description handed to the browser.
//!
//! The serialized form follows the plotly.js figure layout (`data` traces
//! plus a `layout` object) so the page can pass it straight to
//! `Plotly.react`. The PNG renderer in [`crate::graph`] reads the same
//! structure.

use chrono::NaiveDate;
use serde::Serialize;

use crate::series::Direction;

pub const FIGURE_TITLE: &str = "Return Over Time";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Return";
pub const LEGEND_TITLE: &str = "Return Type";
pub const MARKER_SIZE: u32 = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// A figure with the dashboard layout and no traces yet.
    pub fn empty() -> Self {
        Figure {
            data: Vec::new(),
            layout: Layout::default(),
        }
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    pub fn point_count(&self) -> usize {
        self.data.iter().map(|trace| trace.x.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TraceMode {
    #[serde(rename = "markers+lines")]
    MarkersLines,
}

/// One return field drawn as connected, individually colored markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    pub mode: TraceMode,
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub marker: Marker,
    pub line: Line,
    #[serde(skip)]
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: Vec<&'static str>,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Title { text: text.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: Title,
}

/// `XUnified` shows every trace's value at the hovered date in one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoverMode {
    #[serde(rename = "x unified")]
    XUnified,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
    pub hovermode: HoverMode,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            title: Title::new(FIGURE_TITLE),
            xaxis: Axis { title: Title::new(X_AXIS_TITLE) },
            yaxis: Axis { title: Title::new(Y_AXIS_TITLE) },
            legend: Legend { title: Title::new(LEGEND_TITLE) },
            hovermode: HoverMode::XUnified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_figure_json() {
        let value = serde_json::to_value(Figure::empty()).unwrap();
        assert_eq!(
            value,
            json!({
                "data": [],
                "layout": {
                    "title": { "text": "Return Over Time" },
                    "xaxis": { "title": { "text": "Date" } },
                    "yaxis": { "title": { "text": "Return" } },
                    "legend": { "title": { "text": "Return Type" } },
                    "hovermode": "x unified"
                }
            })
        );
    }

    #[test]
    fn test_trace_json_shape() {
        let trace = Trace {
            kind: TraceKind::Scatter,
            mode: TraceMode::MarkersLines,
            name: "one_day_return".to_string(),
            x: vec![NaiveDate::from_ymd_opt(2025, 4, 5).unwrap()],
            y: vec![0.5],
            marker: Marker { color: vec!["green"], size: MARKER_SIZE },
            line: Line { color: "#1f77b4" },
            directions: vec![Direction::Down],
        };
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "scatter",
                "mode": "markers+lines",
                "name": "one_day_return",
                "x": ["2025-04-05"],
                "y": [0.5],
                "marker": { "color": ["green"], "size": 8 },
                "line": { "color": "#1f77b4" }
            })
        );
    }

    #[test]
    fn test_point_count() {
        let mut figure = Figure::empty();
        assert_eq!(figure.point_count(), 0);
        figure.add_trace(Trace {
            kind: TraceKind::Scatter,
            mode: TraceMode::MarkersLines,
            name: "a".to_string(),
            x: vec![NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(); 3],
            y: vec![1.0, 2.0, 3.0],
            marker: Marker { color: vec!["red", "red", "red"], size: MARKER_SIZE },
            line: Line { color: "#1f77b4" },
            directions: vec![Direction::Up; 3],
        });
        assert_eq!(figure.point_count(), 3);
    }
}
