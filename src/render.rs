use anyhow::Result;
use std::str::FromStr;

use crate::figure::{Figure, Line, Marker, Trace, TraceKind, TraceMode, MARKER_SIZE};
use crate::palette::{direction_color, SeriesPalette};
use crate::series::Series;
use crate::table::{ReturnField, Table};

/// Ordered set of return fields picked in the checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    fields: Vec<ReturnField>,
}

impl Selection {
    pub fn all() -> Self {
        Selection { fields: ReturnField::ALL.to_vec() }
    }

    pub fn empty() -> Self {
        Selection { fields: Vec::new() }
    }

    /// Repeated fields keep their first position.
    pub fn new(fields: impl IntoIterator<Item = ReturnField>) -> Self {
        let mut unique = Vec::new();
        for field in fields {
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        Selection { fields: unique }
    }

    pub fn fields(&self) -> &[ReturnField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromStr for Selection {
    type Err = anyhow::Error;

    /// Comma separated field names; blank entries are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let fields = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ReturnField::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Selection::new(fields))
    }
}

/// Build the chart for the selected fields, one trace each, in selection
/// order. Fields with no values in the table are left out.
pub fn render_figure(table: &Table, fields: &[ReturnField]) -> Figure {
    let palette = SeriesPalette::category10();
    let mut figure = Figure::empty();

    for &field in fields {
        let series = table.series(field);
        if series.is_empty() {
            tracing::debug!(%field, "Skipping field with no values");
            continue;
        }
        let line_color = palette.get_color(field.index()).name;
        figure.add_trace(series_trace(&series, line_color));
    }

    tracing::debug!(
        traces = figure.data.len(),
        points = figure.point_count(),
        "Rendered figure"
    );
    figure
}

fn series_trace(series: &Series, line_color: &'static str) -> Trace {
    let colored = series.colored();
    Trace {
        kind: TraceKind::Scatter,
        mode: TraceMode::MarkersLines,
        name: series.field.column().to_string(),
        x: colored.iter().map(|p| p.date).collect(),
        y: colored.iter().map(|p| p.value).collect(),
        marker: Marker {
            color: colored.iter().map(|p| direction_color(p.direction).name).collect(),
            size: MARKER_SIZE,
        },
        line: Line { color: line_color },
        directions: colored.iter().map(|p| p.direction).collect(),
    }
}
