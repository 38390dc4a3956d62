use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::prelude::*;

use crate::figure::Figure;
use crate::palette::{direction_color, SeriesPalette};
use crate::scale;

pub struct GraphConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            width: 1000,
            height: 500,
        }
    }
}

/// Rasterise a figure to PNG: one line per trace with a marker on every
/// point in its direction color.
pub fn render_png(figure: &Figure, config: &GraphConfig) -> Result<Vec<u8>> {
    if config.width == 0 || config.height == 0 {
        anyhow::bail!(
            "Image dimensions must be non-zero (width: {}, height: {})",
            config.width,
            config.height
        );
    }

    let bounds = scale::figure_bounds(figure);
    let palette = SeriesPalette::category10();
    let mut buffer = vec![0u8; rgb_buffer_len(config.width, config.height)];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (config.width, config.height))
            .into_drawing_area();

        root.fill(&WHITE)
            .context("Failed to fill background")?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(&figure.layout.title.text, ("sans-serif", 20))
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)
            .context("Failed to build chart")?;

        chart
            .configure_mesh()
            .x_desc(&figure.layout.xaxis.title.text)
            .y_desc(&figure.layout.yaxis.title.text)
            .x_label_formatter(&|day| scale::day_label(*day))
            .draw()
            .context("Failed to draw mesh")?;

        let marker_radius = (figure_marker_size(figure) / 2).max(1) as i32;

        for (idx, trace) in figure.data.iter().enumerate() {
            let line_color = palette
                .find(trace.line.color)
                .unwrap_or_else(|| palette.get_color(idx))
                .rgb;

            let points: Vec<(f64, f64)> = trace
                .x
                .iter()
                .zip(trace.y.iter())
                .map(|(&date, &value)| (scale::day_number(date), value))
                .collect();

            chart
                .draw_series(LineSeries::new(points.clone(), &line_color))
                .context("Failed to draw line series")?
                .label(trace.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &line_color));

            chart
                .draw_series(points.into_iter().zip(trace.directions.iter()).map(
                    |(point, &direction)| {
                        Circle::new(point, marker_radius, direction_color(direction).rgb.filled())
                    },
                ))
                .context("Failed to draw markers")?;
        }

        if !figure.data.is_empty() {
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .context("Failed to draw legend")?;
        }

        root.present().context("Failed to present drawing")?;
    }

    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(
                &buffer,
                config.width,
                config.height,
                image::ColorType::Rgb8,
            )
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}

/// Bytes needed for an RGB8 canvas, sized in `usize` so large canvases
/// don't wrap.
fn rgb_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 3
}

fn figure_marker_size(figure: &Figure) -> u32 {
    figure
        .data
        .first()
        .map(|trace| trace.marker.size)
        .unwrap_or(crate::figure::MARKER_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_figure;
    use crate::table::{Record, ReturnField, Table};
    use chrono::NaiveDate;

    /// Check if bytes are a valid PNG
    fn is_valid_png(bytes: &[u8]) -> bool {
        bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
    }

    fn sample_figure() -> Figure {
        let day = |d| NaiveDate::from_ymd_opt(2025, 2, d).unwrap();
        let table = Table::from_records(vec![
            Record::new(day(3)).with(ReturnField::OneDay, 0.4).with(ReturnField::OneYear, 8.0),
            Record::new(day(4)).with(ReturnField::OneDay, -0.2),
            Record::new(day(5)).with(ReturnField::OneDay, 0.1).with(ReturnField::OneYear, 8.5),
        ]);
        render_figure(&table, &ReturnField::ALL)
    }

    #[test]
    fn test_render_png_with_traces() {
        let png = render_png(&sample_figure(), &GraphConfig::default()).unwrap();
        assert!(is_valid_png(&png), "Output is not a valid PNG");
    }

    #[test]
    fn test_render_png_empty_figure() {
        let config = GraphConfig { width: 320, height: 240 };
        let png = render_png(&Figure::empty(), &config).unwrap();
        assert!(is_valid_png(&png));
    }

    #[test]
    fn test_render_png_rejects_zero_size() {
        let config = GraphConfig { width: 0, height: 400 };
        let err = render_png(&Figure::empty(), &config).unwrap_err();
        assert!(err.to_string().contains("non-zero"));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_rgb_buffer_len_beyond_u32() {
        assert_eq!(rgb_buffer_len(1000, 500), 1_500_000);
        // 40_000 * 40_000 * 3 does not fit in a u32
        assert_eq!(rgb_buffer_len(40_000, 40_000), 4_800_000_000usize);
    }

    #[test]
    fn test_marker_size_defaults_for_empty_figure() {
        assert_eq!(figure_marker_size(&Figure::empty()), 8);
    }
}
