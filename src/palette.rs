// Colors shared by the browser figure and the PNG renderer

use plotters::style::RGBColor;

use crate::series::Direction;

/// A color known both by its CSS name and by its RGB value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: RGBColor,
}

impl NamedColor {
    const fn new(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        NamedColor { name, rgb: RGBColor(r, g, b) }
    }
}

pub const RED: NamedColor = NamedColor::new("red", 255, 0, 0);
pub const GREEN: NamedColor = NamedColor::new("green", 0, 128, 0);

/// Marker color for a point: red when the series rises next, green otherwise.
pub fn direction_color(direction: Direction) -> NamedColor {
    match direction {
        Direction::Up => RED,
        Direction::Down => GREEN,
    }
}

/// Line colors for successive traces (D3 Category10)
pub struct SeriesPalette {
    colors: Vec<NamedColor>,
}

impl SeriesPalette {
    pub fn category10() -> Self {
        SeriesPalette {
            colors: vec![
                NamedColor::new("#1f77b4", 0x1f, 0x77, 0xb4),
                NamedColor::new("#ff7f0e", 0xff, 0x7f, 0x0e),
                NamedColor::new("#2ca02c", 0x2c, 0xa0, 0x2c),
                NamedColor::new("#d62728", 0xd6, 0x27, 0x28),
                NamedColor::new("#9467bd", 0x94, 0x67, 0xbd),
                NamedColor::new("#8c564b", 0x8c, 0x56, 0x4b),
                NamedColor::new("#e377c2", 0xe3, 0x77, 0xc2),
                NamedColor::new("#7f7f7f", 0x7f, 0x7f, 0x7f),
                NamedColor::new("#bcbd22", 0xbc, 0xbd, 0x22),
                NamedColor::new("#17becf", 0x17, 0xbe, 0xcf),
            ],
        }
    }

    /// Wraps around past the end of the palette.
    pub fn get_color(&self, index: usize) -> NamedColor {
        self.colors[index % self.colors.len()]
    }

    pub fn find(&self, name: &str) -> Option<NamedColor> {
        self.colors.iter().copied().find(|color| color.name.eq_ignore_ascii_case(name))
    }
}
