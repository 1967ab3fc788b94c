// src/palette.rs

//! Style palettes and cyclic lookup.
//!
//! Series `i` takes `palette[i % palette.len()]` from each palette, so short
//! palettes repeat when more series are plotted than there are entries.

use std::f64::consts::PI;
use std::fmt;

use plotters::style::RGBColor;

use crate::constants::{
    COLOR_LIST, DASHDOT_PATTERN, DASHED_PATTERN, DOTTED_PATTERN, LINE_STYLES, MARKER_STYLES,
};

/// Line pattern of a data series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
    /// On/off lengths in points (for a 1pt line) starting `offset` points into the pattern.
    Custom {
        offset: f64,
        pattern: &'static [f64],
    },
}

impl LineStyle {
    /// Dash offset and on/off lengths in points, scaled by the line width.
    /// `None` means a continuous line.
    pub fn dash_pattern(&self, line_width_pt: f64) -> Option<(f64, Vec<f64>)> {
        let scale = line_width_pt.max(0.0);
        let (offset, base): (f64, &[f64]) = match self {
            LineStyle::Solid => return None,
            LineStyle::Dashed => (0.0, &DASHED_PATTERN),
            LineStyle::DashDot => (0.0, &DASHDOT_PATTERN),
            LineStyle::Dotted => (0.0, &DOTTED_PATTERN),
            LineStyle::Custom { offset, pattern } => (*offset, pattern),
        };
        Some((offset * scale, base.iter().map(|v| v * scale).collect()))
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStyle::Solid => write!(f, "-"),
            LineStyle::Dashed => write!(f, "--"),
            LineStyle::DashDot => write!(f, "-."),
            LineStyle::Dotted => write!(f, ":"),
            LineStyle::Custom { offset, pattern } => write!(f, "({offset}, {pattern:?})"),
        }
    }
}

/// Marker shape drawn at data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    TriangleUp,
    Diamond,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Pentagon,
    Star,
    Hexagon,
}

impl Marker {
    /// Polygon outline in pixel offsets around the data point (y grows downward).
    /// `None` for the circle, which is drawn as a true circle.
    pub fn polygon(&self, radius_px: f64) -> Option<Vec<(i32, i32)>> {
        let r = radius_px;
        let verts = match self {
            Marker::Circle => return None,
            Marker::Square => regular_polygon(4, r, PI / 4.0),
            Marker::Diamond => regular_polygon(4, r, 0.0),
            Marker::TriangleUp => regular_polygon(3, r, 0.0),
            Marker::TriangleDown => regular_polygon(3, r, PI),
            Marker::TriangleLeft => regular_polygon(3, r, -PI / 2.0),
            Marker::TriangleRight => regular_polygon(3, r, PI / 2.0),
            Marker::Pentagon => regular_polygon(5, r, 0.0),
            Marker::Hexagon => regular_polygon(6, r, 0.0),
            Marker::Star => star(5, r, r * 0.381966),
        };
        Some(
            verts
                .into_iter()
                .map(|(x, y)| (x.round() as i32, y.round() as i32))
                .collect(),
        )
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Marker::Circle => "o",
            Marker::Square => "s",
            Marker::TriangleUp => "^",
            Marker::Diamond => "D",
            Marker::TriangleDown => "v",
            Marker::TriangleLeft => "<",
            Marker::TriangleRight => ">",
            Marker::Pentagon => "p",
            Marker::Star => "*",
            Marker::Hexagon => "h",
        };
        f.write_str(code)
    }
}

// First vertex points up at rotation 0, then clockwise on screen.
fn regular_polygon(sides: usize, radius: f64, rotation: f64) -> Vec<(f64, f64)> {
    (0..sides)
        .map(|k| {
            let angle = rotation + 2.0 * PI * k as f64 / sides as f64;
            (radius * angle.sin(), -radius * angle.cos())
        })
        .collect()
}

fn star(points: usize, outer: f64, inner: f64) -> Vec<(f64, f64)> {
    (0..points * 2)
        .map(|k| {
            let r = if k % 2 == 0 { outer } else { inner };
            let angle = PI * k as f64 / points as f64;
            (r * angle.sin(), -r * angle.cos())
        })
        .collect()
}

/// Wrap-around index into a palette of `len` entries.
pub fn cycle_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        None
    } else {
        Some(index % len)
    }
}

/// Palette entry for series `index`, repeating when `index >= palette.len()`.
pub fn cycle<T>(palette: &[T], index: usize) -> Option<&T> {
    cycle_index(index, palette.len()).and_then(|i| palette.get(i))
}

/// Visual attributes assigned to one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub color: RGBColor,
    pub line_style: LineStyle,
    pub marker: Option<Marker>,
}

/// The three parallel lookup lists.
#[derive(Debug, Clone)]
pub struct StylePalettes {
    pub colors: Vec<RGBColor>,
    pub line_styles: Vec<LineStyle>,
    pub markers: Vec<Marker>,
}

impl Default for StylePalettes {
    fn default() -> Self {
        Self {
            colors: COLOR_LIST.to_vec(),
            line_styles: LINE_STYLES.to_vec(),
            markers: MARKER_STYLES.to_vec(),
        }
    }
}

impl StylePalettes {
    /// Style for series `index`. Empty color or line-style palettes fall back to
    /// black and solid; an empty marker palette means no markers.
    pub fn style_for(&self, index: usize, with_marker: bool) -> SeriesStyle {
        SeriesStyle {
            color: cycle(&self.colors, index).copied().unwrap_or(RGBColor(0, 0, 0)),
            line_style: cycle(&self.line_styles, index)
                .copied()
                .unwrap_or(LineStyle::Solid),
            marker: if with_marker {
                cycle(&self.markers, index).copied()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps_around() {
        assert_eq!(cycle_index(20, 16), Some(4));
        assert_eq!(cycle_index(15, 16), Some(15));
        assert_eq!(cycle_index(16, 16), Some(0));
        assert_eq!(cycle_index(3, 0), None);
        assert_eq!(cycle(&LINE_STYLES, 9), Some(&LineStyle::Dashed));
        assert!(cycle::<Marker>(&[], 0).is_none());
    }

    #[test]
    fn test_style_for_uses_each_palette_independently() {
        let palettes = StylePalettes::default();
        let style = palettes.style_for(10, true);
        assert_eq!(style.color, COLOR_LIST[10]);
        assert_eq!(style.line_style, LINE_STYLES[2]);
        assert_eq!(style.marker, Some(Marker::Circle));

        assert_eq!(palettes.style_for(10, false).marker, None);
    }

    #[test]
    fn test_dash_pattern_scales_with_line_width() {
        assert_eq!(LineStyle::Solid.dash_pattern(2.0), None);
        let (offset, pattern) = LineStyle::Dashed.dash_pattern(2.0).unwrap();
        assert_eq!(offset, 0.0);
        assert!((pattern[0] - 7.4).abs() < 1e-12);
        assert!((pattern[1] - 3.2).abs() < 1e-12);

        let (_, custom) = LINE_STYLES[4].dash_pattern(2.0).unwrap();
        assert_eq!(custom, vec![6.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn test_marker_polygons() {
        assert!(Marker::Circle.polygon(5.0).is_none());
        assert_eq!(Marker::Square.polygon(5.0).unwrap().len(), 4);
        assert_eq!(Marker::Hexagon.polygon(5.0).unwrap().len(), 6);
        assert_eq!(Marker::Star.polygon(5.0).unwrap().len(), 10);

        let up = Marker::TriangleUp.polygon(10.0).unwrap();
        assert_eq!(up[0], (0, -10));
        let down = Marker::TriangleDown.polygon(10.0).unwrap();
        assert_eq!(down[0], (0, 10));
        let right = Marker::TriangleRight.polygon(10.0).unwrap();
        assert_eq!(right[0], (10, 0));
    }

    #[test]
    fn test_display_codes() {
        let codes: Vec<String> = MARKER_STYLES.iter().map(|m| m.to_string()).collect();
        assert_eq!(codes.join(""), "os^Dv<>p*h");
        assert_eq!(LineStyle::DashDot.to_string(), "-.");
    }
}
