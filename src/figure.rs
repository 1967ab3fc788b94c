// src/figure.rs

//! Figure factory and the in-memory figure model.
//!
//! A [`Figure`] is a canvas of a physical size with one [`Axes`]. Nothing is
//! drawn until the figure is exported; see [`crate::export`].

use crate::constants::{
    AXES_MARGIN, CM_PER_INCH, DEFAULT_LABEL_PAD_PT, DEFAULT_LAYOUT_PAD, GRID_ALPHA,
    GRID_LINE_WIDTH_PT, LEGEND_COLUMN_SPACING,
};
use crate::error::{PlotError, Result};
use crate::palette::{LineStyle, SeriesStyle};
use crate::style_config::{StyleConfig, TickDirection};
use crate::types::{AxisRange, SeriesData};

/// Canvas size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl FigureSize {
    /// `width_cm` wide, `width / aspect_ratio` high. Inputs are not validated;
    /// unusable sizes are rejected when pixels are allocated.
    pub fn from_cm(width_cm: f64, aspect_ratio: f64) -> Self {
        let width_in = width_cm / CM_PER_INCH;
        Self {
            width_in,
            height_in: width_in / aspect_ratio,
        }
    }

    pub fn square_cm(side_cm: f64) -> Self {
        Self::from_cm(side_cm, 1.0)
    }

    /// Canvas size in whole pixels at `dpi`.
    pub fn pixels(&self, dpi: f64) -> Result<(u32, u32)> {
        let w = (self.width_in * dpi).round();
        let h = (self.height_in * dpi).round();
        let valid = |v: f64| v.is_finite() && v >= 1.0 && v <= u32::MAX as f64;
        if valid(w) && valid(h) {
            Ok((w as u32, h as u32))
        } else {
            Err(PlotError::InvalidFigureSize {
                width_in: self.width_in,
                height_in: self.height_in,
                dpi,
            })
        }
    }
}

/// Legend anchor inside the axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLocation {
    UpperRight,
    UpperLeft,
    UpperCenter,
    LowerRight,
    LowerLeft,
    LowerCenter,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendConfig {
    pub location: LegendLocation,
    pub columns: usize,
    /// Gap between columns in font-size units.
    pub column_spacing: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            location: LegendLocation::UpperRight,
            columns: 1,
            column_spacing: LEGEND_COLUMN_SPACING,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub line_style: LineStyle,
    pub line_width_pt: f64,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            line_style: LineStyle::Solid,
            line_width_pt: GRID_LINE_WIDTH_PT,
            alpha: GRID_ALPHA,
        }
    }
}

/// Tick orientation and whether ticks are mirrored on the top/right spines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    pub x_direction: TickDirection,
    pub y_direction: TickDirection,
    pub top: bool,
    pub right: bool,
}

/// One plotted line.
#[derive(Debug, Clone)]
pub struct Series {
    pub data: SeriesData,
    pub label: String,
    pub style: SeriesStyle,
    pub line_width_pt: f64,
    /// Draw a marker on every n-th sample (1 = every sample).
    pub mark_every: usize,
}

impl Series {
    /// Labels starting with '_' are kept out of the legend.
    pub fn in_legend(&self) -> bool {
        !self.label.is_empty() && !self.label.starts_with('_')
    }
}

/// The single drawing surface of a figure.
#[derive(Debug, Clone)]
pub struct Axes {
    pub series: Vec<Series>,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x_label_pad_pt: f64,
    pub y_label_pad_pt: f64,
    pub x_limits: Option<AxisRange>,
    pub y_limits: Option<AxisRange>,
    pub ticks: TickParams,
    pub legend: Option<LegendConfig>,
    pub grid: Option<GridConfig>,
    default_line_width_pt: f64,
}

impl Axes {
    fn new(style: &StyleConfig) -> Self {
        Self {
            series: Vec::new(),
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            x_label_pad_pt: DEFAULT_LABEL_PAD_PT,
            y_label_pad_pt: DEFAULT_LABEL_PAD_PT,
            x_limits: None,
            y_limits: None,
            ticks: TickParams {
                x_direction: style.xtick_direction,
                y_direction: style.ytick_direction,
                top: false,
                right: false,
            },
            legend: None,
            grid: None,
            default_line_width_pt: style.line_width,
        }
    }

    /// Add a line. `x` and `y` must have the same length.
    pub fn plot(
        &mut self,
        x: &[f64],
        y: &[f64],
        label: &str,
        style: SeriesStyle,
    ) -> Result<&mut Series> {
        if x.len() != y.len() {
            return Err(PlotError::InvalidData(format!(
                "series '{label}': x has {} samples, y has {}",
                x.len(),
                y.len()
            )));
        }
        self.series.push(Series {
            data: x.iter().copied().zip(y.iter().copied()).collect(),
            label: label.to_string(),
            style,
            line_width_pt: self.default_line_width_pt,
            mark_every: 1,
        });
        let last = self.series.len() - 1;
        Ok(&mut self.series[last])
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn set_xlabel(&mut self, label: &str, pad_pt: Option<f64>) {
        self.x_label = label.to_string();
        if let Some(pad) = pad_pt {
            self.x_label_pad_pt = pad;
        }
    }

    pub fn set_ylabel(&mut self, label: &str, pad_pt: Option<f64>) {
        self.y_label = label.to_string();
        if let Some(pad) = pad_pt {
            self.y_label_pad_pt = pad;
        }
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) {
        self.x_limits = Some(min..max);
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) {
        self.y_limits = Some(min..max);
    }

    /// Set tick direction on both axes and toggle the mirrored top/right ticks.
    pub fn tick_params(&mut self, direction: TickDirection, top: bool, right: bool) {
        self.ticks = TickParams {
            x_direction: direction,
            y_direction: direction,
            top,
            right,
        };
    }

    pub fn legend(&mut self, config: LegendConfig) {
        self.legend = Some(config);
    }

    pub fn grid(&mut self, config: GridConfig) {
        self.grid = Some(config);
    }

    /// Labels that will appear in the legend, in plotting order.
    pub fn legend_entries(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| s.in_legend())
            .map(|s| s.label.as_str())
            .collect()
    }

    /// Explicit x limits, or the data extent plus the default margin.
    pub fn x_range(&self) -> AxisRange {
        self.x_limits
            .clone()
            .unwrap_or_else(|| self.auto_range(|&(x, _)| x))
    }

    /// Explicit y limits, or the data extent plus the default margin.
    pub fn y_range(&self) -> AxisRange {
        self.y_limits
            .clone()
            .unwrap_or_else(|| self.auto_range(|&(_, y)| y))
    }

    fn auto_range<F>(&self, coord: F) -> AxisRange
    where
        F: Fn(&(f64, f64)) -> f64,
    {
        let mut min_val = f64::INFINITY;
        let mut max_val = f64::NEG_INFINITY;
        for v in self.series.iter().flat_map(|s| s.data.iter()).map(&coord) {
            if v.is_finite() {
                min_val = min_val.min(v);
                max_val = max_val.max(v);
            }
        }
        if !min_val.is_finite() {
            return 0.0..1.0;
        }
        let (lo, hi) = padded_range(min_val, max_val, AXES_MARGIN);
        lo..hi
    }
}

/// Range with `margin * span` added on each side.
/// A degenerate span is widened by a fixed amount instead.
pub fn padded_range(min_val: f64, max_val: f64, margin: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-12 { 0.5 } else { range * margin };
    (min - padding, max + padding)
}

/// A canvas plus its axes and the style it was created with.
#[derive(Debug, Clone)]
pub struct Figure {
    pub size: FigureSize,
    pub style: StyleConfig,
    pub axes: Axes,
    /// Outer padding in font-size units.
    pub layout_pad: f64,
}

impl Figure {
    pub fn new(size: FigureSize, style: &StyleConfig) -> Self {
        Self {
            size,
            style: style.clone(),
            axes: Axes::new(style),
            layout_pad: DEFAULT_LAYOUT_PAD,
        }
    }

    /// Padding between the figure edge and the axes decorations, in font-size units.
    pub fn tight_layout(&mut self, pad: f64) {
        self.layout_pad = pad;
    }
}

/// Create a figure `width_cm` wide with the given width/height ratio.
pub fn create_figure(width_cm: f64, aspect_ratio: f64, style: &StyleConfig) -> Figure {
    let size = FigureSize::from_cm(width_cm, aspect_ratio);
    log::debug!(
        "Creating {:.4} x {:.4} in figure ({width_cm} cm, aspect {aspect_ratio:.4})",
        size.width_in,
        size.height_in
    );
    Figure::new(size, style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::StylePalettes;

    #[test]
    fn test_from_cm_converts_to_inches() {
        let size = FigureSize::from_cm(8.0, 4.0 / 3.0);
        assert!((size.width_in - 3.149606).abs() < 1e-6);
        assert!((size.height_in - 2.362205).abs() < 1e-6);
        assert_eq!(FigureSize::square_cm(2.54), FigureSize { width_in: 1.0, height_in: 1.0 });
    }

    #[test]
    fn test_pixels_rejects_unusable_sizes() {
        assert_eq!(FigureSize::from_cm(2.54, 1.0).pixels(300.0).unwrap(), (300, 300));
        assert!(FigureSize::from_cm(-8.0, 1.0).pixels(300.0).is_err());
        assert!(FigureSize::from_cm(8.0, 0.0).pixels(300.0).is_err());
        assert!(FigureSize::from_cm(0.0, 1.0).pixels(300.0).is_err());
    }

    #[test]
    fn test_plot_rejects_mismatched_lengths() {
        let mut fig = create_figure(8.0, 1.0, &StyleConfig::scientific());
        let style = StylePalettes::default().style_for(0, false);
        let err = fig.axes.plot(&[0.0, 1.0], &[0.0], "bad", style).unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
        assert!(fig.axes.series.is_empty());
    }

    #[test]
    fn test_auto_range_adds_margin() {
        let mut fig = create_figure(8.0, 1.0, &StyleConfig::scientific());
        let style = StylePalettes::default().style_for(0, false);
        fig.axes.plot(&[0.0, 10.0], &[-1.0, 1.0], "a", style).unwrap();
        let x = fig.axes.x_range();
        assert!((x.start + 0.5).abs() < 1e-12 && (x.end - 10.5).abs() < 1e-12);
        fig.axes.set_ylim(-1.25, 2.0);
        assert_eq!(fig.axes.y_range(), -1.25..2.0);
    }

    #[test]
    fn test_empty_axes_defaults() {
        let fig = create_figure(8.0, 1.0, &StyleConfig::scientific());
        assert_eq!(fig.axes.x_range(), 0.0..1.0);
        assert!(fig.axes.legend_entries().is_empty());
    }

    #[test]
    fn test_padded_range() {
        let (lo, hi) = padded_range(2.0, 0.0, 0.05);
        assert!((lo + 0.1).abs() < 1e-12 && (hi - 2.1).abs() < 1e-12);
        assert_eq!(padded_range(1.0, 1.0, 0.05), (0.5, 1.5));
    }

    #[test]
    fn test_hidden_labels_skip_legend() {
        let mut fig = create_figure(8.0, 1.0, &StyleConfig::scientific());
        let style = StylePalettes::default().style_for(0, false);
        fig.axes.plot(&[0.0], &[0.0], "_helper", style).unwrap();
        fig.axes.plot(&[0.0], &[0.0], "shown", style).unwrap();
        assert_eq!(fig.axes.legend_entries(), vec!["shown"]);
    }
}
