// src/types.rs
// Type aliases shared by the figure model and the renderer

use std::ops::Range;

/// (x, y) samples of one series.
pub type SeriesData = Vec<(f64, f64)>;

/// Data-space extent of one axis.
pub type AxisRange = Range<f64>;

/// Pixel rectangle as ((left, top), (right, bottom)).
pub type PixelRect = ((i32, i32), (i32, i32));
