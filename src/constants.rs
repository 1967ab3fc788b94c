// src/constants.rs

use plotters::style::RGBColor;

use crate::palette::{LineStyle, Marker};

// Unit conversion.
pub const CM_PER_INCH: f64 = 2.54;
pub const POINTS_PER_INCH: f64 = 72.0;

// Figure factory defaults.
pub const DEFAULT_FIGURE_WIDTH_CM: f64 = 8.0;
pub const DEFAULT_ASPECT_RATIO: f64 = 4.0 / 3.0;

// --- Palettes ---

/// 16 colors commonly used in scientific plots (Tableau 10 + light Tableau 20 tints).
pub const COLOR_LIST: [RGBColor; 16] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
    RGBColor(0xae, 0xc7, 0xe8),
    RGBColor(0xff, 0xbb, 0x78),
    RGBColor(0x98, 0xdf, 0x8a),
    RGBColor(0xff, 0x98, 0x96),
    RGBColor(0xc5, 0xb0, 0xd5),
    RGBColor(0xc4, 0x9c, 0x94),
];

pub const LINE_STYLES: [LineStyle; 8] = [
    LineStyle::Solid,
    LineStyle::Dashed,
    LineStyle::DashDot,
    LineStyle::Dotted,
    LineStyle::Custom { offset: 0.0, pattern: &[3.0, 1.0, 1.0, 1.0] }, // custom dash-dot
    LineStyle::Custom { offset: 0.0, pattern: &[5.0, 5.0] },           // long dash
    LineStyle::Custom { offset: 0.0, pattern: &[1.0, 5.0] },           // sparse dots
    LineStyle::Custom { offset: 0.0, pattern: &[5.0, 1.0] },           // dense dash
];

pub const MARKER_STYLES: [Marker; 10] = [
    Marker::Circle,
    Marker::Square,
    Marker::TriangleUp,
    Marker::Diamond,
    Marker::TriangleDown,
    Marker::TriangleLeft,
    Marker::TriangleRight,
    Marker::Pentagon,
    Marker::Star,
    Marker::Hexagon,
];

// Base dash patterns in points for a 1pt line; scaled by the line width.
pub const DASHED_PATTERN: [f64; 2] = [3.7, 1.6];
pub const DASHDOT_PATTERN: [f64; 4] = [6.4, 1.6, 1.0, 1.6];
pub const DOTTED_PATTERN: [f64; 2] = [1.0, 1.65];

// --- Axes layout (points unless noted) ---
pub const TICK_MAJOR_SIZE_PT: f64 = 3.5;
pub const TICK_MAJOR_PAD_PT: f64 = 3.5;
pub const DEFAULT_LABEL_PAD_PT: f64 = 4.0;
pub const AXES_MARGIN: f64 = 0.05; // fraction of the data span added on each side
pub const MAX_TICK_INTERVALS: usize = 8;
pub const DEFAULT_LAYOUT_PAD: f64 = 1.08; // in font-size units
pub const SAVE_PAD_INCHES: f64 = 0.1; // outer padding cap with a tight bounding box

// --- Legend layout (font-size units) ---
pub const LEGEND_HANDLE_LENGTH: f64 = 2.0;
pub const LEGEND_HANDLE_TEXT_PAD: f64 = 0.8;
pub const LEGEND_LABEL_SPACING: f64 = 0.5;
pub const LEGEND_BORDER_PAD: f64 = 0.4;
pub const LEGEND_BORDER_AXES_PAD: f64 = 0.5;
pub const LEGEND_COLUMN_SPACING: f64 = 2.0;

// Grid defaults.
pub const GRID_LINE_WIDTH_PT: f64 = 0.5;
pub const GRID_ALPHA: f64 = 0.7;
pub const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);

// --- Example routines ---
pub const SAMPLE_X_START: f64 = 0.0;
pub const SAMPLE_X_END: f64 = 10.0;
pub const SAMPLE_COUNT: usize = 100;

pub const SCIENTIFIC_SERIES_COUNT: usize = 6;
pub const SCIENTIFIC_PHASE_STEP: f64 = 0.5;
pub const SCIENTIFIC_FIGURE_SIDE_CM: f64 = 8.0;
pub const SCIENTIFIC_OUTPUT_STEM: &str = "scientific_plot";
pub const SCIENTIFIC_LABEL_PAD_PT: f64 = 5.0;
pub const SCIENTIFIC_LAYOUT_PAD: f64 = 0.5;
pub const SCIENTIFIC_Y_MIN: f64 = -1.25;
pub const SCIENTIFIC_Y_MAX: f64 = 2.0;

pub const RESEARCH_SERIES_COUNT: usize = 4;
pub const RESEARCH_MARK_EVERY: usize = 10;
pub const RESEARCH_OUTPUT_STEM: &str = "research_plot";

// Legend shared by both templates
pub const TEMPLATE_LEGEND_COLUMNS: usize = 2;
pub const TEMPLATE_LEGEND_COLUMN_SPACING: f64 = 0.5;

// src/constants.rs
