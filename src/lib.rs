// src/lib.rs - Library interface for the chart templates and their building blocks

pub mod constants;
pub mod data_input;
pub mod error;
pub mod export;
pub mod figure;
pub mod font_config;
pub mod palette;
pub mod plot_framework;
pub mod plot_functions;
pub mod style_config;
pub mod types;

pub use error::{PlotError, Result};
pub use export::save_figure;
pub use figure::{create_figure, Axes, Figure, FigureSize};
pub use palette::{LineStyle, Marker, SeriesStyle, StylePalettes};
pub use style_config::{SaveFormat, StyleConfig, TickDirection};

pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
