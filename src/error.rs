//! Error types for pubplot.

use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result type alias for plotting operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur while building, drawing or exporting a figure.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Series data is malformed (e.g. x and y lengths differ).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The canvas cannot be allocated at the requested size.
    #[error("Invalid figure size: {width_in:.4} x {height_in:.4} in at {dpi} dpi")]
    InvalidFigureSize {
        width_in: f64,
        height_in: f64,
        dpi: f64,
    },

    /// Output path has an extension no exporter handles.
    #[error("Unsupported output format: {extension}")]
    UnsupportedFormat { extension: String },

    /// Drawing backend failure.
    #[error("Render error: {0}")]
    Render(String),

    /// Vector conversion failure.
    #[error("Export error: {0}")]
    Export(String),

    #[error("Failed to read style file: {path}")]
    StyleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid style file {path}: {source}")]
    StyleParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for PlotError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Render(err.to_string())
    }
}
