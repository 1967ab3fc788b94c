// src/style_config.rs

//! Rendering defaults applied when a figure is created.
//!
//! A `StyleConfig` is an explicit value carried by each figure. The two
//! template presets live here; a TOML file can override any subset of fields
//! on top of a preset.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{POINTS_PER_INCH, TICK_MAJOR_SIZE_PT};
use crate::error::{PlotError, Result};

/// Which way tick marks point relative to the plotting area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    In,
    Out,
    InOut,
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveFormat {
    Png,
    Pdf,
    Svg,
}

impl SaveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            SaveFormat::Png => "png",
            SaveFormat::Pdf => "pdf",
            SaveFormat::Svg => "svg",
        }
    }

    /// Format implied by the file extension (case-insensitive).
    /// `Ok(None)` when the path has no extension.
    pub fn from_path(path: &Path) -> Result<Option<Self>> {
        let Some(ext) = path.extension() else {
            return Ok(None);
        };
        let ext = ext.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "png" => Ok(Some(SaveFormat::Png)),
            "pdf" => Ok(Some(SaveFormat::Pdf)),
            "svg" => Ok(Some(SaveFormat::Svg)),
            _ => Err(PlotError::unsupported_format(ext)),
        }
    }

    pub fn is_vector(&self) -> bool {
        !matches!(self, SaveFormat::Png)
    }
}

/// Named rendering options. Sizes and widths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Font families in order of preference; the first one available is used.
    pub font_family: Vec<String>,
    pub font_size: f64,
    pub axes_title_size: f64,
    pub axes_label_size: f64,
    pub xtick_label_size: f64,
    pub ytick_label_size: f64,
    pub axes_line_width: f64,
    pub line_width: f64,
    pub marker_size: f64,
    pub legend_font_size: f64,
    pub legend_frame_on: bool,
    pub xtick_direction: TickDirection,
    pub ytick_direction: TickDirection,
    pub xtick_major_width: f64,
    pub ytick_major_width: f64,
    pub tick_major_size: f64,
    pub save_dpi: f64,
    pub save_format: SaveFormat,
    pub save_transparent: bool,
    pub save_bbox_tight: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: vec!["sans-serif".to_string()],
            font_size: 10.0,
            axes_title_size: 12.0,
            axes_label_size: 10.0,
            xtick_label_size: 10.0,
            ytick_label_size: 10.0,
            axes_line_width: 0.8,
            line_width: 1.5,
            marker_size: 6.0,
            legend_font_size: 10.0,
            legend_frame_on: true,
            xtick_direction: TickDirection::Out,
            ytick_direction: TickDirection::Out,
            xtick_major_width: 0.8,
            ytick_major_width: 0.8,
            tick_major_size: TICK_MAJOR_SIZE_PT,
            save_dpi: 100.0,
            save_format: SaveFormat::Png,
            save_transparent: false,
            save_bbox_tight: false,
        }
    }
}

impl StyleConfig {
    /// Defaults of the scientific template.
    pub fn scientific() -> Self {
        Self {
            font_family: vec!["Times New Roman".to_string()],
            font_size: 10.0,
            axes_label_size: 12.0,
            xtick_label_size: 10.0,
            ytick_label_size: 10.0,
            axes_line_width: 1.5,
            line_width: 2.0,
            legend_font_size: 10.0,
            legend_frame_on: false,
            save_dpi: 300.0,
            save_bbox_tight: true,
            ..Self::default()
        }
    }

    /// Defaults of the research template.
    pub fn research() -> Self {
        Self {
            font_family: vec!["Times New Roman".to_string(), "serif".to_string()],
            font_size: 10.0,
            axes_title_size: 12.0,
            axes_label_size: 12.0,
            xtick_label_size: 10.0,
            ytick_label_size: 10.0,
            axes_line_width: 1.5,
            legend_font_size: 10.0,
            legend_frame_on: false,
            line_width: 2.0,
            marker_size: 6.0,
            xtick_direction: TickDirection::In,
            ytick_direction: TickDirection::In,
            xtick_major_width: 1.5,
            ytick_major_width: 1.5,
            save_dpi: 300.0,
            save_transparent: false,
            save_format: SaveFormat::Pdf,
            save_bbox_tight: true,
            ..Self::default()
        }
    }

    /// Apply overrides from a TOML document on top of `self`.
    /// Keys absent from the document keep their current value.
    pub fn merge_toml(&self, text: &str) -> std::result::Result<Self, toml::de::Error> {
        let overrides: toml::Table = toml::from_str(text)?;
        let mut merged = match toml::Value::try_from(self) {
            Ok(toml::Value::Table(table)) => table,
            _ => toml::Table::new(),
        };
        merged.extend(overrides);
        toml::Value::Table(merged).try_into()
    }

    /// Load a style file, layering it over `base`.
    pub fn load(path: &Path, base: &StyleConfig) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PlotError::StyleRead {
            path: PathBuf::from(path),
            source,
        })?;
        base.merge_toml(&text).map_err(|source| PlotError::StyleParse {
            path: PathBuf::from(path),
            source,
        })
    }

    /// Pixels per point at the given resolution.
    pub fn px_per_pt(dpi: f64) -> f64 {
        dpi / POINTS_PER_INCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let sci = StyleConfig::scientific();
        assert_eq!(sci.font_family, vec!["Times New Roman"]);
        assert_eq!(sci.axes_label_size, 12.0);
        assert_eq!(sci.line_width, 2.0);
        assert!(!sci.legend_frame_on);

        let research = StyleConfig::research();
        assert_eq!(research.xtick_direction, TickDirection::In);
        assert_eq!(research.ytick_major_width, 1.5);
        assert_eq!(research.save_dpi, 300.0);
        assert_eq!(research.save_format, SaveFormat::Pdf);
        assert!(!research.save_transparent);
    }

    #[test]
    fn test_merge_toml_keeps_unlisted_fields() {
        let base = StyleConfig::research();
        let merged = base
            .merge_toml("font_size = 8.0\nlegend_frame_on = true\nxtick_direction = \"out\"\n")
            .unwrap();
        assert_eq!(merged.font_size, 8.0);
        assert!(merged.legend_frame_on);
        assert_eq!(merged.xtick_direction, TickDirection::Out);
        assert_eq!(merged.ytick_direction, TickDirection::In);
        assert_eq!(merged.font_family, base.font_family);
    }

    #[test]
    fn test_merge_toml_rejects_bad_values() {
        let base = StyleConfig::scientific();
        assert!(base.merge_toml("save_format = \"bmp\"").is_err());
        assert!(base.merge_toml("font_size = \"large\"").is_err());
    }

    #[test]
    fn test_save_format_from_path() {
        assert_eq!(
            SaveFormat::from_path(Path::new("a/plot.PDF")).unwrap(),
            Some(SaveFormat::Pdf)
        );
        assert_eq!(SaveFormat::from_path(Path::new("plot")).unwrap(), None);
        assert!(matches!(
            SaveFormat::from_path(Path::new("plot.jpg")),
            Err(PlotError::UnsupportedFormat { .. })
        ));
    }
}
