// src/plot_functions/mod.rs

pub mod plot_research;
pub mod plot_scientific;

use std::path::{Path, PathBuf};

use ndarray::Array1;

use crate::constants::{TEMPLATE_LEGEND_COLUMNS, TEMPLATE_LEGEND_COLUMN_SPACING};
use crate::error::Result;
use crate::export::{save_figure, show};
use crate::figure::{Axes, Figure, LegendConfig, LegendLocation};
use crate::palette::StylePalettes;
use crate::style_config::TickDirection;

/// Options shared by the template routines.
#[derive(Debug, Clone)]
pub struct TemplateOptions {
    pub series_count: Option<usize>,
    pub out_dir: PathBuf,
    pub show: bool,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            series_count: None,
            out_dir: PathBuf::from("."),
            show: false,
        }
    }
}

/// What a template routine produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotReport {
    pub outputs: Vec<PathBuf>,
    pub legend_entries: Vec<String>,
}

/// Plot `ys` against `x`, series i styled from palette position i.
/// `mark_every` only matters when markers are enabled.
pub fn plot_cycled_series(
    axes: &mut Axes,
    x: &Array1<f64>,
    ys: &[Array1<f64>],
    labels: &[String],
    palettes: &StylePalettes,
    with_markers: bool,
    mark_every: usize,
) -> Result<()> {
    let x = x.to_vec();
    for (i, (y, label)) in ys.iter().zip(labels).enumerate() {
        let style = palettes.style_for(i, with_markers);
        let series = axes.plot(&x, &y.to_vec(), label, style)?;
        series.mark_every = mark_every.max(1);
    }
    Ok(())
}

/// Decorations both templates share: inward ticks on all four sides and a
/// two-column legend centered at the top.
pub fn apply_template_decorations(axes: &mut Axes) {
    axes.tick_params(TickDirection::In, true, true);
    axes.legend(LegendConfig {
        location: LegendLocation::UpperCenter,
        columns: TEMPLATE_LEGEND_COLUMNS,
        column_spacing: TEMPLATE_LEGEND_COLUMN_SPACING,
    });
}

/// Save `fig` to each `(path, dpi)` and optionally open the first raster image.
pub fn export_all(
    fig: &Figure,
    targets: &[(PathBuf, Option<f64>)],
    show_result: bool,
) -> Result<PlotReport> {
    let mut outputs = Vec::with_capacity(targets.len());
    for (path, dpi) in targets {
        outputs.push(save_figure(fig, path, *dpi)?);
    }
    if show_result {
        match outputs.iter().find(|p| is_raster(p)) {
            Some(path) => show(path),
            None => log::warn!("No raster output to display"),
        }
    }
    Ok(PlotReport {
        outputs,
        legend_entries: fig
            .axes
            .legend_entries()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

fn is_raster(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Labels `"{prefix} 1"` to `"{prefix} {count}"`.
pub fn numbered_labels(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{prefix} {i}")).collect()
}
