// src/plot_functions/plot_research.rs

use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_ASPECT_RATIO, DEFAULT_FIGURE_WIDTH_CM, DEFAULT_LAYOUT_PAD,
    GRID_ALPHA, GRID_LINE_WIDTH_PT, RESEARCH_MARK_EVERY, RESEARCH_OUTPUT_STEM,
    RESEARCH_SERIES_COUNT,
};
use crate::data_input::synthetic::{sample_grid, scaled_sines};
use crate::error::Result;
use crate::figure::{create_figure, Figure, GridConfig};
use crate::palette::{LineStyle, StylePalettes};
use crate::plot_functions::{
    apply_template_decorations, export_all, numbered_labels, plot_cycled_series, PlotReport,
    TemplateOptions,
};
use crate::style_config::StyleConfig;

/// Factory-sized figure of scaled sines with markers, auto limits and a dashed grid.
///
/// Series take their marker from the marker palette (every 10th sample).
/// The template script this chart comes from defines that palette but never
/// draws it; here it is applied so the palette has a visible use.
pub fn build_research_figure(style: &StyleConfig, series_count: usize) -> Result<Figure> {
    let mut fig = create_figure(DEFAULT_FIGURE_WIDTH_CM, DEFAULT_ASPECT_RATIO, style);

    let x = sample_grid();
    let ys = scaled_sines(&x, series_count);
    let labels = numbered_labels("Dataset", series_count);
    plot_cycled_series(
        &mut fig.axes,
        &x,
        &ys,
        &labels,
        &StylePalettes::default(),
        true,
        RESEARCH_MARK_EVERY,
    )?;

    let axes = &mut fig.axes;
    axes.set_xlabel("X Axis Label (units)", None);
    axes.set_ylabel("Y Axis Label (units)", None);
    apply_template_decorations(axes);
    axes.grid(GridConfig {
        line_style: LineStyle::Dashed,
        line_width_pt: GRID_LINE_WIDTH_PT,
        alpha: GRID_ALPHA,
    });

    fig.tight_layout(DEFAULT_LAYOUT_PAD);
    Ok(fig)
}

/// PNG at the style dpi, then PDF.
pub fn research_outputs(out_dir: &Path) -> Vec<(PathBuf, Option<f64>)> {
    ["png", "pdf"]
        .iter()
        .map(|ext| (out_dir.join(format!("{RESEARCH_OUTPUT_STEM}.{ext}")), None))
        .collect()
}

/// Build the research chart and write all of its outputs.
pub fn plot_research(style: &StyleConfig, options: &TemplateOptions) -> Result<PlotReport> {
    let count = options.series_count.unwrap_or(RESEARCH_SERIES_COUNT);
    let fig = build_research_figure(style, count)?;
    export_all(&fig, &research_outputs(&options.out_dir), options.show)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Marker;

    #[test]
    fn test_research_figure_styles() {
        let fig = build_research_figure(&StyleConfig::research(), 4).unwrap();
        assert_eq!(
            fig.axes.legend_entries(),
            vec!["Dataset 1", "Dataset 2", "Dataset 3", "Dataset 4"]
        );
        assert_eq!(fig.axes.series[0].style.marker, Some(Marker::Circle));
        assert_eq!(fig.axes.series[1].style.marker, Some(Marker::Square));
        assert!(fig.axes.series.iter().all(|s| s.mark_every == 10));
        assert!(fig.axes.grid.is_some());
        assert_eq!(fig.axes.series[0].line_width_pt, 2.0);
    }

    #[test]
    fn test_research_auto_limits_have_margin() {
        let fig = build_research_figure(&StyleConfig::research(), 4).unwrap();
        let x = fig.axes.x_range();
        assert!((x.start + 0.5).abs() < 1e-9);
        assert!((x.end - 10.5).abs() < 1e-9);
        let y = fig.axes.y_range();
        assert!(y.start < -4.0 && y.end > 4.0);
    }
}
