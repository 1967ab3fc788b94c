// src/plot_functions/plot_scientific.rs

use std::path::{Path, PathBuf};

use crate::constants::{
    SCIENTIFIC_FIGURE_SIDE_CM, SCIENTIFIC_LABEL_PAD_PT, SCIENTIFIC_LAYOUT_PAD,
    SCIENTIFIC_OUTPUT_STEM, SCIENTIFIC_PHASE_STEP, SCIENTIFIC_SERIES_COUNT, SAMPLE_X_END,
    SAMPLE_X_START, SCIENTIFIC_Y_MAX, SCIENTIFIC_Y_MIN,
};
use crate::data_input::synthetic::{phase_shifted_sines, sample_grid};
use crate::error::Result;
use crate::figure::{Figure, FigureSize};
use crate::palette::StylePalettes;
use crate::plot_functions::{
    apply_template_decorations, export_all, numbered_labels, plot_cycled_series, PlotReport,
    TemplateOptions,
};
use crate::style_config::StyleConfig;

/// Square figure of phase-shifted sines with fixed limits, no markers.
pub fn build_scientific_figure(style: &StyleConfig, series_count: usize) -> Result<Figure> {
    let mut fig = Figure::new(FigureSize::square_cm(SCIENTIFIC_FIGURE_SIDE_CM), style);

    let x = sample_grid();
    let ys = phase_shifted_sines(&x, series_count, SCIENTIFIC_PHASE_STEP);
    let labels = numbered_labels("Data Series", series_count);
    plot_cycled_series(
        &mut fig.axes,
        &x,
        &ys,
        &labels,
        &StylePalettes::default(),
        false,
        1,
    )?;

    let axes = &mut fig.axes;
    axes.set_xlabel("X Axis Label (unit)", Some(SCIENTIFIC_LABEL_PAD_PT));
    axes.set_ylabel("Y Axis Label (unit)", Some(SCIENTIFIC_LABEL_PAD_PT));
    axes.set_xlim(SAMPLE_X_START, SAMPLE_X_END);
    axes.set_ylim(SCIENTIFIC_Y_MIN, SCIENTIFIC_Y_MAX);
    apply_template_decorations(axes);

    fig.tight_layout(SCIENTIFIC_LAYOUT_PAD);
    Ok(fig)
}

/// Output files and their resolutions; `None` uses the style's dpi.
pub fn scientific_outputs(out_dir: &Path) -> Vec<(PathBuf, Option<f64>)> {
    ["pdf", "png", "svg"]
        .iter()
        .map(|ext| (out_dir.join(format!("{SCIENTIFIC_OUTPUT_STEM}.{ext}")), None))
        .collect()
}

/// Build the scientific chart and write all of its outputs.
pub fn plot_scientific(style: &StyleConfig, options: &TemplateOptions) -> Result<PlotReport> {
    let count = options.series_count.unwrap_or(SCIENTIFIC_SERIES_COUNT);
    let fig = build_scientific_figure(style, count)?;
    export_all(&fig, &scientific_outputs(&options.out_dir), options.show)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scientific_figure_layout() {
        let fig = build_scientific_figure(&StyleConfig::scientific(), 6).unwrap();
        assert_eq!(fig.size.width_in, fig.size.height_in);
        assert_eq!(fig.axes.x_range(), 0.0..10.0);
        assert_eq!(fig.axes.y_range(), -1.25..2.0);
        assert_eq!(fig.axes.x_label_pad_pt, 5.0);
        assert_eq!(fig.layout_pad, 0.5);
        assert!(fig.axes.series.iter().all(|s| s.style.marker.is_none()));
        assert!(fig.axes.grid.is_none());
    }

    #[test]
    fn test_scientific_outputs_names() {
        let outputs = scientific_outputs(Path::new("out"));
        let names: Vec<_> = outputs.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("out/scientific_plot.pdf"),
                PathBuf::from("out/scientific_plot.png"),
                PathBuf::from("out/scientific_plot.svg"),
            ]
        );
    }
}
