// src/export.rs

// Writing a figure to disk. PNG goes through the bitmap backend; SVG and PDF
// share one SVG rendering, the PDF being converted from it.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use plotters::prelude::*;

use crate::constants::POINTS_PER_INCH;
use crate::error::{PlotError, Result};
use crate::figure::Figure;
use crate::font_config::{resolve_font_family, system_fonts};
use crate::plot_framework::draw_figure;
use crate::style_config::SaveFormat;

/// Output format for `path`: its extension, or the style's default when it has none.
/// Returns the path actually written to (with the default extension appended).
pub fn resolve_output(path: &Path, default_format: SaveFormat) -> Result<(PathBuf, SaveFormat)> {
    match SaveFormat::from_path(path)? {
        Some(format) => Ok((path.to_path_buf(), format)),
        None => Ok((path.with_extension(default_format.extension()), default_format)),
    }
}

/// Save `fig` to `path` at the figure's `save_dpi`, or `dpi` when given.
pub fn save_figure(fig: &Figure, path: &Path, dpi: Option<f64>) -> Result<PathBuf> {
    let dpi = dpi.unwrap_or(fig.style.save_dpi);
    let (path, format) = resolve_output(path, fig.style.save_format)?;
    let (width, height) = fig.size.pixels(dpi)?;
    log::debug!(
        "Rendering {} at {width}x{height} px ({dpi} dpi)",
        path.display()
    );

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let transparent = fig.style.save_transparent && format.is_vector();
    if fig.style.save_transparent && !transparent {
        log::warn!(
            "Transparent background is not supported for {} output; '{}' gets a white background",
            format.extension(),
            path.display()
        );
    }

    match format {
        SaveFormat::Png => render_png(fig, &path, (width, height), dpi)?,
        SaveFormat::Svg => {
            let svg = render_svg(fig, (width, height), dpi, transparent)?;
            fs::write(&path, physical_svg_size(&svg, (width, height), dpi))?;
        }
        SaveFormat::Pdf => {
            let svg = render_svg(fig, (width, height), dpi, transparent)?;
            let family = resolve_font_family(&fig.style.font_family);
            fs::write(&path, svg_to_pdf(&svg, dpi, &family)?)?;
        }
    }

    log::info!("Plot saved as '{}'", path.display());
    Ok(path)
}

fn render_png(fig: &Figure, path: &Path, size: (u32, u32), dpi: f64) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw_figure(&root, fig, dpi)?;
    root.present()?;
    Ok(())
}

/// Render `fig` as an SVG document in pixel units.
pub fn render_svg(fig: &Figure, size: (u32, u32), dpi: f64, transparent: bool) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        if !transparent {
            root.fill(&WHITE)?;
        }
        draw_figure(&root, fig, dpi)?;
        root.present()?;
    }
    Ok(svg)
}

/// Give the root `<svg>` element a size in points so viewers show it at its
/// physical size. The view box keeps the pixel coordinates.
pub fn physical_svg_size(svg: &str, size: (u32, u32), dpi: f64) -> String {
    let pixel_attrs = format!("width=\"{}\" height=\"{}\"", size.0, size.1);
    let to_pt = |px: u32| px as f64 / dpi * POINTS_PER_INCH;
    let point_attrs = format!(
        "width=\"{:.2}pt\" height=\"{:.2}pt\"",
        to_pt(size.0),
        to_pt(size.1)
    );
    svg.replacen(&pixel_attrs, &point_attrs, 1)
}

fn svg_to_pdf(svg: &str, dpi: f64, family: &str) -> Result<Vec<u8>> {
    let mut fontdb = system_fonts().clone();
    fontdb.set_serif_family(family);
    fontdb.set_sans_serif_family(family);
    let options = svg2pdf::usvg::Options {
        font_family: family.to_string(),
        fontdb: Arc::new(fontdb),
        ..svg2pdf::usvg::Options::default()
    };
    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
        .map_err(|e| PlotError::Export(format!("SVG parse failed: {e}")))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions { dpi: dpi as f32 },
    )
    .map_err(|e| PlotError::Export(format!("PDF conversion failed: {e:?}")))
}

/// Open `path` with the platform's default viewer. Failures are logged only.
pub fn show(path: &Path) {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    } else {
        Command::new("xdg-open")
    };
    match command.arg(path).spawn() {
        Ok(_) => log::debug!("Opened '{}' in the system viewer", path.display()),
        Err(e) => log::warn!("Could not open '{}' for display: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_output_appends_default_extension() {
        let (path, format) = resolve_output(Path::new("out/figure"), SaveFormat::Pdf).unwrap();
        assert_eq!(path, PathBuf::from("out/figure.pdf"));
        assert_eq!(format, SaveFormat::Pdf);

        let (path, format) = resolve_output(Path::new("figure.svg"), SaveFormat::Pdf).unwrap();
        assert_eq!(path, PathBuf::from("figure.svg"));
        assert_eq!(format, SaveFormat::Svg);
    }

    #[test]
    fn test_resolve_output_rejects_unknown_extension() {
        assert!(matches!(
            resolve_output(Path::new("figure.gif"), SaveFormat::Png),
            Err(PlotError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_physical_svg_size_rewrites_root_only() {
        let svg = "<svg width=\"300\" height=\"150\" viewBox=\"0 0 300 150\">\
                   <rect width=\"300\" height=\"150\"/></svg>";
        let out = physical_svg_size(svg, (300, 150), 300.0);
        assert!(out.starts_with("<svg width=\"72.00pt\" height=\"36.00pt\""));
        assert!(out.contains("viewBox=\"0 0 300 150\""));
        assert!(out.contains("<rect width=\"300\" height=\"150\"/>"));
    }

    fn sample_figure() -> Figure {
        let mut fig = crate::figure::create_figure(8.0, 4.0 / 3.0, &crate::StyleConfig::research());
        let style = crate::StylePalettes::default().style_for(0, false);
        fig.axes.plot(&[0.0, 10.0], &[-1.0, 1.0], "line", style).unwrap();
        fig
    }

    #[test]
    fn test_pdf_keeps_text_with_fonts() {
        let fig = sample_figure();
        let size = fig.size.pixels(72.0).unwrap();
        let svg = render_svg(&fig, size, 72.0, false).unwrap();
        let family = resolve_font_family(&fig.style.font_family);
        let pdf = svg_to_pdf(&svg, 72.0, &family).unwrap();
        let has = |needle: &[u8]| pdf.windows(needle.len()).any(|w| w == needle);
        assert!(pdf.starts_with(b"%PDF"));
        assert!(has(b"/Font"));
        assert!(has(b"/BaseFont"));
    }

    #[test]
    fn test_transparent_svg_skips_background_fill() {
        let fig = sample_figure();
        let size = fig.size.pixels(72.0).unwrap();
        let white = |svg: String| svg.to_lowercase().matches("#ffffff").count();
        let opaque = white(render_svg(&fig, size, 72.0, false).unwrap());
        let clear = white(render_svg(&fig, size, 72.0, true).unwrap());
        assert!(clear < opaque);
    }
}
