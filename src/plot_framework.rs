// src/plot_framework.rs

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::constants::{
    LEGEND_BORDER_AXES_PAD, LEGEND_BORDER_PAD, LEGEND_HANDLE_LENGTH, LEGEND_HANDLE_TEXT_PAD,
    LEGEND_LABEL_SPACING, MAX_TICK_INTERVALS, SAVE_PAD_INCHES, TICK_MAJOR_PAD_PT, GRID_COLOR,
};
use crate::error::Result;
use crate::figure::{Figure, LegendLocation, Series};
use crate::font_config::{resolve_font_family, FontRoles};
use crate::palette::{LineStyle, Marker};
use crate::style_config::{StyleConfig, TickDirection};
use crate::types::{AxisRange, PixelRect};

const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];
const LEGEND_FRAME_FILL_ALPHA: f64 = 0.8;
const LEGEND_FRAME_EDGE: RGBColor = RGBColor(0xcc, 0xcc, 0xcc);

/// Tick positions on "nice" multiples covering `range`, and the step between them.
/// At most `max_intervals` intervals fit in the range.
pub fn nice_ticks(range: &AxisRange, max_intervals: usize) -> (Vec<f64>, f64) {
    let (lo, hi) = if range.start <= range.end {
        (range.start, range.end)
    } else {
        (range.end, range.start)
    };
    if !lo.is_finite() || !hi.is_finite() {
        return (Vec::new(), 1.0);
    }
    let span = hi - lo;
    if span <= 0.0 {
        return (vec![lo], 1.0);
    }

    let raw = span / max_intervals.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step - 1e-9).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    let ticks = (first..=last).map(|k| k as f64 * step).collect();
    (ticks, step)
}

/// Fewest decimals that represent every multiple of `step` exactly.
pub fn tick_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    for decimals in 0..=10 {
        let scaled = step * 10f64.powi(decimals as i32);
        if (scaled - scaled.round()).abs() < 1e-9 * scaled.abs().max(1.0) {
            return decimals;
        }
    }
    10
}

/// Tick label text. Negative values use the typographic minus sign.
pub fn format_tick(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        Some(rest) => format!("\u{2212}{rest}"),
        None => text,
    }
}

/// Split a polyline into dash segments.
///
/// `pattern` holds alternating on/off lengths measured in the space produced by
/// `to_px`, so dashes look the same whatever the axis scales are. Cut points are
/// interpolated in data space, which is exact for affine `to_px`.
pub fn dash_polyline<F>(
    points: &[(f64, f64)],
    to_px: F,
    offset: f64,
    pattern: &[f64],
) -> Vec<Vec<(f64, f64)>>
where
    F: Fn(&(f64, f64)) -> (f64, f64),
{
    let total: f64 = pattern.iter().sum();
    if points.len() < 2 || pattern.is_empty() || !(total > 0.0) {
        return if points.len() < 2 {
            Vec::new()
        } else {
            vec![points.to_vec()]
        };
    }

    // Position inside the pattern after the offset.
    let mut idx = 0;
    let mut remaining = pattern[0];
    let mut skip = offset.rem_euclid(total);
    while skip > 0.0 {
        if skip < remaining {
            remaining -= skip;
            skip = 0.0;
        } else {
            skip -= remaining;
            idx = (idx + 1) % pattern.len();
            remaining = pattern[idx];
        }
    }

    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    if idx % 2 == 0 {
        current.push(points[0]);
    }

    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let (a, b) = (to_px(&p0), to_px(&p1));
        let length = ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        if length <= 0.0 {
            continue;
        }

        let mut d = 0.0;
        while length - d > remaining {
            d += remaining;
            let cut = (
                p0.0 + (p1.0 - p0.0) * d / length,
                p0.1 + (p1.1 - p0.1) * d / length,
            );
            if idx % 2 == 0 {
                current.push(cut);
                if current.len() >= 2 {
                    segments.push(std::mem::take(&mut current));
                }
                current.clear();
            } else {
                current = vec![cut];
            }
            idx = (idx + 1) % pattern.len();
            remaining = pattern[idx];
        }
        remaining -= length - d;
        if idx % 2 == 0 {
            current.push(p1);
        }
    }

    if idx % 2 == 0 && current.len() >= 2 {
        segments.push(current);
    }
    segments
}

/// Entry placement inside a legend box, relative to its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub width: f64,
    pub height: f64,
    pub row_height: f64,
    /// Top-left corner of each entry, in input order.
    pub cells: Vec<(f64, f64)>,
}

/// Lay out legend entries column by column (first column filled top to bottom first).
pub fn legend_layout(
    text_widths: &[f64],
    columns: usize,
    font_px: f64,
    column_spacing: f64,
) -> LegendLayout {
    let n = text_widths.len();
    let row_height = font_px;
    if n == 0 {
        return LegendLayout {
            width: 0.0,
            height: 0.0,
            row_height,
            cells: Vec::new(),
        };
    }

    let columns = columns.clamp(1, n);
    let rows = n.div_ceil(columns);
    let handle = (LEGEND_HANDLE_LENGTH + LEGEND_HANDLE_TEXT_PAD) * font_px;
    let border = LEGEND_BORDER_PAD * font_px;
    let row_step = font_px * (1.0 + LEGEND_LABEL_SPACING);
    let gap = column_spacing * font_px;

    let mut cells = vec![(0.0, 0.0); n];
    let mut x = border;
    let mut right = border;
    for start in (0..n).step_by(rows) {
        let end = (start + rows).min(n);
        let text_w = text_widths[start..end].iter().copied().fold(0.0, f64::max);
        for (row, cell) in cells[start..end].iter_mut().enumerate() {
            *cell = (x, border + row as f64 * row_step);
        }
        right = x + handle + text_w;
        x = right + gap;
    }

    LegendLayout {
        width: right + border,
        height: 2.0 * border
            + rows as f64 * row_height
            + (rows - 1) as f64 * LEGEND_LABEL_SPACING * font_px,
        row_height,
        cells,
    }
}

/// Top-left corner of a `size` legend anchored at `location` inside `plot`.
pub fn legend_origin(
    location: LegendLocation,
    plot: PixelRect,
    size: (f64, f64),
    pad: f64,
) -> (f64, f64) {
    let ((l, t), (r, b)) = plot;
    let (l, t, r, b) = (l as f64, t as f64, r as f64, b as f64);
    let (w, h) = size;
    let center_x = (l + r) / 2.0 - w / 2.0;
    let center_y = (t + b) / 2.0 - h / 2.0;
    match location {
        LegendLocation::UpperRight => (r - pad - w, t + pad),
        LegendLocation::UpperLeft => (l + pad, t + pad),
        LegendLocation::UpperCenter => (center_x, t + pad),
        LegendLocation::LowerRight => (r - pad - w, b - pad - h),
        LegendLocation::LowerLeft => (l + pad, b - pad - h),
        LegendLocation::LowerCenter => (center_x, b - pad - h),
        LegendLocation::Center => (center_x, center_y),
    }
}

/// How far a tick reaches (inside, outside) the spine.
pub fn tick_extent(direction: TickDirection, length: f64) -> (f64, f64) {
    match direction {
        TickDirection::In => (length, 0.0),
        TickDirection::Out => (0.0, length),
        TickDirection::InOut => (length / 2.0, length / 2.0),
    }
}

fn stroke_px(width_pt: f64, px_per_pt: f64) -> u32 {
    (width_pt * px_per_pt).round().max(1.0) as u32
}

fn to_i32(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

fn dash_for(line_style: &LineStyle, width_pt: f64, px_per_pt: f64) -> Option<(f64, Vec<f64>)> {
    line_style.dash_pattern(width_pt).map(|(offset, pattern)| {
        (
            offset * px_per_pt,
            pattern.iter().map(|v| v * px_per_pt).collect(),
        )
    })
}

/// Draw a marker centered on pixel `center` of `area`.
fn draw_marker_px<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    marker: Marker,
    center: (i32, i32),
    radius_px: f64,
    color: RGBColor,
) -> Result<()> {
    match marker.polygon(radius_px) {
        None => area.draw(&Circle::new(center, radius_px.round() as i32, color.filled()))?,
        Some(offsets) => {
            let verts: Vec<(i32, i32)> = offsets
                .into_iter()
                .map(|(dx, dy)| (center.0 + dx, center.1 + dy))
                .collect();
            area.draw(&Polygon::new(verts, color.filled()))?
        }
    }
    Ok(())
}

/// Render `fig` onto `root`, which must match the figure's pixel size at `dpi`.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    fig: &Figure,
    dpi: f64,
) -> Result<()> {
    let s = StyleConfig::px_per_pt(dpi);
    let style = &fig.style;
    let axes = &fig.axes;

    let family = resolve_font_family(&style.font_family);
    let fonts = FontRoles::from_style(style, &family);
    let x_tick_font = fonts.xtick_label.text_style(s);
    let y_tick_font = fonts.ytick_label.text_style(s);
    let axis_label_font = fonts.axis_label.text_style(s);
    let title_font = fonts.title.text_style(s);

    let x_range = axes.x_range();
    let y_range = axes.y_range();
    let (x_ticks, x_step) = nice_ticks(&x_range, MAX_TICK_INTERVALS);
    let (y_ticks, y_step) = nice_ticks(&y_range, MAX_TICK_INTERVALS);
    let x_decimals = tick_decimals(x_step);
    let y_decimals = tick_decimals(y_step);

    // --- Tight layout: measure the decorations around the axes ---
    let mut y_tick_w = 0u32;
    for v in &y_ticks {
        let (w, _) = root.estimate_text_size(&format_tick(*v, y_decimals), &y_tick_font)?;
        y_tick_w = y_tick_w.max(w);
    }
    let last_x_tick_w = match x_ticks.last() {
        Some(v) => root.estimate_text_size(&format_tick(*v, x_decimals), &x_tick_font)?.0,
        None => 0,
    };
    let (_, x_tick_h) = root.estimate_text_size("0", &x_tick_font)?;
    let (_, axis_label_h) = root.estimate_text_size("Ag", &axis_label_font)?;

    let tick_len = style.tick_major_size * s;
    let tick_pad = TICK_MAJOR_PAD_PT * s;
    let (_, x_out) = tick_extent(axes.ticks.x_direction, tick_len);
    let (_, y_out) = tick_extent(axes.ticks.y_direction, tick_len);
    let x_desc_h = if axes.x_label.is_empty() { 0.0 } else { axis_label_h as f64 + axes.x_label_pad_pt * s };
    let y_desc_h = if axes.y_label.is_empty() { 0.0 } else { axis_label_h as f64 + axes.y_label_pad_pt * s };
    let x_area = (x_out + tick_pad + x_tick_h as f64 + x_desc_h).ceil() as u32;
    let y_area = (y_out + tick_pad + y_tick_w as f64 + y_desc_h).ceil() as u32;

    // A tight bounding box trims the outer padding to the save pad.
    let mut pad_px = fig.layout_pad * fonts.base.size_px(s);
    if style.save_bbox_tight {
        pad_px = pad_px.min(SAVE_PAD_INCHES * dpi);
    }
    let pad = pad_px.round().max(0.0) as u32;
    let top = pad + (x_tick_h / 2);
    let right = pad + (last_x_tick_w / 2);
    log::debug!(
        "Layout: pad {pad}px, x label area {x_area}px, y label area {y_area}px, font '{family}'"
    );

    let mut builder = ChartBuilder::on(root);
    builder
        .margin_top(top)
        .margin_right(right)
        .margin_bottom(pad)
        .margin_left(pad)
        .x_label_area_size(x_area)
        .y_label_area_size(y_area);
    if let Some(title) = &axes.title {
        builder.caption(title, title_font);
    }
    let mut chart = builder.build_cartesian_2d(
        x_range.start..x_range.end,
        y_range.start..y_range.end,
    )?;

    let plot: PixelRect = (
        chart.backend_coord(&(x_range.start, y_range.end)),
        chart.backend_coord(&(x_range.end, y_range.start)),
    );
    let ((left, top_px), (right_px, bottom)) = plot;

    // --- Grid (below the data) ---
    if let Some(grid) = &axes.grid {
        let color = GRID_COLOR.mix(grid.alpha);
        let width = stroke_px(grid.line_width_pt, s);
        let dash = dash_for(&grid.line_style, grid.line_width_pt, s);
        let mut lines: Vec<Vec<(f64, f64)>> = Vec::new();
        for &x in &x_ticks {
            lines.push(vec![(x, y_range.start), (x, y_range.end)]);
        }
        for &y in &y_ticks {
            lines.push(vec![(x_range.start, y), (x_range.end, y)]);
        }
        let mut segments = Vec::new();
        for line in &lines {
            match &dash {
                Some((offset, pattern)) => segments.extend(dash_polyline(
                    line,
                    |p| {
                        let (px, py) = chart.backend_coord(p);
                        (px as f64, py as f64)
                    },
                    *offset,
                    pattern,
                )),
                None => segments.push(line.clone()),
            }
        }
        chart.draw_series(
            segments
                .into_iter()
                .map(|seg| PathElement::new(seg, color.stroke_width(width))),
        )?;
    }

    // --- Data series ---
    for series in &axes.series {
        draw_series_line(&mut chart, series, s)?;
    }
    let plot_area = chart.plotting_area().strip_coord_spec();
    for series in &axes.series {
        let Some(marker) = series.style.marker else {
            continue;
        };
        let radius = style.marker_size * s / 2.0;
        let every = series.mark_every.max(1);
        for (_, p) in series
            .data
            .iter()
            .enumerate()
            .filter(|(i, p)| i % every == 0 && p.0.is_finite() && p.1.is_finite())
        {
            if p.0 < x_range.start.min(x_range.end)
                || p.0 > x_range.end.max(x_range.start)
                || p.1 < y_range.start.min(y_range.end)
                || p.1 > y_range.end.max(y_range.start)
            {
                continue;
            }
            let (px, py) = chart.backend_coord(p);
            let (bx, by) = plot_area.get_base_pixel();
            draw_marker_px(&plot_area, marker, (px - bx, py - by), radius, series.style.color)?;
        }
    }

    // --- Spines ---
    root.draw(&Rectangle::new(
        [(left, top_px), (right_px, bottom)],
        BLACK.stroke_width(stroke_px(style.axes_line_width, s)),
    ))?;

    // --- Ticks ---
    let (x_in, x_out) = tick_extent(axes.ticks.x_direction, tick_len);
    let (y_in, y_out) = tick_extent(axes.ticks.y_direction, tick_len);
    let x_tick_style = BLACK.stroke_width(stroke_px(style.xtick_major_width, s));
    let y_tick_style = BLACK.stroke_width(stroke_px(style.ytick_major_width, s));
    let x_label_y = bottom + (x_out + tick_pad).round() as i32;
    let y_label_x = left - (y_out + tick_pad).round() as i32;
    let x_tick_text = x_tick_font.pos(Pos::new(HPos::Center, VPos::Top));
    let y_tick_text = y_tick_font.pos(Pos::new(HPos::Right, VPos::Center));
    for &x in &x_ticks {
        let px = chart.backend_coord(&(x, y_range.start)).0;
        root.draw(&Text::new(
            format_tick(x, x_decimals),
            (px, x_label_y),
            x_tick_text.clone(),
        ))?;
        let (x_in, x_out) = (x_in.round() as i32, x_out.round() as i32);
        root.draw(&PathElement::new(
            vec![(px, bottom + x_out), (px, bottom - x_in)],
            x_tick_style,
        ))?;
        if axes.ticks.top {
            root.draw(&PathElement::new(
                vec![(px, top_px - x_out), (px, top_px + x_in)],
                x_tick_style,
            ))?;
        }
    }
    for &y in &y_ticks {
        let py = chart.backend_coord(&(x_range.start, y)).1;
        root.draw(&Text::new(
            format_tick(y, y_decimals),
            (y_label_x, py),
            y_tick_text.clone(),
        ))?;
        let (y_in, y_out) = (y_in.round() as i32, y_out.round() as i32);
        root.draw(&PathElement::new(
            vec![(left - y_out, py), (left + y_in, py)],
            y_tick_style,
        ))?;
        if axes.ticks.right {
            root.draw(&PathElement::new(
                vec![(right_px + y_out, py), (right_px - y_in, py)],
                y_tick_style,
            ))?;
        }
    }

    // --- Axis labels ---
    if !axes.x_label.is_empty() {
        let y = x_label_y + x_tick_h as i32 + (axes.x_label_pad_pt * s).round() as i32;
        root.draw(&Text::new(
            axes.x_label.as_str(),
            ((left + right_px) / 2, y),
            axis_label_font.pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }
    if !axes.y_label.is_empty() {
        // Rotated text reads bottom to top; its baseline side faces the axes.
        let x = y_label_x - y_tick_w as i32 - (axes.y_label_pad_pt * s).round() as i32;
        root.draw(&Text::new(
            axes.y_label.as_str(),
            (x, (top_px + bottom) / 2),
            axis_label_font
                .transform(FontTransform::Rotate270)
                .pos(Pos::new(HPos::Center, VPos::Bottom)),
        ))?;
    }

    // --- Legend ---
    if let Some(config) = &axes.legend {
        let entries: Vec<&Series> = axes.series.iter().filter(|s| s.in_legend()).collect();
        if entries.is_empty() {
            log::warn!("No series with labels; legend skipped");
        } else {
            let legend_font = fonts.legend.text_style(s);
            let font_px = fonts.legend.size_px(s);
            let mut widths = Vec::with_capacity(entries.len());
            for entry in &entries {
                widths.push(root.estimate_text_size(&entry.label, &legend_font)?.0 as f64);
            }
            let layout = legend_layout(&widths, config.columns, font_px, config.column_spacing);
            let (ox, oy) = legend_origin(
                config.location,
                plot,
                (layout.width, layout.height),
                LEGEND_BORDER_AXES_PAD * font_px,
            );

            if style.legend_frame_on {
                let corners = [to_i32((ox, oy)), to_i32((ox + layout.width, oy + layout.height))];
                root.draw(&Rectangle::new(corners, WHITE.mix(LEGEND_FRAME_FILL_ALPHA).filled()))?;
                root.draw(&Rectangle::new(corners, LEGEND_FRAME_EDGE.stroke_width(stroke_px(0.8, s))))?;
            }

            let handle_len = LEGEND_HANDLE_LENGTH * font_px;
            let text_style = legend_font.pos(Pos::new(HPos::Left, VPos::Center));
            for (entry, &(cx, cy)) in entries.iter().zip(layout.cells.iter()) {
                let y = oy + cy + layout.row_height / 2.0;
                let x0 = ox + cx;
                let handle = vec![(x0, y), (x0 + handle_len, y)];
                let width = stroke_px(entry.line_width_pt, s);
                let segments = match dash_for(&entry.style.line_style, entry.line_width_pt, s) {
                    Some((offset, pattern)) => dash_polyline(&handle, |p| *p, offset, &pattern),
                    None => vec![handle],
                };
                for seg in segments {
                    let seg: Vec<(i32, i32)> = seg.into_iter().map(to_i32).collect();
                    root.draw(&PathElement::new(seg, entry.style.color.stroke_width(width)))?;
                }
                if let Some(marker) = entry.style.marker {
                    let center = to_i32((x0 + handle_len / 2.0, y));
                    draw_marker_px(root, marker, center, style.marker_size * s / 2.0, entry.style.color)?;
                }
                let text_x = x0 + (LEGEND_HANDLE_LENGTH + LEGEND_HANDLE_TEXT_PAD) * font_px;
                root.draw(&Text::new(entry.label.as_str(), to_i32((text_x, y)), text_style.clone()))?;
            }
        }
    }

    Ok(())
}

fn draw_series_line<DB, X, Y>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<X, Y>>,
    series: &Series,
    px_per_pt: f64,
) -> Result<()>
where
    DB: DrawingBackend,
    X: Ranged<ValueType = f64>,
    Y: Ranged<ValueType = f64>,
{
    let points: Vec<(f64, f64)> = series
        .data
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect();
    if points.len() < 2 {
        return Ok(());
    }
    let width = stroke_px(series.line_width_pt, px_per_pt);
    let segments = match dash_for(&series.style.line_style, series.line_width_pt, px_per_pt) {
        Some((offset, pattern)) => dash_polyline(
            &points,
            |p| {
                let (px, py) = chart.backend_coord(p);
                (px as f64, py as f64)
            },
            offset,
            &pattern,
        ),
        None => vec![points],
    };
    let color = series.style.color;
    chart.draw_series(
        segments
            .into_iter()
            .map(|seg| PathElement::new(seg, color.stroke_width(width))),
    )?;
    Ok(())
}
