//! The drawing routine shared by every output format.
//!
//! [`draw_chart`] paints a [`Figure`] onto any plotters [`DrawingBackend`]:
//! `SVGBackend`, `BitMapBackend`, and the printpdf backend in [`super::pdf`].
//! The canvas is split into a title band, the chart body and a source note
//! band. The body is a `ChartBuilder` chart whose label areas are sized from
//! the tick labels. The legend sits inside the upper right of the plot.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::combinators::WithKeyPoints;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform};

use super::clip::{Window, clip_polygon, clip_polyline};
use crate::error::{ChartError, Result};
use crate::viz::text::{estimate_text_width_px, line_height_px, truncate_to_width};
use crate::viz::types::{Axis, Figure, Mark, Placement, Ticks};
use crate::viz::util::{format_tick, nice_ticks};

pub const BACKGROUND: RGBColor = RGBColor(255, 255, 255);
pub const INK: RGBColor = RGBColor(34, 34, 34);
const SPINE: RGBColor = RGBColor(64, 64, 64);
const GRID: RGBColor = RGBColor(221, 221, 221);
const NOTE: RGBColor = RGBColor(96, 96, 96);
const LEGEND_BORDER: RGBColor = RGBColor(190, 190, 190);

/// `WithKeyPoints<RangedCoordf64>` carries `NoDefaultFormatting`, so plotters
/// gives it no `ValueFormatter` and no `configure_mesh`. This wrapper delegates
/// everything and only swaps the format marker; labels come from the mesh's
/// explicit label formatters.
struct KeyAxis(WithKeyPoints<RangedCoordf64>);

impl Ranged for KeyAxis {
    type ValueType = f64;
    type FormatOption = DefaultFormatting;

    fn range(&self) -> std::ops::Range<f64> {
        self.0.range()
    }

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.0.key_points(hint)
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> std::ops::Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<KeyAxis, KeyAxis>>;

pub(crate) fn encode_err<E: std::fmt::Debug>(e: E) -> ChartError {
    ChartError::Encode(format!("{:?}", e))
}

/// Font sizes in pixels for a given resolution.
struct Sizes {
    title: f64,
    label: f64,
    tick: f64,
    legend: f64,
    note: f64,
}

impl Sizes {
    fn for_dpi(dpi: f64) -> Self {
        let pt = |p: f64| p * dpi / 72.0;
        Self {
            title: pt(16.0),
            label: pt(12.0),
            tick: pt(10.0),
            legend: pt(10.0),
            note: pt(9.0),
        }
    }
}

fn line_h(size: f64) -> f64 {
    f64::from(line_height_px(size.round() as u32))
}

fn text_w(text: &str, size: f64) -> f64 {
    f64::from(estimate_text_width_px(text, size.round() as u32))
}

fn lines_of(text: Option<&str>) -> Vec<&str> {
    text.map(|t| t.lines().collect()).unwrap_or_default()
}

fn font(size: f64, color: RGBAColor) -> TextStyle<'static> {
    let mut style = TextStyle::from((FontFamily::SansSerif, size));
    style.color = color.to_backend_color();
    style
}

/// Tick positions and labels for one axis of `length` pixels.
///
/// Numeric ticks are spaced at least `min_gap` apart. Category ticks are
/// thinned to every k-th label when they would not fit; `along` says whether
/// labels sit side by side in their reading direction.
fn axis_ticks(axis: &Axis, length: f64, min_gap: f64, size: f64, along: bool) -> Vec<(f64, String)> {
    let (lo, hi) = axis.range;
    let inside = |v: f64| v >= lo.min(hi) && v <= hi.max(lo);
    match &axis.ticks {
        Ticks::Numeric { year } => {
            let count = ((length / min_gap).floor() as usize).clamp(2, 10);
            let values = nice_ticks(lo, hi, count);
            let step = match values.as_slice() {
                [a, b, ..] => b - a,
                _ => hi - lo,
            };
            let top = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            values
                .into_iter()
                .map(|v| (v, format_tick(v, top, step, *year)))
                .collect()
        }
        Ticks::Fixed(ticks) => ticks.iter().filter(|(v, _)| inside(*v)).cloned().collect(),
        Ticks::Categories(cats) => {
            let shown: Vec<&(f64, String)> = cats.iter().filter(|(v, _)| inside(*v)).collect();
            let extent = |label: &str| {
                if along {
                    label.lines().map(|l| text_w(l, size)).fold(0.0, f64::max) + size
                } else {
                    label.lines().count().max(1) as f64 * line_h(size)
                }
            };
            let needed: f64 = shown.iter().map(|(_, l)| extent(l)).sum();
            let every = (needed / length.max(1.0)).ceil().max(1.0) as usize;
            shown
                .into_iter()
                .step_by(every)
                .map(|(v, l)| (*v, l.clone()))
                .collect()
        }
    }
}

fn tick_label(ticks: &[(f64, String)], v: f64) -> String {
    let eps = 1e-9 * v.abs().max(1.0);
    ticks
        .iter()
        .find(|(t, _)| (t - v).abs() <= eps)
        .map(|(_, l)| l.clone())
        .unwrap_or_default()
}

fn widest(ticks: &[(f64, String)], size: f64) -> f64 {
    ticks
        .iter()
        .flat_map(|(_, l)| l.lines())
        .map(|l| text_w(l, size))
        .fold(0.0, f64::max)
}

fn tallest(ticks: &[(f64, String)]) -> usize {
    ticks.iter().map(|(_, l)| l.lines().count()).max().unwrap_or(1).max(1)
}

fn scaled(v: u32, scale: f64) -> u32 {
    (f64::from(v) * scale).round().max(1.0) as u32
}

/// Paint `figure` onto `root`. With `text` false every label is drawn fully
/// transparent, which lets the bitmap path run without a registered font.
pub fn draw_chart<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure, text: bool) -> Result<()> {
    root.fill(&BACKGROUND).map_err(encode_err)?;
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (f64::from(w), f64::from(h));
    let s = Sizes::for_dpi(figure.dpi);
    let pad = (0.1 * figure.dpi).max(4.0);
    let ink = if text { INK.to_rgba() } else { TRANSPARENT };
    let note_ink = if text { NOTE.to_rgba() } else { TRANSPARENT };

    // Title and note bands
    let title_lines = lines_of(figure.title.as_deref());
    let note_lines = lines_of(figure.source.as_deref());
    let mut title_h = pad;
    if !title_lines.is_empty() {
        title_h += title_lines.len() as f64 * line_h(s.title) + pad / 2.0;
    }
    let mut note_h = pad / 2.0;
    if !note_lines.is_empty() {
        note_h += note_lines.len() as f64 * line_h(s.note) + pad / 2.0;
    }
    let title_h = title_h.min(h / 3.0).round() as u32;
    let note_h = note_h.min(h / 4.0).round() as u32;
    let (title_area, rest) = root.split_vertically(title_h);
    let rest_h = rest.dim_in_pixel().1;
    let (body, note_area) = rest.split_vertically(rest_h.saturating_sub(note_h));

    let title_style = font(s.title, ink).pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in title_lines.iter().enumerate() {
        let at = ((w / 2.0) as i32, (pad + i as f64 * line_h(s.title)) as i32);
        title_area
            .draw(&Text::new(*line, at, title_style.clone()))
            .map_err(encode_err)?;
    }
    // Bottom line of the note flush with the lower margin
    let note_style = font(s.note, note_ink).pos(Pos::new(HPos::Right, VPos::Bottom));
    let note_bottom = f64::from(note_area.dim_in_pixel().1) - pad / 2.0;
    for (i, line) in note_lines.iter().rev().enumerate() {
        let at = ((w - pad) as i32, (note_bottom - i as f64 * line_h(s.note)) as i32);
        note_area
            .draw(&Text::new(*line, at, note_style.clone()))
            .map_err(encode_err)?;
    }

    // Label areas
    let (bw, bh) = body.dim_in_pixel();
    let (bw, bh) = (f64::from(bw), f64::from(bh));
    let tick_len = (s.tick * 0.35).round().max(1.0);
    let label_gap = 2.0 * tick_len;
    let x_label = figure.x_axis.label.as_deref().filter(|l| !l.trim().is_empty());
    let y_label = figure.y_axis.label.as_deref().filter(|l| !l.trim().is_empty());
    let turns = figure.x_axis.tick_turns % 4;
    let upright = turns % 2 == 0;
    let x_gap = if upright { s.tick * 8.0 } else { line_h(s.tick) * 1.5 };

    let x_extent = |ticks: &[(f64, String)]| {
        if upright {
            tallest(ticks) as f64 * line_h(s.tick)
        } else {
            ticks
                .iter()
                .map(|(_, l)| text_w(&l.replace('\n', " "), s.tick))
                .fold(0.0, f64::max)
        }
    };
    let rough_x = axis_ticks(&figure.x_axis, bw - 3.0 * pad, x_gap, s.tick, upright);
    let mut bottom_area = label_gap + x_extent(&rough_x);
    if x_label.is_some() {
        bottom_area += pad / 2.0 + line_h(s.label);
    }
    let margin = pad.min(bw / 8.0).min(bh / 8.0);
    let bottom_area = bottom_area.min(bh / 2.0);
    let plot_h = (bh - 2.0 * margin - bottom_area).max(10.0);
    let y_ticks = axis_ticks(&figure.y_axis, plot_h, line_h(s.tick) * 2.5, s.tick, false);
    let mut left_area = label_gap + widest(&y_ticks, s.tick);
    if y_label.is_some() {
        left_area += pad / 2.0 + line_h(s.label);
    }
    let left_area = left_area.min(bw / 2.0);
    let plot_w = (bw - 3.0 * margin - left_area).max(10.0);
    let x_ticks = axis_ticks(&figure.x_axis, plot_w, x_gap, s.tick, upright);

    let (x0, x1) = figure.x_axis.range;
    let (y0, y1) = figure.y_axis.range;
    let x_keys: Vec<f64> = x_ticks.iter().map(|(v, _)| *v).collect();
    let y_keys: Vec<f64> = y_ticks.iter().map(|(v, _)| *v).collect();
    let mut chart: Chart<'_, DB> = ChartBuilder::on(&body)
        .margin(margin as u32)
        .margin_right((2.0 * margin) as u32)
        .set_label_area_size(LabelAreaPosition::Left, left_area as u32)
        .set_label_area_size(LabelAreaPosition::Bottom, bottom_area as u32)
        .build_cartesian_2d(
            KeyAxis((x0..x1).with_key_points(x_keys)),
            KeyAxis((y0..y1).with_key_points(y_keys)),
        )
        .map_err(encode_err)?;

    // Category and rotated labels are placed by hand below; the mesh leaves
    // them transparent but still sizes the ticks and gridlines from them.
    let x_by_hand = !upright || matches!(figure.x_axis.ticks, Ticks::Categories(_));
    let y_by_hand = matches!(figure.y_axis.ticks, Ticks::Categories(_));
    let x_fmt = |v: &f64| tick_label(&x_ticks, *v);
    let y_fmt = |v: &f64| tick_label(&y_ticks, *v);
    let spine = if figure.spines { SPINE.to_rgba() } else { TRANSPARENT };
    {
        let mut mesh = chart.configure_mesh();
        mesh.bold_line_style(GRID.stroke_width(1))
            .axis_style(spine.stroke_width(1))
            .set_all_tick_mark_size(tick_len as i32)
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_label_style(font(s.tick, if x_by_hand { TRANSPARENT } else { ink }))
            .y_label_style(font(s.tick, if y_by_hand { TRANSPARENT } else { ink }))
            .axis_desc_style(font(s.label, ink));
        if let Some(label) = x_label {
            mesh.x_desc(label.replace('\n', " "));
        }
        if let Some(label) = y_label {
            mesh.y_desc(label.replace('\n', " "));
        }
        if !figure.x_axis.grid {
            mesh.disable_x_mesh();
        }
        if !figure.y_axis.grid {
            mesh.disable_y_mesh();
        }
        mesh.draw().map_err(encode_err)?;
    }

    let window = Window::new(figure.x_axis.range, figure.y_axis.range);
    draw_marks(&mut chart, &figure.marks, &window, figure.dpi / 100.0)?;

    let tick_style = font(s.tick, ink);
    let gap = label_gap as i32;
    let lh = line_h(s.tick);
    if x_by_hand {
        for (v, label) in &x_ticks {
            let (px, py) = chart.backend_coord(&(*v, y0.min(y1)));
            let y = py + gap;
            match turns {
                1 | 3 => {
                    let (pos, rotation) = if turns == 1 {
                        (Pos::new(HPos::Right, VPos::Center), FontTransform::Rotate270)
                    } else {
                        (Pos::new(HPos::Left, VPos::Center), FontTransform::Rotate90)
                    };
                    let style = tick_style.pos(pos).transform(rotation);
                    root.draw(&Text::new(label.replace('\n', " "), (px, y), style))
                        .map_err(encode_err)?;
                }
                _ => {
                    let mut style = tick_style.pos(Pos::new(HPos::Center, VPos::Top));
                    if turns == 2 {
                        style = style.transform(FontTransform::Rotate180);
                    }
                    for (i, line) in label.lines().enumerate() {
                        let at = (px, y + (i as f64 * lh) as i32);
                        root.draw(&Text::new(line, at, style.clone()))
                            .map_err(encode_err)?;
                    }
                }
            }
        }
    }
    if y_by_hand {
        let style = tick_style.pos(Pos::new(HPos::Right, VPos::Center));
        for (v, label) in &y_ticks {
            let (px, py) = chart.backend_coord(&(x0.min(x1), *v));
            let lines: Vec<&str> = label.lines().collect();
            let first = f64::from(py) - lines.len().saturating_sub(1) as f64 * lh / 2.0;
            for (i, line) in lines.iter().enumerate() {
                let at = (px - gap, (first + i as f64 * lh) as i32);
                root.draw(&Text::new(*line, at, style.clone()))
                    .map_err(encode_err)?;
            }
        }
    }

    for note in &figure.annotations {
        if !window.contains(note.at) {
            continue;
        }
        let (px, py) = chart.backend_coord(&note.at);
        let (pos, at) = match note.placement {
            Placement::Above => (Pos::new(HPos::Center, VPos::Bottom), (px, py - gap)),
            Placement::Right => (Pos::new(HPos::Left, VPos::Center), (px + gap, py)),
            Placement::Center => (Pos::new(HPos::Center, VPos::Center), (px, py)),
        };
        let color = if text { note.color.to_rgba() } else { TRANSPARENT };
        root.draw(&Text::new(note.text.as_str(), at, font(s.legend, color).pos(pos)))
            .map_err(encode_err)?;
    }

    if !figure.legend.is_empty() {
        let plot = chart.plotting_area().strip_coord_spec();
        draw_legend_panel(&plot, figure, &s, pad, ink)?;
    }

    root.present().map_err(encode_err)?;
    Ok(())
}

fn draw_marks<DB: DrawingBackend>(chart: &mut Chart<'_, DB>, marks: &[Mark], window: &Window, scale: f64) -> Result<()> {
    for mark in marks {
        match mark {
            Mark::Line {
                points,
                color,
                width,
            } => {
                let style = color.stroke_width(scaled(*width, scale));
                for run in clip_polyline(window, points) {
                    chart
                        .draw_series(LineSeries::new(run, style))
                        .map_err(encode_err)?;
                }
            }
            Mark::Points {
                points,
                color,
                radius,
            } => {
                let inside: Vec<(f64, f64)> = points.iter().copied().filter(|p| window.contains(*p)).collect();
                chart
                    .draw_series(PointSeries::<_, _, Circle<_, _>, _>::new(
                        inside,
                        scaled(*radius, scale),
                        color.filled(),
                    ))
                    .map_err(encode_err)?;
            }
            Mark::Bar { from, to, color } => {
                if let Some((a, b)) = window.intersect(*from, *to) {
                    chart
                        .draw_series(std::iter::once(Rectangle::new([a, b], color.filled())))
                        .map_err(encode_err)?;
                }
            }
            Mark::Band {
                lower,
                upper,
                color,
            } => {
                let outline: Vec<(f64, f64)> = upper.iter().chain(lower.iter().rev()).copied().collect();
                let clipped = clip_polygon(window, &outline);
                if clipped.len() >= 3 {
                    chart
                        .draw_series(std::iter::once(Polygon::new(clipped, color.filled())))
                        .map_err(encode_err)?;
                }
                let edge = color.stroke_width(scaled(1, scale));
                for run in clip_polyline(window, upper) {
                    chart
                        .draw_series(std::iter::once(PathElement::new(run, edge)))
                        .map_err(encode_err)?;
                }
            }
        }
    }
    Ok(())
}

/// Boxed legend in the upper right corner of the plot area: one swatch and
/// one (truncated) label per entry.
fn draw_legend_panel<DB: DrawingBackend>(
    plot: &DrawingArea<DB, Shift>,
    figure: &Figure,
    s: &Sizes,
    pad: f64,
    ink: RGBAColor,
) -> Result<()> {
    let (plot_w, _) = plot.dim_in_pixel();
    let size = s.legend;
    let row_h = line_h(size);
    let swatch = size * 0.9;
    let max_label = (f64::from(plot_w) * 0.4).max(40.0);
    let labels: Vec<String> = figure
        .legend
        .iter()
        .map(|e| truncate_to_width(&e.label, size.round() as u32, max_label as u32))
        .collect();
    let label_w = labels.iter().map(|l| text_w(l, size)).fold(0.0, f64::max);
    let inner = pad / 2.0;
    let box_w = inner + swatch + inner + label_w + inner;
    let box_h = inner * 2.0 + labels.len() as f64 * row_h;
    let x0 = f64::from(plot_w) - inner - box_w;
    let y0 = inner;
    let corners = [(x0 as i32, y0 as i32), ((x0 + box_w) as i32, (y0 + box_h) as i32)];

    plot.draw(&Rectangle::new(corners, BACKGROUND.filled()))
        .map_err(encode_err)?;
    plot.draw(&Rectangle::new(corners, LEGEND_BORDER.stroke_width(1)))
        .map_err(encode_err)?;

    let style = font(size, ink).pos(Pos::new(HPos::Left, VPos::Center));
    for (i, (entry, label)) in figure.legend.iter().zip(&labels).enumerate() {
        let cy = y0 + inner + (i as f64 + 0.5) * row_h;
        let sx = x0 + inner;
        let swatch_box = [
            (sx as i32, (cy - swatch / 2.0) as i32),
            ((sx + swatch) as i32, (cy + swatch / 2.0) as i32),
        ];
        plot.draw(&Rectangle::new(swatch_box, entry.color.filled()))
            .map_err(encode_err)?;
        let at = ((sx + swatch + inner) as i32, cy as i32);
        plot.draw(&Text::new(label.as_str(), at, style.clone()))
            .map_err(encode_err)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::types::{Annotation, LegendEntry};
    use crate::viz::util::office_color;
    use plotters_svg::SVGBackend;

    fn figure() -> Figure {
        let mut f = Figure::blank(800, 500);
        f.title = Some("Growth\nby year".into());
        f.source = Some("Source: test".into());
        f.x_axis.label = Some("year".into());
        f.y_axis.label = Some("value".into());
        f.x_axis.range = (2000.0, 2010.0);
        f.y_axis.range = (0.0, 2_000_000.0);
        f.y_axis.grid = true;
        f.marks.push(Mark::Line {
            points: vec![(2000.0, 0.0), (2010.0, 3_000_000.0)],
            color: office_color(0),
            width: 2,
        });
        f
    }

    fn svg(figure: &Figure) -> String {
        let mut buf = String::new();
        {
            let root = SVGBackend::with_string(&mut buf, (figure.width_px, figure.height_px))
                .into_drawing_area();
            draw_chart(&root, figure, true).unwrap();
        }
        buf
    }

    /// Text content of every `<text>` element.
    fn texts(svg: &str) -> Vec<String> {
        svg.split("</text>")
            .filter(|chunk| chunk.contains("<text"))
            .filter_map(|chunk| chunk.rsplit(">\n").next())
            .map(|t| t.trim().to_string())
            .collect()
    }

    #[test]
    fn text_elements_are_emitted() {
        let texts = texts(&svg(&figure()));
        for expected in ["Growth", "by year", "Source: test", "year", "value", "1,000K"] {
            assert!(texts.iter().any(|t| t == expected), "missing {expected}: {texts:?}");
        }
    }

    #[test]
    fn lines_leaving_the_window_are_cut() {
        let out = svg(&figure());
        // The series leaves through the top edge, so exactly one clipped run is drawn.
        assert_eq!(out.matches("stroke=\"#4472C4\"").count(), 1);
    }

    #[test]
    fn legend_lists_every_entry() {
        let mut f = figure();
        f.legend = vec![
            LegendEntry {
                label: "alpha".into(),
                color: office_color(0),
            },
            LegendEntry {
                label: "beta".into(),
                color: office_color(1),
            },
        ];
        let texts = texts(&svg(&f));
        assert!(texts.iter().any(|t| t == "alpha") && texts.iter().any(|t| t == "beta"));
    }

    #[test]
    fn crowded_categories_are_thinned() {
        let mut f = Figure::blank(300, 200);
        f.x_axis.range = (-0.5, 99.5);
        f.x_axis.ticks = Ticks::Categories((0..100).map(|i| (i as f64, format!("category {i}"))).collect());
        let shown = texts(&svg(&f)).iter().filter(|t| t.starts_with("category")).count();
        assert!(shown > 0 && shown < 100);
    }

    #[test]
    fn spines_are_transparent_unless_enabled() {
        let mut f = figure();
        let off = svg(&f);
        f.spines = true;
        let on = svg(&f);
        assert!(!off.contains("stroke=\"#404040\""));
        assert!(on.contains("stroke=\"#404040\""));
    }

    #[test]
    fn grid_follows_the_axis_flags() {
        let mut f = figure();
        let grid = "stroke=\"#DDDDDD\"";
        let y_only = svg(&f).matches(grid).count();
        f.x_axis.grid = true;
        let both = svg(&f).matches(grid).count();
        assert!(y_only > 0);
        assert!(both > y_only);
    }

    #[test]
    fn quarter_turn_rotates_x_labels() {
        let mut f = figure();
        f.x_axis.tick_turns = 1;
        f.x_axis.ticks = Ticks::Numeric { year: true };
        let out = svg(&f);
        assert!(out.contains("rotate(270,"));
        assert!(texts(&out).iter().any(|t| t == "2004"));
    }

    #[test]
    fn fixed_ticks_keep_their_labels() {
        let mut f = figure();
        f.x_axis.ticks = Ticks::Fixed(vec![(2001.0, "start".into()), (2009.0, "end".into()), (2050.0, "off".into())]);
        let texts = texts(&svg(&f));
        assert!(texts.iter().any(|t| t == "start") && texts.iter().any(|t| t == "end"));
        assert!(!texts.iter().any(|t| t == "off"));
    }

    #[test]
    fn annotations_inside_the_window_are_drawn() {
        let mut f = figure();
        f.annotations = vec![
            Annotation {
                at: (2005.0, 1_000_000.0),
                text: "inside".into(),
                placement: Placement::Right,
                color: INK,
            },
            Annotation {
                at: (2005.0, 9_000_000.0),
                text: "outside".into(),
                placement: Placement::Above,
                color: INK,
            },
        ];
        let texts = texts(&svg(&f));
        assert!(texts.iter().any(|t| t == "inside"));
        assert!(!texts.iter().any(|t| t == "outside"));
    }

    #[test]
    fn tick_lookup_tolerates_float_noise() {
        let ticks = vec![(0.1 + 0.2, "a".to_string())];
        assert_eq!(tick_label(&ticks, 0.3), "a");
        assert_eq!(tick_label(&ticks, 0.4), "");
    }

    #[test]
    fn k_suffix_uses_the_largest_tick() {
        let mut axis = Axis::default();
        axis.range = (-2_000_000.0, 0.0);
        let ticks = axis_ticks(&axis, 400.0, 40.0, 14.0, false);
        assert!(ticks.iter().all(|(_, l)| !l.ends_with('K')), "{ticks:?}");
    }
}
