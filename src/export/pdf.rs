//! Vector PDF output: a plotters [`DrawingBackend`] that paints onto a single
//! printpdf page with the built-in Helvetica font.

use plotters::prelude::IntoDrawingArea;
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind, FontTransform,
};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Polygon, Pt, Rgb, TextMatrix,
};

use super::chart::draw_chart;
use crate::error::{ChartError, Result};
use crate::viz::Figure;
use crate::viz::text::estimate_text_width_px;

const MM_PER_INCH: f64 = 25.4;
const PT_PER_INCH: f64 = 72.0;
const CIRCLE_SEGMENTS: usize = 24;

#[derive(Debug, thiserror::Error)]
#[error("pdf: {0}")]
pub struct PdfError(String);

type DrawResult = std::result::Result<(), DrawingErrorKind<PdfError>>;

fn draw_err(e: printpdf::Error) -> DrawingErrorKind<PdfError> {
    DrawingErrorKind::DrawingError(PdfError(e.to_string()))
}

/// Blend with the white page; `None` for fully transparent colors.
fn pdf_color(c: BackendColor) -> Option<Color> {
    if c.alpha <= 0.0 {
        return None;
    }
    let a = c.alpha.min(1.0);
    let mix = |v: u8| (f64::from(v) * a + 255.0 * (1.0 - a)) / 255.0;
    Some(Color::Rgb(Rgb::new(
        mix(c.rgb.0) as f32,
        mix(c.rgb.1) as f32,
        mix(c.rgb.2) as f32,
        None,
    )))
}

/// Clockwise rotation of the text baseline in degrees.
fn clockwise_degrees(t: &FontTransform) -> f64 {
    match t {
        FontTransform::None => 0.0,
        FontTransform::Rotate90 => 90.0,
        FontTransform::Rotate180 => 180.0,
        FontTransform::Rotate270 => 270.0,
    }
}

/// One PDF page sized to the canvas. Canvas pixels map to points at `dpi`,
/// with the y axis flipped. The document is written to `out` on `present`.
pub struct PdfBackend<'a> {
    out: &'a mut Vec<u8>,
    size: (u32, u32),
    dpi: f64,
    doc: Option<PdfDocumentReference>,
    layer: PdfLayerReference,
    font: IndirectFontRef,
}

impl<'a> PdfBackend<'a> {
    pub fn with_buffer(out: &'a mut Vec<u8>, size: (u32, u32), dpi: f64, title: &str) -> Result<Self> {
        let mm = |px: u32| Mm((f64::from(px) / dpi * MM_PER_INCH) as f32);
        let (doc, page, layer) = PdfDocument::new(title, mm(size.0), mm(size.1), "chart");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ChartError::Encode(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            out,
            size,
            dpi,
            doc: Some(doc),
            layer,
            font,
        })
    }

    fn pt(&self, px: f64) -> f64 {
        px / self.dpi * PT_PER_INCH
    }

    fn point(&self, (x, y): (f64, f64)) -> Point {
        Point {
            x: Pt(self.pt(x) as f32),
            y: Pt(self.pt(f64::from(self.size.1) - y) as f32),
        }
    }

    fn path<I: IntoIterator<Item = (f64, f64)>>(&self, points: I) -> Vec<(Point, bool)> {
        points.into_iter().map(|p| (self.point(p), false)).collect()
    }

    fn stroke(&self, points: Vec<(f64, f64)>, color: BackendColor, width: u32, closed: bool) {
        let Some(color) = pdf_color(color) else { return };
        if points.len() < 2 {
            return;
        }
        self.layer.set_outline_color(color);
        self.layer.set_outline_thickness(self.pt(f64::from(width.max(1))) as f32);
        self.layer.add_line(Line {
            points: self.path(points),
            is_closed: closed,
        });
    }

    fn fill(&self, points: Vec<(f64, f64)>, color: BackendColor) {
        let Some(color) = pdf_color(color) else { return };
        if points.len() < 3 {
            return;
        }
        self.layer.set_fill_color(color);
        self.layer.add_polygon(Polygon {
            rings: vec![self.path(points)],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
    }
}

fn float((x, y): BackendCoord) -> (f64, f64) {
    (f64::from(x), f64::from(y))
}

impl DrawingBackend for PdfBackend<'_> {
    type ErrorType = PdfError;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> DrawResult {
        Ok(())
    }

    fn present(&mut self) -> DrawResult {
        if let Some(doc) = self.doc.take() {
            *self.out = doc.save_to_bytes().map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_pixel(&mut self, (x, y): BackendCoord, color: BackendColor) -> DrawResult {
        self.fill(vec![float((x, y)), float((x + 1, y)), float((x + 1, y + 1)), float((x, y + 1))], color);
        Ok(())
    }

    fn draw_line<S: BackendStyle>(&mut self, from: BackendCoord, to: BackendCoord, style: &S) -> DrawResult {
        self.stroke(vec![float(from), float(to)], style.color(), style.stroke_width(), false);
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> DrawResult {
        let (l, t) = float(upper_left);
        let (r, b) = float(bottom_right);
        let corners = vec![(l, t), (r, t), (r, b), (l, b)];
        if fill {
            self.fill(corners, style.color());
        } else {
            self.stroke(corners, style.color(), style.stroke_width(), true);
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(&mut self, path: I, style: &S) -> DrawResult {
        let points = path.into_iter().map(float).collect();
        self.stroke(points, style.color(), style.stroke_width(), false);
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(&mut self, center: BackendCoord, radius: u32, style: &S, fill: bool) -> DrawResult {
        let (cx, cy) = float(center);
        let r = f64::from(radius);
        let ring: Vec<(f64, f64)> = (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let a = i as f64 / CIRCLE_SEGMENTS as f64 * std::f64::consts::TAU;
                (cx + r * a.cos(), cy + r * a.sin())
            })
            .collect();
        if fill {
            self.fill(ring, style.color());
        } else {
            self.stroke(ring, style.color(), style.stroke_width(), true);
        }
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(&mut self, vert: I, style: &S) -> DrawResult {
        self.fill(vert.into_iter().map(float).collect(), style.color());
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(&mut self, text: &str, style: &TStyle, pos: BackendCoord) -> DrawResult {
        let Some(color) = pdf_color(style.color()) else { return Ok(()) };
        if text.is_empty() {
            return Ok(());
        }
        let size = style.size();
        let width = f64::from(estimate_text_width_px(text, size.round() as u32));
        let anchor = style.anchor();
        let along = match anchor.h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let down = match anchor.v_pos {
            VPos::Top => size * 0.8,
            VPos::Center => size * 0.35,
            VPos::Bottom => 0.0,
        };
        // Baseline origin on the canvas, then the same turn on the page.
        let degrees = clockwise_degrees(&style.transform());
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (x, y) = float(pos);
        let origin = self.point((x + along * cos - down * sin, y + along * sin + down * cos));

        self.layer.set_fill_color(color);
        self.layer.begin_text_section();
        self.layer.set_font(&self.font, self.pt(size) as f32);
        self.layer.set_text_matrix(TextMatrix::TranslateRotate(
            origin.x,
            origin.y,
            ((360.0 - degrees) % 360.0) as f32,
        ));
        self.layer.write_text(text, &self.font);
        self.layer.end_text_section();
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> std::result::Result<(u32, u32), DrawingErrorKind<PdfError>> {
        let size = style.size().round() as u32;
        Ok((estimate_text_width_px(text, size), size))
    }
}

impl Drop for PdfBackend<'_> {
    fn drop(&mut self) {
        if self.doc.is_some() && self.present().is_err() {
            log::warn!("pdf document could not be finished");
        }
    }
}

/// Encode the figure as a single-page PDF sized to the canvas.
pub fn encode_pdf(figure: &Figure) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let backend = PdfBackend::with_buffer(
            &mut out,
            (figure.width_px, figure.height_px),
            figure.dpi,
            figure.title.as_deref().unwrap_or("chart"),
        )?;
        let root = backend.into_drawing_area();
        draw_chart(&root, figure, true)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::types::Mark;
    use crate::viz::util::office_color;

    fn figure() -> Figure {
        let mut f = Figure::blank(200, 120);
        f.title = Some("label".into());
        f.marks.push(Mark::Line {
            points: vec![(0.0, 0.0), (1.0, 1.0)],
            color: office_color(0),
            width: 2,
        });
        f
    }

    #[test]
    fn pdf_has_header_and_trailer() {
        let bytes = encode_pdf(&figure()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).into_owned();
        assert!(tail.contains("%%EOF"));
    }

    #[test]
    fn pixels_map_to_flipped_points() {
        let mut out = Vec::new();
        let backend = PdfBackend::with_buffer(&mut out, (200, 100), 100.0, "t").unwrap();
        assert!((backend.pt(50.0) - 36.0).abs() < 1e-9);
        let p = backend.point((0.0, 100.0));
        assert_eq!(p.y, Pt(0.0));
        let top = backend.point((100.0, 0.0));
        assert_eq!(top.x, Pt(72.0));
        assert_eq!(top.y, Pt(72.0));
        assert_eq!(backend.get_size(), (200, 100));
    }

    #[test]
    fn transparent_colors_are_not_painted() {
        let clear = BackendColor {
            alpha: 0.0,
            rgb: (0, 0, 0),
        };
        assert!(pdf_color(clear).is_none());
        let half = BackendColor {
            alpha: 0.5,
            rgb: (0, 0, 0),
        };
        assert!(pdf_color(half).is_some());
    }
}
