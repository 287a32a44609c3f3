//! SVG text and bitmap pixels through the plotters backends.

use std::io::Cursor;

use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use super::chart::draw_chart;
use crate::error::{ChartError, Result};
use crate::viz::Figure;

/// SVG document text. Deterministic for a given figure.
pub fn encode_svg(figure: &Figure) -> Result<Vec<u8>> {
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (figure.width_px, figure.height_px)).into_drawing_area();
        draw_chart(&root, figure, true)?;
    }
    Ok(buf.into_bytes())
}

/// Byte length of a `width` x `height` buffer with `channels` bytes per pixel.
pub fn buffer_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    usize::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(usize::try_from(height).ok()?))
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| ChartError::Encode(format!("a {width}x{height} canvas does not fit in memory")))
}

/// Row-major RGB888 pixels. Text is drawn only when `text` is set.
pub fn rgb_pixels(figure: &Figure, text: bool) -> Result<Vec<u8>> {
    let (w, h) = (figure.width_px, figure.height_px);
    let mut buf = vec![0u8; buffer_len(w, h, 3)?];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw_chart(&root, figure, text)?;
    }
    Ok(buf)
}

/// Expand RGB888 to RGBA8888 with an opaque alpha channel.
pub fn rgb_to_rgba(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks_exact(3)
        .flat_map(|p| [p[0], p[1], p[2], 255])
        .collect()
}

pub fn encode_png(rgb: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ChartError::Encode("pixel buffer does not match the canvas size".into()))?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| ChartError::Encode(e.to_string()))?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figure() -> Figure {
        let mut f = Figure::blank(200, 120);
        f.title = Some("hi".into());
        f
    }

    #[test]
    fn svg_carries_text_and_size() {
        let svg = String::from_utf8(encode_svg(&figure()).unwrap()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"200\""));
        assert!(svg.contains(">\nhi\n</text>"));
    }

    #[test]
    fn bitmap_starts_from_the_background() {
        let rgb = rgb_pixels(&figure(), false).unwrap();
        assert_eq!(rgb.len(), 200 * 120 * 3);
        assert_eq!(&rgb[..3], &[255, 255, 255]);
        let rgba = rgb_to_rgba(&rgb);
        assert_eq!(rgba.len(), 200 * 120 * 4);
        assert_eq!(&rgba[..4], &[255, 255, 255, 255]);
    }

    #[test]
    fn png_has_signature() {
        let rgb = rgb_pixels(&figure(), false).unwrap();
        let png = encode_png(rgb, 200, 120).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert!(encode_png(vec![0; 5], 200, 120).is_err());
    }

    #[test]
    fn oversized_buffers_are_an_error() {
        assert_eq!(buffer_len(200, 120, 3).unwrap(), 72_000);
        assert!(matches!(buffer_len(u32::MAX, u32::MAX, 3), Err(ChartError::Encode(_))));
    }
}
