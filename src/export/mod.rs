//! Export adapter: encode a [`Figure`] into one of the supported output formats
//! and write it out.
//!
//! Every format is drawn by the same generic [`chart::draw_chart`] routine on a
//! different plotters backend:
//! - `svg` / `svgz` through the SVG backend (gzip for `svgz`)
//! - `png`, `raw`, `rgba` through the bitmap backend
//! - `pdf` through [`pdf::PdfBackend`]

pub mod chart;
pub mod clip;
pub mod fonts;
pub mod pdf;
pub mod raster;

use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use log::{debug, info};

use crate::error::Result;
use crate::options::OutputFormat;
use crate::viz::Figure;

/// Encode a figure fully in memory.
pub fn encode(figure: &Figure, format: OutputFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        OutputFormat::Svg => raster::encode_svg(figure)?,
        OutputFormat::Svgz => gzip(&raster::encode_svg(figure)?)?,
        OutputFormat::Png => {
            let rgb = raster::rgb_pixels(figure, fonts::ensure_registered(figure.font.as_deref()))?;
            raster::encode_png(rgb, figure.width_px, figure.height_px)?
        }
        OutputFormat::Raw | OutputFormat::Rgba => {
            let rgb = raster::rgb_pixels(figure, fonts::ensure_registered(figure.font.as_deref()))?;
            raster::rgb_to_rgba(&rgb)
        }
        OutputFormat::Pdf => pdf::encode_pdf(figure)?,
    };
    debug!(
        "encoded {}x{} figure as {} ({} bytes)",
        figure.width_px,
        figure.height_px,
        format,
        bytes.len()
    );
    Ok(bytes)
}

/// Encode `figure` and write it to `destination`.
///
/// `format` is checked again here because the exporter may be called directly.
///
/// ### Errors
/// `ChartError::Validation("format")` for an unsupported format name; write
/// failures come back unchanged as `ChartError::Io`.
pub fn export(figure: &Figure, destination: &Path, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    // Encode completely before touching the destination.
    let bytes = encode(figure, format)?;
    std::fs::write(destination, &bytes)?;
    info!("wrote {} ({} bytes)", destination.display(), bytes.len());
    Ok(())
}

fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(bytes)?;
    Ok(enc.finish()?)
}
