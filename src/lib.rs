//! bluesteel_graphics
//!
//! Turn indexed tabular data into publication-style charts. Pairs with the
//! `bluesteel` CLI.
//!
//! ### Features
//! - Line, scatter, horizontal/vertical bar, and stacked area charts
//! - One series per column, with a legend when there is more than one
//! - Explicit axis bounds, labels, title, and source note
//! - Custom tick positions and labels, rotated x labels, spines and gridlines
//! - Direct labels on bars, line ends and stacked bands
//! - Output as PNG, SVG, SVGZ, PDF, or raw RGBA pixels
//! - CSV and Excel input
//!
//! ### Example
//! ```no_run
//! use bluesteel_graphics::{RenderOptions, save_fig, storage};
//!
//! let table = storage::load_table("regulation.csv")?;
//! let options = RenderOptions {
//!     type_: Some("stacked_area".into()),
//!     title: Some("Accumulation of Federal Regulation, 1970-2016".into()),
//!     outfile: Some("regulation.svg".into()),
//!     ..Default::default()
//! };
//! let written = save_fig(&table, &options)?;
//! println!("wrote {}", written.display());
//! # Ok::<(), bluesteel_graphics::ChartError>(())
//! ```

pub mod error;
pub mod export;
pub mod models;
pub mod options;
pub mod storage;
pub mod viz;

pub use error::{ChartError, Result};
pub use models::{Column, IndexValue, InputTable};
pub use options::{ChartType, OutputFormat, RenderOptions, ResolvedConfig, Size, TickOverride, resolve};
pub use viz::{Figure, render};

use std::path::PathBuf;

/// Resolve `options` and render the chart into an in-memory [`Figure`].
pub fn create_figure(table: &InputTable, options: &RenderOptions) -> Result<Figure> {
    let config = resolve(table, options)?;
    render(table, &config)
}

/// Render and encode the chart; returns the bytes of the resolved format.
pub fn create_image(table: &InputTable, options: &RenderOptions) -> Result<Vec<u8>> {
    let config = resolve(table, options)?;
    let figure = render(table, &config)?;
    export::encode(&figure, config.format())
}

/// Render the chart and write it to `options.outfile`.
///
/// ### Errors
/// `ChartError::Validation("outfile")` when no output path is given.
pub fn save_fig(table: &InputTable, options: &RenderOptions) -> Result<PathBuf> {
    let outfile = options
        .outfile
        .clone()
        .ok_or_else(|| ChartError::validation("outfile"))?;
    let config = resolve(table, options)?;
    let figure = render(table, &config)?;
    export::export(&figure, &outfile, config.format().as_str())?;
    Ok(outfile)
}
