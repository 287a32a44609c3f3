//! Option resolution: raw, partially-specified [`RenderOptions`] in, a fully
//! populated and validated [`ResolvedConfig`] out.
//!
//! Precedence for every field is *explicit option > chart-type default >
//! global default*. Global defaults live in [`DEFAULTS`], initialized once and
//! never mutated.

use crate::error::{ChartError, Result};
use crate::models::InputTable;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;

/// Supported chart families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    /// One polyline per column (default).
    Line,
    /// Markers only, one color per column.
    Scatter,
    /// Categories on the vertical axis, bars grow to the right.
    HorizontalBar,
    /// Categories on the horizontal axis, bars grow upward.
    VerticalBar,
    /// Columns summed cumulatively in their given order.
    StackedArea,
}

impl ChartType {
    pub const ALL: [ChartType; 5] = [
        ChartType::Line,
        ChartType::Scatter,
        ChartType::HorizontalBar,
        ChartType::VerticalBar,
        ChartType::StackedArea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
            ChartType::Scatter => "scatter",
            ChartType::HorizontalBar => "horizontal_bar",
            ChartType::VerticalBar => "vertical_bar",
            ChartType::StackedArea => "stacked_area",
        }
    }

    /// Bars treat the index as discrete categories.
    pub fn is_bar(&self) -> bool {
        matches!(self, ChartType::HorizontalBar | ChartType::VerticalBar)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = ChartError;

    /// Case-insensitive; `-` and spaces are accepted in place of `_`.
    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ChartType::ALL
            .into_iter()
            .find(|t| t.as_str() == norm)
            .ok_or_else(|| ChartError::validation("type_"))
    }
}

/// Output encodings (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    Png,
    /// Uncompressed RGBA8888 pixels, identical to `Rgba`.
    Raw,
    Rgba,
    Svg,
    /// Gzip-compressed SVG.
    Svgz,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Pdf,
        OutputFormat::Png,
        OutputFormat::Raw,
        OutputFormat::Rgba,
        OutputFormat::Svg,
        OutputFormat::Svgz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Raw => "raw",
            OutputFormat::Rgba => "rgba",
            OutputFormat::Svg => "svg",
            OutputFormat::Svgz => "svgz",
        }
    }

    /// Look the file suffix up in the process-wide suffix table.
    pub fn from_path(path: &Path) -> Option<OutputFormat> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        DEFAULTS
            .suffixes
            .iter()
            .find(|(suffix, _)| *suffix == ext)
            .map(|(_, fmt)| *fmt)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        let norm = s.trim().trim_start_matches('.').to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == norm)
            .ok_or_else(|| ChartError::validation("format"))
    }
}

/// Largest canvas, in pixels, a figure may resolve to.
pub const MAX_PIXELS: u64 = 1 << 28;

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Pixel dimensions at the given resolution (at least 1×1).
    pub fn pixels(&self, dpi: f64) -> (u32, u32) {
        let w = (self.width * dpi).round().max(1.0) as u32;
        let h = (self.height * dpi).round().max(1.0) as u32;
        (w, h)
    }

    /// Pixel dimensions, or `None` when the canvas would exceed [`MAX_PIXELS`].
    pub fn checked_pixels(&self, dpi: f64) -> Option<(u32, u32)> {
        let side = |inches: f64| {
            let px = (inches * dpi).round().max(1.0);
            (px <= f64::from(u32::MAX)).then_some(px as u32)
        };
        let (w, h) = (side(self.width)?, side(self.height)?);
        let total = u64::from(w).checked_mul(u64::from(h))?;
        (total <= MAX_PIXELS).then_some((w, h))
    }
}

impl FromStr for Size {
    type Err = ChartError;

    /// Accepts `WxH`, `W,H`, or `W H` (e.g. `11x7`).
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(['x', 'X', ',', ' '])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let [w, h] = parts.as_slice() else {
            return Err(ChartError::validation("size"));
        };
        let w: f64 = w.parse().map_err(|_| ChartError::validation("size"))?;
        let h: f64 = h.parse().map_err(|_| ChartError::validation("size"))?;
        Ok(Size::new(w, h))
    }
}

/// Explicit bounds for one axis; a `None` side auto-scales from the data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisBounds {
    fn resolve(min: Option<f64>, max: Option<f64>) -> Result<Self> {
        let finite = |v: Option<f64>| v.is_none_or(f64::is_finite);
        if !finite(min) || !finite(max) {
            return Err(ChartError::validation("axis-range"));
        }
        if let (Some(lo), Some(hi)) = (min, max)
            && lo >= hi
        {
            return Err(ChartError::validation("axis-range"));
        }
        Ok(Self { min, max })
    }

    pub fn is_auto(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Combine with an automatic range. When only one side is explicit and the
    /// automatic side would not lie beyond it, the open side is pushed one span
    /// (or 1.0) past the explicit one.
    pub fn apply(&self, auto: (f64, f64)) -> (f64, f64) {
        let span = (auto.1 - auto.0).abs();
        let step = if span > 0.0 { span } else { 1.0 };
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => (lo, hi),
            (Some(lo), None) if auto.1 > lo => (lo, auto.1),
            (Some(lo), None) => (lo, lo + step),
            (None, Some(hi)) if auto.0 < hi => (auto.0, hi),
            (None, Some(hi)) => (hi - step, hi),
            (None, None) => auto,
        }
    }
}

/// Raw, caller-supplied options. Every field is optional.
///
/// Deserializes from JSON; unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Chart type name, e.g. `"line"` or `"stacked_area"`.
    #[serde(alias = "type", alias = "kind")]
    pub type_: Option<String>,
    pub title: Option<String>,
    pub outfile: Option<PathBuf>,
    /// Output format name; inferred from `outfile` when absent.
    pub format: Option<String>,
    /// Width and height in inches.
    pub size: Option<Size>,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    /// Source note printed in the lower right corner. Unset, the note is
    /// the product credit.
    pub source: Option<String>,
    /// Draw axis lines and tick marks.
    pub spines: bool,
    /// Gridlines on the category/index axis too (the value axis always has them).
    pub grid: bool,
    /// Tick positions on a numeric x axis.
    pub xtick_loc: Option<Vec<f64>>,
    /// Tick text, in order: replaces category labels or names `xtick_loc`.
    pub xticklabels: Option<Vec<String>>,
    pub ytick_loc: Option<Vec<f64>>,
    pub yticklabels: Option<Vec<String>>,
    /// X tick label rotation in degrees, counter-clockwise; applied in quarter turns.
    pub rot: Option<f64>,
    /// Print each bar's value at its end.
    pub label_bars: bool,
    /// Name each line at its last point instead of using a legend.
    pub label_lines: bool,
    /// Name each stacked band inside the band instead of using a legend.
    pub label_area: bool,
    pub xlabel_off: bool,
    pub ylabel_off: bool,
    /// Print numeric x ticks as plain years (no separators).
    pub xyear: bool,
    pub yyear: bool,
    pub dpi: Option<f64>,
    /// TTF font used for text in raster outputs.
    pub font: Option<PathBuf>,
}

impl RenderOptions {
    /// Layer `overrides` on top of `self`: set fields in `overrides` win.
    pub fn merged_with(self, overrides: RenderOptions) -> RenderOptions {
        RenderOptions {
            type_: overrides.type_.or(self.type_),
            title: overrides.title.or(self.title),
            outfile: overrides.outfile.or(self.outfile),
            format: overrides.format.or(self.format),
            size: overrides.size.or(self.size),
            xmin: overrides.xmin.or(self.xmin),
            xmax: overrides.xmax.or(self.xmax),
            ymin: overrides.ymin.or(self.ymin),
            ymax: overrides.ymax.or(self.ymax),
            xlabel: overrides.xlabel.or(self.xlabel),
            ylabel: overrides.ylabel.or(self.ylabel),
            source: overrides.source.or(self.source),
            spines: overrides.spines || self.spines,
            grid: overrides.grid || self.grid,
            xtick_loc: overrides.xtick_loc.or(self.xtick_loc),
            xticklabels: overrides.xticklabels.or(self.xticklabels),
            ytick_loc: overrides.ytick_loc.or(self.ytick_loc),
            yticklabels: overrides.yticklabels.or(self.yticklabels),
            rot: overrides.rot.or(self.rot),
            label_bars: overrides.label_bars || self.label_bars,
            label_lines: overrides.label_lines || self.label_lines,
            label_area: overrides.label_area || self.label_area,
            xlabel_off: overrides.xlabel_off || self.xlabel_off,
            ylabel_off: overrides.ylabel_off || self.ylabel_off,
            xyear: overrides.xyear || self.xyear,
            yyear: overrides.yyear || self.yyear,
            dpi: overrides.dpi.or(self.dpi),
            font: overrides.font.or(self.font),
        }
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<RenderOptions> {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| ChartError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Process-wide defaults.
#[derive(Debug)]
pub struct Defaults {
    pub chart_type: ChartType,
    pub size: Size,
    pub dpi: f64,
    /// Used only when neither a format nor an output path is given.
    pub format: OutputFormat,
    pub suffixes: &'static [(&'static str, OutputFormat)],
    /// Source note when none is given.
    pub credit: &'static str,
}

pub static DEFAULTS: LazyLock<Defaults> = LazyLock::new(|| Defaults {
    chart_type: ChartType::Line,
    size: Size::new(11.0, 7.0),
    dpi: 100.0,
    format: OutputFormat::Png,
    suffixes: &[
        ("pdf", OutputFormat::Pdf),
        ("png", OutputFormat::Png),
        ("raw", OutputFormat::Raw),
        ("rgba", OutputFormat::Rgba),
        ("svg", OutputFormat::Svg),
        ("svgz", OutputFormat::Svgz),
    ],
    credit: "Produced with Bluesteel Graphics\u{2122}.",
});

/// Fully resolved rendering parameters. Only [`resolve`] constructs one.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    chart_type: ChartType,
    format: OutputFormat,
    size: Size,
    dpi: f64,
    title: Option<String>,
    xlabel: Option<String>,
    ylabel: Option<String>,
    source: String,
    x_bounds: AxisBounds,
    y_bounds: AxisBounds,
    xyear: bool,
    yyear: bool,
    spines: bool,
    grid: bool,
    x_ticks: TickOverride,
    y_ticks: TickOverride,
    rot: Option<f64>,
    label_bars: bool,
    label_lines: bool,
    label_area: bool,
    font: Option<PathBuf>,
}

/// Caller-chosen tick positions and/or labels for one axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOverride {
    pub loc: Option<Vec<f64>>,
    pub labels: Option<Vec<String>>,
}

impl TickOverride {
    fn resolve(loc: &Option<Vec<f64>>, labels: &Option<Vec<String>>, field: &str) -> Result<Self> {
        if let Some(loc) = loc
            && loc.iter().any(|v| !v.is_finite())
        {
            return Err(ChartError::validation(field));
        }
        Ok(Self {
            loc: loc.clone().filter(|l| !l.is_empty()),
            labels: labels.clone().filter(|l| !l.is_empty()),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.loc.is_none() && self.labels.is_none()
    }
}

impl ResolvedConfig {
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }
    pub fn format(&self) -> OutputFormat {
        self.format
    }
    pub fn size(&self) -> Size {
        self.size
    }
    pub fn dpi(&self) -> f64 {
        self.dpi
    }
    /// Pixel dimensions of the figure.
    pub fn pixels(&self) -> (u32, u32) {
        self.size.pixels(self.dpi)
    }
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
    pub fn xlabel(&self) -> Option<&str> {
        self.xlabel.as_deref()
    }
    pub fn ylabel(&self) -> Option<&str> {
        self.ylabel.as_deref()
    }
    /// The source note; the product credit unless one was given.
    pub fn source(&self) -> &str {
        &self.source
    }
    pub fn x_bounds(&self) -> AxisBounds {
        self.x_bounds
    }
    pub fn y_bounds(&self) -> AxisBounds {
        self.y_bounds
    }
    pub fn xyear(&self) -> bool {
        self.xyear
    }
    pub fn yyear(&self) -> bool {
        self.yyear
    }
    pub fn spines(&self) -> bool {
        self.spines
    }
    pub fn grid(&self) -> bool {
        self.grid
    }
    pub fn x_ticks(&self) -> &TickOverride {
        &self.x_ticks
    }
    pub fn y_ticks(&self) -> &TickOverride {
        &self.y_ticks
    }
    /// X tick label rotation in degrees.
    pub fn rot(&self) -> Option<f64> {
        self.rot
    }
    pub fn label_bars(&self) -> bool {
        self.label_bars
    }
    pub fn label_lines(&self) -> bool {
        self.label_lines
    }
    pub fn label_area(&self) -> bool {
        self.label_area
    }
    pub fn font(&self) -> Option<&Path> {
        self.font.as_deref()
    }
}

fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_ref().filter(|s| !s.trim().is_empty()).cloned()
}

/// Resolve raw options against the table into a validated configuration.
///
/// ### Errors
/// `ChartError::Validation` naming the field: `type_`, `format`, `size`,
/// `dpi`, `axis-range`, `xtick_loc`, `ytick_loc` or `rot`. A size whose
/// canvas exceeds [`MAX_PIXELS`] at the chosen dpi fails on `size`.
pub fn resolve(table: &InputTable, options: &RenderOptions) -> Result<ResolvedConfig> {
    let chart_type = match options.type_.as_deref() {
        Some(raw) => raw.parse::<ChartType>()?,
        None => DEFAULTS.chart_type,
    };

    let format = resolve_format(options.format.as_deref(), options.outfile.as_deref())?;

    let size = options.size.unwrap_or(DEFAULTS.size);
    if !size.is_valid() {
        return Err(ChartError::validation("size"));
    }
    let dpi = options.dpi.unwrap_or(DEFAULTS.dpi);
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(ChartError::validation("dpi"));
    }
    if size.checked_pixels(dpi).is_none() {
        return Err(ChartError::validation("size"));
    }

    let x_bounds = AxisBounds::resolve(options.xmin, options.xmax)?;
    let y_bounds = AxisBounds::resolve(options.ymin, options.ymax)?;

    let x_ticks = TickOverride::resolve(&options.xtick_loc, &options.xticklabels, "xtick_loc")?;
    let y_ticks = TickOverride::resolve(&options.ytick_loc, &options.yticklabels, "ytick_loc")?;
    if options.rot.is_some_and(|r| !r.is_finite()) {
        return Err(ChartError::validation("rot"));
    }

    // Labels default to the table's own names: the index header names the
    // index axis and, with a single series, that column's name the value axis.
    // Horizontal bars put the index on the vertical axis.
    let index_name = table.index_name().map(str::to_string);
    let series_name = {
        let mut usable = table.usable_columns();
        match (usable.next(), usable.next()) {
            (Some(only), None) => Some(only.name.clone()),
            _ => None,
        }
    };
    let (x_default, y_default) = match chart_type {
        ChartType::HorizontalBar => (series_name, index_name),
        _ => (index_name, series_name),
    };
    let xlabel = if options.xlabel_off {
        None
    } else {
        non_empty(&options.xlabel).or(x_default)
    };
    let ylabel = if options.ylabel_off {
        None
    } else {
        non_empty(&options.ylabel).or(y_default)
    };

    let config = ResolvedConfig {
        chart_type,
        format,
        size,
        dpi,
        title: non_empty(&options.title),
        xlabel,
        ylabel,
        source: non_empty(&options.source).unwrap_or_else(|| DEFAULTS.credit.to_string()),
        x_bounds,
        y_bounds,
        xyear: options.xyear,
        yyear: options.yyear,
        spines: options.spines,
        grid: options.grid,
        x_ticks,
        y_ticks,
        rot: options.rot,
        label_bars: options.label_bars,
        label_lines: options.label_lines,
        label_area: options.label_area,
        font: options.font.clone(),
    };
    debug!(
        "resolved {} chart: format={} size={}x{}in dpi={}",
        config.chart_type, config.format, size.width, size.height, dpi
    );
    Ok(config)
}

/// Explicit format wins; otherwise infer from the outfile suffix; with no
/// outfile at all, use the global default.
fn resolve_format(explicit: Option<&str>, outfile: Option<&Path>) -> Result<OutputFormat> {
    let inferred = outfile.and_then(OutputFormat::from_path);
    match (explicit, outfile) {
        (Some(raw), _) => {
            let fmt = raw.parse::<OutputFormat>()?;
            if let Some(other) = inferred
                && other != fmt
            {
                warn!(
                    "--format {fmt} overrides the .{other} suffix of {}",
                    outfile.map(Path::display).map(|d| d.to_string()).unwrap_or_default()
                );
            }
            Ok(fmt)
        }
        (None, Some(_)) => inferred.ok_or_else(|| ChartError::validation("format")),
        (None, None) => Ok(DEFAULTS.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> InputTable {
        InputTable::numeric(
            Some("year"),
            &[2000.0, 2001.0, 2002.0],
            vec![("gdp", vec![1.0, 2.0, 3.0])],
        )
        .unwrap()
    }

    fn opts() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn unset_type_defaults_to_line() {
        let cfg = resolve(&table(), &opts()).unwrap();
        assert_eq!(cfg.chart_type(), ChartType::Line);
    }

    #[test]
    fn chart_type_names_are_case_insensitive() {
        assert_eq!("Line".parse::<ChartType>().unwrap(), ChartType::Line);
        assert_eq!(
            "stacked-area".parse::<ChartType>().unwrap(),
            ChartType::StackedArea
        );
        for t in ChartType::ALL {
            assert_eq!(t.as_str().parse::<ChartType>().unwrap(), t);
        }
    }

    #[test]
    fn unknown_type_names_the_type_field() {
        let o = RenderOptions {
            type_: Some("pie".into()),
            ..opts()
        };
        let err = resolve(&table(), &o).unwrap_err();
        assert_eq!(err.field(), Some("type_"));
    }

    #[test]
    fn inverted_or_equal_ranges_fail() {
        for (lo, hi) in [(5.0, 1.0), (3.0, 3.0)] {
            let x = RenderOptions {
                xmin: Some(lo),
                xmax: Some(hi),
                ..opts()
            };
            let y = RenderOptions {
                ymin: Some(lo),
                ymax: Some(hi),
                ..opts()
            };
            assert_eq!(resolve(&table(), &x).unwrap_err().field(), Some("axis-range"));
            assert_eq!(resolve(&table(), &y).unwrap_err().field(), Some("axis-range"));
        }
        let nan = RenderOptions {
            ymin: Some(f64::NAN),
            ..opts()
        };
        assert_eq!(resolve(&table(), &nan).unwrap_err().field(), Some("axis-range"));
    }

    #[test]
    fn one_sided_bounds_are_kept() {
        let o = RenderOptions {
            ymin: Some(1.0),
            ..opts()
        };
        let cfg = resolve(&table(), &o).unwrap();
        assert_eq!(cfg.y_bounds(), AxisBounds { min: Some(1.0), max: None });
        assert!(cfg.x_bounds().is_auto());
    }

    #[test]
    fn suffix_inference_matches_explicit_format() {
        for fmt in OutputFormat::ALL {
            let by_suffix = RenderOptions {
                outfile: Some(PathBuf::from(format!("out/chart.{fmt}"))),
                ..opts()
            };
            let explicit = RenderOptions {
                format: Some(fmt.as_str().into()),
                ..opts()
            };
            let a = resolve(&table(), &by_suffix).unwrap();
            let b = resolve(&table(), &explicit).unwrap();
            assert_eq!(a.format(), fmt);
            assert_eq!(a.format(), b.format());
        }
    }

    #[test]
    fn unknown_or_missing_suffix_fails_on_format() {
        for name in ["chart.jpg", "chart"] {
            let o = RenderOptions {
                outfile: Some(PathBuf::from(name)),
                ..opts()
            };
            assert_eq!(resolve(&table(), &o).unwrap_err().field(), Some("format"));
        }
        let bad = RenderOptions {
            format: Some("gif".into()),
            ..opts()
        };
        assert_eq!(resolve(&table(), &bad).unwrap_err().field(), Some("format"));
    }

    #[test]
    fn explicit_format_wins_over_suffix() {
        let o = RenderOptions {
            outfile: Some(PathBuf::from("chart.png")),
            format: Some("svg".into()),
            ..opts()
        };
        assert_eq!(resolve(&table(), &o).unwrap().format(), OutputFormat::Svg);
    }

    #[test]
    fn no_outfile_and_no_format_uses_default() {
        assert_eq!(resolve(&table(), &opts()).unwrap().format(), OutputFormat::Png);
    }

    #[test]
    fn size_defaults_and_validation() {
        let cfg = resolve(&table(), &opts()).unwrap();
        assert_eq!(cfg.size(), Size::new(11.0, 7.0));
        assert_eq!(cfg.pixels(), (1100, 700));

        for bad in [Size::new(0.0, 7.0), Size::new(11.0, -1.0), Size::new(f64::INFINITY, 1.0)] {
            let o = RenderOptions {
                size: Some(bad),
                ..opts()
            };
            assert_eq!(resolve(&table(), &o).unwrap_err().field(), Some("size"));
        }
        let o = RenderOptions {
            dpi: Some(0.0),
            ..opts()
        };
        assert_eq!(resolve(&table(), &o).unwrap_err().field(), Some("dpi"));
    }

    #[test]
    fn oversized_canvases_fail_on_size() {
        for (size, dpi) in [
            (Size::new(1e8, 1e8), None),
            (Size::new(200.0, 200.0), None),
            (Size::new(11.0, 7.0), Some(1e9)),
        ] {
            let o = RenderOptions {
                size: Some(size),
                dpi,
                ..opts()
            };
            assert_eq!(resolve(&table(), &o).unwrap_err().field(), Some("size"));
        }
        assert_eq!(Size::new(1e8, 1e8).checked_pixels(100.0), None);
        assert_eq!(Size::new(100.0, 100.0).checked_pixels(100.0), Some((10_000, 10_000)));
    }

    #[test]
    fn size_parses_common_spellings() {
        assert_eq!("11x7".parse::<Size>().unwrap(), Size::new(11.0, 7.0));
        assert_eq!("8.5, 4".parse::<Size>().unwrap(), Size::new(8.5, 4.0));
        assert!("11".parse::<Size>().is_err());
        assert!("axb".parse::<Size>().is_err());
    }

    #[test]
    fn labels_default_to_table_names() {
        let cfg = resolve(&table(), &opts()).unwrap();
        assert_eq!(cfg.xlabel(), Some("year"));
        assert_eq!(cfg.ylabel(), Some("gdp"));

        let off = RenderOptions {
            xlabel_off: true,
            ylabel: Some("custom".into()),
            ..opts()
        };
        let cfg = resolve(&table(), &off).unwrap();
        assert_eq!(cfg.xlabel(), None);
        assert_eq!(cfg.ylabel(), Some("custom"));
    }

    #[test]
    fn horizontal_bars_put_the_index_name_on_y() {
        let o = RenderOptions {
            type_: Some("horizontal_bar".into()),
            ..opts()
        };
        let cfg = resolve(&table(), &o).unwrap();
        assert_eq!(cfg.xlabel(), Some("gdp"));
        assert_eq!(cfg.ylabel(), Some("year"));

        let explicit = RenderOptions {
            xlabel: Some("growth".into()),
            ..o
        };
        assert_eq!(resolve(&table(), &explicit).unwrap().xlabel(), Some("growth"));
    }

    #[test]
    fn missing_source_becomes_the_credit() {
        let cfg = resolve(&table(), &opts()).unwrap();
        assert_eq!(cfg.source(), "Produced with Bluesteel Graphics\u{2122}.");
        let blank = RenderOptions {
            source: Some("  ".into()),
            ..opts()
        };
        assert_eq!(resolve(&table(), &blank).unwrap().source(), DEFAULTS.credit);
        let given = RenderOptions {
            source: Some("Source: RegData".into()),
            ..opts()
        };
        assert_eq!(resolve(&table(), &given).unwrap().source(), "Source: RegData");
    }

    #[test]
    fn tick_overrides_are_validated() {
        let o = RenderOptions {
            xtick_loc: Some(vec![1990.0, 2000.0]),
            xticklabels: Some(vec!["a".into(), "b".into()]),
            yticklabels: Some(vec![]),
            rot: Some(90.0),
            spines: true,
            ..opts()
        };
        let cfg = resolve(&table(), &o).unwrap();
        assert_eq!(cfg.x_ticks().loc.as_deref(), Some(&[1990.0, 2000.0][..]));
        assert!(cfg.y_ticks().is_empty());
        assert_eq!(cfg.rot(), Some(90.0));
        assert!(cfg.spines());

        let bad = RenderOptions {
            ytick_loc: Some(vec![1.0, f64::NAN]),
            ..opts()
        };
        assert_eq!(resolve(&table(), &bad).unwrap_err().field(), Some("ytick_loc"));
        let bad = RenderOptions {
            rot: Some(f64::INFINITY),
            ..opts()
        };
        assert_eq!(resolve(&table(), &bad).unwrap_err().field(), Some("rot"));
    }

    #[test]
    fn bounds_apply_to_auto_ranges() {
        let b = AxisBounds { min: Some(1.0), max: None };
        assert_eq!(b.apply((0.0, 10.0)), (1.0, 10.0));
        assert_eq!(b.apply((-5.0, 0.0)), (1.0, 6.0));
        let b = AxisBounds { min: None, max: Some(0.0) };
        assert_eq!(b.apply((2.0, 2.0)), (-1.0, 0.0));
        assert_eq!(AxisBounds::default().apply((3.0, 4.0)), (3.0, 4.0));
    }

    #[test]
    fn json_options_reject_unknown_keys() {
        let ok: RenderOptions =
            serde_json::from_str(r#"{"type": "scatter", "ymin": 1, "size": {"width": 4, "height": 3}}"#)
                .unwrap();
        assert_eq!(ok.type_.as_deref(), Some("scatter"));
        assert_eq!(ok.size, Some(Size::new(4.0, 3.0)));
        assert!(serde_json::from_str::<RenderOptions>(r#"{"fake_param": true}"#).is_err());
        let ticks: RenderOptions =
            serde_json::from_str(r#"{"xtick_loc": [1980, 1990], "xticklabels": ["hi", "hello"], "grid": true}"#)
                .unwrap();
        assert_eq!(ticks.xtick_loc, Some(vec![1980.0, 1990.0]));
        assert!(ticks.grid);
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = RenderOptions {
            title: Some("base".into()),
            ymin: Some(1.0),
            ..opts()
        };
        let over = RenderOptions {
            title: Some("flag".into()),
            xyear: true,
            xtick_loc: Some(vec![1.0]),
            label_bars: true,
            ..opts()
        };
        let m = base.merged_with(over);
        assert_eq!(m.title.as_deref(), Some("flag"));
        assert_eq!(m.ymin, Some(1.0));
        assert!(m.xyear);
        assert!(m.label_bars);
        assert_eq!(m.xtick_loc, Some(vec![1.0]));
    }
}
