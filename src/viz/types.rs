//! The in-memory figure: a retained scene in data coordinates.

use plotters::style::RGBColor;

/// How an axis chooses its range when no explicit bound is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoScale {
    /// Exactly the data extent.
    Tight,
    /// Data extent widened by this fraction of the span on both sides.
    Padded(f64),
    /// Like `Padded`, but the range always contains zero (value axes of bars/areas).
    PaddedWithZero(f64),
    /// A range decided by the strategy (category slots).
    Fixed(f64, f64),
}

/// Tick labeling for one axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Ticks {
    /// Nice numeric ticks; `year` prints them as plain integers.
    Numeric { year: bool },
    /// Fixed positions with text labels (categories, in data coordinates).
    Categories(Vec<(f64, String)>),
    /// Caller-chosen positions on a numeric axis.
    Fixed(Vec<(f64, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: Option<String>,
    pub autoscale: AutoScale,
    pub ticks: Ticks,
    /// Final `(min, max)`; set by the renderer after the series are drawn.
    pub range: (f64, f64),
    /// Gridlines at every tick.
    pub grid: bool,
    /// Tick label rotation in counter-clockwise quarter turns (0..=3).
    pub tick_turns: u8,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            label: None,
            autoscale: AutoScale::Padded(0.05),
            ticks: Ticks::Numeric { year: false },
            range: (0.0, 1.0),
            grid: false,
            tick_turns: 0,
        }
    }
}

/// A piece of series geometry in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    /// Connected polyline.
    Line {
        points: Vec<(f64, f64)>,
        color: RGBColor,
        width: u32,
    },
    /// Unconnected markers.
    Points {
        points: Vec<(f64, f64)>,
        color: RGBColor,
        radius: u32,
    },
    /// Axis-aligned filled rectangle between two corners.
    Bar {
        from: (f64, f64),
        to: (f64, f64),
        color: RGBColor,
    },
    /// Filled region between two boundaries sharing the same x positions.
    Band {
        lower: Vec<(f64, f64)>,
        upper: Vec<(f64, f64)>,
        color: RGBColor,
    },
}

impl Mark {
    /// Every data-space vertex of the mark.
    pub fn vertices(&self) -> Box<dyn Iterator<Item = (f64, f64)> + '_> {
        match self {
            Mark::Line { points, .. } | Mark::Points { points, .. } => {
                Box::new(points.iter().copied())
            }
            Mark::Bar { from, to, .. } => Box::new([*from, *to].into_iter()),
            Mark::Band { lower, upper, .. } => Box::new(lower.iter().chain(upper).copied()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: RGBColor,
}

/// Where a text annotation sits relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Above,
    Right,
    Center,
}

/// Text attached to a data point (bar values, line and area names).
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub at: (f64, f64),
    pub text: String,
    pub placement: Placement,
    pub color: RGBColor,
}

/// A rendered chart prior to encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width_px: u32,
    pub height_px: u32,
    /// Pixels per inch; scales text and converts to physical units.
    pub dpi: f64,
    pub title: Option<String>,
    pub source: Option<String>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub marks: Vec<Mark>,
    pub legend: Vec<LegendEntry>,
    pub annotations: Vec<Annotation>,
    /// Draw the axis lines and tick marks.
    pub spines: bool,
    /// TTF to register for raster text, carried from the configuration.
    pub font: Option<std::path::PathBuf>,
}

impl Figure {
    /// An empty canvas of the given pixel size.
    pub fn blank(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            dpi: 100.0,
            title: None,
            source: None,
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            marks: Vec::new(),
            legend: Vec::new(),
            annotations: Vec::new(),
            spines: false,
            font: None,
        }
    }

    /// Bounding box `((xmin, xmax), (ymin, ymax))` over all marks.
    pub fn data_extent(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut it = self
            .marks
            .iter()
            .flat_map(Mark::vertices)
            .filter(|(x, y)| x.is_finite() && y.is_finite());
        let (x0, y0) = it.next()?;
        let init = ((x0, x0), (y0, y0));
        Some(it.fold(init, |((xl, xh), (yl, yh)), (x, y)| {
            ((xl.min(x), xh.max(x)), (yl.min(y), yh.max(y)))
        }))
    }
}
