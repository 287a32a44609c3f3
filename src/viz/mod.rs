//! Chart rendering: turn an [`InputTable`] and a [`ResolvedConfig`] into a
//! [`Figure`].
//!
//! - One drawing strategy per chart type ([`registry`])
//! - Shared concerns (title, axis labels, explicit bounds) applied afterwards, the same way for every type
//! - Output encoding lives in [`crate::export`]; nothing here touches a backend

pub mod registry;
pub mod text;
pub mod types;
pub mod util;

pub use registry::{SeriesStrategy, strategy_for};
pub use types::{Annotation, AutoScale, Axis, Figure, LegendEntry, Mark, Placement, Ticks};

use crate::error::{ChartError, Result};
use crate::models::InputTable;
use crate::options::{AxisBounds, ChartType, ResolvedConfig, TickOverride};
use log::{debug, warn};

use util::{format_tick, format_title, nice_ticks};

/// Render a chart into an in-memory figure.
///
/// ### Errors
/// `ChartError::Render("empty-data")` when the table has no rows or no column
/// holding at least one number.
pub fn render(table: &InputTable, config: &ResolvedConfig) -> Result<Figure> {
    if table.is_empty() || table.usable_columns().next().is_none() {
        return Err(ChartError::render("empty-data"));
    }

    let (width, height) = config.pixels();
    let mut figure = Figure::blank(width, height);
    figure.dpi = config.dpi();
    figure.font = config.font().map(|p| p.to_path_buf());

    strategy_for(config.chart_type()).draw(table, config, &mut figure)?;

    // A single series needs no legend.
    if figure.legend.len() < 2 {
        figure.legend.clear();
    }

    figure.title = config.title().map(format_title);
    figure.source = Some(format_title(config.source()));
    figure.spines = config.spines();
    figure.x_axis.label = config.xlabel().map(str::to_string);
    figure.y_axis.label = config.ylabel().map(str::to_string);
    if let Ticks::Numeric { year } = &mut figure.x_axis.ticks {
        *year = config.xyear();
    }
    if let Ticks::Numeric { year } = &mut figure.y_axis.ticks {
        *year = config.yyear();
    }

    let extent = figure.data_extent();
    figure.x_axis.range = axis_range(
        figure.x_axis.autoscale,
        extent.map(|e| e.0),
        config.x_bounds(),
    );
    figure.y_axis.range = axis_range(
        figure.y_axis.autoscale,
        extent.map(|e| e.1),
        config.y_bounds(),
    );

    // The value axis always carries gridlines; `grid` adds the other one.
    let (value_axis, index_axis) = match config.chart_type() {
        ChartType::HorizontalBar => (&mut figure.x_axis, &mut figure.y_axis),
        _ => (&mut figure.y_axis, &mut figure.x_axis),
    };
    value_axis.grid = true;
    index_axis.grid = config.grid();

    override_ticks(&mut figure.x_axis, config.x_ticks(), "x");
    override_ticks(&mut figure.y_axis, config.y_ticks(), "y");
    if let Some(rot) = config.rot() {
        figure.x_axis.tick_turns = quarter_turns(rot);
    }

    debug!(
        "rendered {} chart: {} marks, x={:?} y={:?}",
        config.chart_type(),
        figure.marks.len(),
        figure.x_axis.range,
        figure.y_axis.range
    );
    Ok(figure)
}

/// Apply caller-chosen ticks. Category labels are replaced in order; numeric
/// axes get fixed positions, labelled by the caller or like automatic ticks.
fn override_ticks(axis: &mut Axis, custom: &TickOverride, name: &str) {
    if custom.is_empty() {
        return;
    }
    let year = match &axis.ticks {
        Ticks::Categories(categories) => {
            if custom.loc.is_some() {
                warn!("{name}tick_loc is ignored on a category axis");
            }
            if let Some(labels) = &custom.labels {
                let relabelled = relabel(categories.iter().map(|c| c.0), labels, name);
                axis.ticks = Ticks::Categories(relabelled);
            }
            return;
        }
        Ticks::Numeric { year } => *year,
        Ticks::Fixed(_) => false,
    };
    let positions = match (&custom.loc, &custom.labels) {
        (Some(loc), _) => loc.clone(),
        (None, Some(labels)) => nice_ticks(axis.range.0, axis.range.1, labels.len()),
        (None, None) => return,
    };
    let ticks = match &custom.labels {
        Some(labels) => relabel(positions.into_iter(), labels, name),
        None => {
            let top = positions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mut sorted = positions.clone();
            sorted.sort_by(f64::total_cmp);
            let step = sorted
                .windows(2)
                .map(|w| w[1] - w[0])
                .filter(|d| *d > 0.0)
                .fold(f64::INFINITY, f64::min);
            let step = if step.is_finite() { step } else { top.abs().max(1.0) };
            positions
                .into_iter()
                .map(|v| (v, format_tick(v, top, step, year)))
                .collect()
        }
    };
    axis.ticks = Ticks::Fixed(ticks);
}

/// Pair positions with labels in order; missing labels are blank.
fn relabel(positions: impl ExactSizeIterator<Item = f64>, labels: &[String], name: &str) -> Vec<(f64, String)> {
    if positions.len() != labels.len() {
        warn!(
            "{} {name}ticklabels given for {} ticks; pass \" \" for a blank label",
            labels.len(),
            positions.len()
        );
    }
    positions
        .enumerate()
        .map(|(i, v)| (v, labels.get(i).cloned().unwrap_or_default()))
        .collect()
}

/// Degrees counter-clockwise to whole quarter turns.
fn quarter_turns(degrees: f64) -> u8 {
    let turns = (degrees / 90.0).round();
    if turns * 90.0 != degrees {
        warn!("rot {degrees} is rounded to {} degrees", turns * 90.0);
    }
    (turns as i64).rem_euclid(4) as u8
}

/// Automatic range for one axis, then explicit bounds on top.
fn axis_range(policy: AutoScale, extent: Option<(f64, f64)>, bounds: AxisBounds) -> (f64, f64) {
    let auto = match (policy, extent) {
        (AutoScale::Fixed(lo, hi), _) => (lo, hi),
        (_, None) => (0.0, 1.0),
        (AutoScale::Tight, Some(e)) => e,
        (AutoScale::Padded(frac), Some((lo, hi))) => {
            let pad = (hi - lo) * frac;
            (lo - pad, hi + pad)
        }
        (AutoScale::PaddedWithZero(frac), Some((lo, hi))) => {
            let (lo, hi) = (lo.min(0.0), hi.max(0.0));
            let pad = (hi - lo) * frac;
            // Never pad past the zero baseline.
            (
                if lo == 0.0 { 0.0 } else { lo - pad },
                if hi == 0.0 { 0.0 } else { hi + pad },
            )
        }
    };
    // Avoid a zero-width range
    let auto = if auto.0 == auto.1 {
        (auto.0 - 1.0, auto.1 + 1.0)
    } else {
        auto
    };
    bounds.apply(auto)
}
