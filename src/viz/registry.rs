//! Chart type registry: one drawing strategy per [`ChartType`].
//!
//! Strategies only produce series geometry (plus the autoscale policy and tick
//! style that geometry implies, and any labels attached to the geometry).
//! Titles, axis labels and explicit bounds are applied afterwards by the
//! renderer, identically for every chart type.

use crate::error::Result;
use crate::models::{Column, InputTable, IndexValue};
use crate::options::{ChartType, ResolvedConfig};
use log::{debug, warn};
use plotters::style::RGBColor;

use super::text::wrap_to_chars;
use super::types::{Annotation, AutoScale, Figure, LegendEntry, Mark, Placement, Ticks};
use super::util::{decimals_for_step, group_number, office_color};

/// Width of a bar group as a fraction of one category slot.
const GROUP_WIDTH: f64 = 0.8;
/// Horizontal bar labels wrap at this many characters.
const HBAR_LABEL_CHARS: usize = 30;
const LINE_WIDTH: u32 = 2;
const POINT_RADIUS: u32 = 3;
/// Bar values and band names.
const LABEL_INK: RGBColor = RGBColor(34, 34, 34);

/// Draws series geometry for one chart family.
pub trait SeriesStrategy {
    fn draw(&self, table: &InputTable, config: &ResolvedConfig, figure: &mut Figure) -> Result<()>;
}

/// Select the strategy for a chart type. Exhaustive over the closed enum.
pub fn strategy_for(kind: ChartType) -> &'static dyn SeriesStrategy {
    match kind {
        ChartType::Line => &LineStrategy,
        ChartType::Scatter => &ScatterStrategy,
        ChartType::HorizontalBar => &BarStrategy {
            orientation: Orientation::Horizontal,
        },
        ChartType::VerticalBar => &BarStrategy {
            orientation: Orientation::Vertical,
        },
        ChartType::StackedArea => &StackedAreaStrategy,
    }
}

/// X positions for each row plus the order rows should be visited in.
struct XDomain {
    positions: Vec<f64>,
    order: Vec<usize>,
    ticks: Ticks,
}

/// Numeric indexes map to themselves (optionally visited in ascending order);
/// categorical indexes are laid out at 0..n in file order.
fn x_domain(table: &InputTable, config: &ResolvedConfig, sorted: bool) -> XDomain {
    let mut order: Vec<usize> = (0..table.n_rows()).collect();
    match table.numeric_index() {
        Some(positions) => {
            if sorted {
                order.sort_by(|a, b| positions[*a].total_cmp(&positions[*b]));
            }
            XDomain {
                positions,
                order,
                ticks: Ticks::Numeric {
                    year: config.xyear(),
                },
            }
        }
        None => {
            let positions: Vec<f64> = order.iter().map(|i| *i as f64).collect();
            let ticks = Ticks::Categories(
                positions
                    .iter()
                    .copied()
                    .zip(table.index_labels())
                    .collect(),
            );
            XDomain {
                positions,
                order,
                ticks,
            }
        }
    }
}

fn annotate(figure: &mut Figure, at: (f64, f64), text: String, placement: Placement, color: RGBColor) {
    figure.annotations.push(Annotation {
        at,
        text,
        placement,
        color,
    });
}

/// Bar value text: whole numbers stay whole, fractions keep at most two places.
fn value_label(v: f64) -> String {
    group_number(v, decimals_for_step(v.abs()).min(2))
}

fn push_legend(figure: &mut Figure, column: &Column, idx: usize) {
    figure.legend.push(LegendEntry {
        label: column.name.clone(),
        color: office_color(idx),
    });
}

pub struct LineStrategy;

impl SeriesStrategy for LineStrategy {
    fn draw(&self, table: &InputTable, config: &ResolvedConfig, figure: &mut Figure) -> Result<()> {
        let dom = x_domain(table, config, true);
        for (idx, column) in table.usable_columns().enumerate() {
            let color = office_color(idx);
            // Missing cells break the line into separate segments.
            let mut segment: Vec<(f64, f64)> = Vec::new();
            let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
            for &row in &dom.order {
                match column.values[row] {
                    Some(v) => segment.push((dom.positions[row], v)),
                    None if !segment.is_empty() => segments.push(std::mem::take(&mut segment)),
                    None => {}
                }
            }
            if !segment.is_empty() {
                segments.push(segment);
            }
            let last = segments.last().and_then(|s| s.last()).copied();
            for points in segments {
                // A lone observation has no line to draw; show it as a marker.
                figure.marks.push(if points.len() == 1 {
                    Mark::Points {
                        points,
                        color,
                        radius: POINT_RADIUS,
                    }
                } else {
                    Mark::Line {
                        points,
                        color,
                        width: LINE_WIDTH,
                    }
                });
            }
            if !config.label_lines() {
                push_legend(figure, column, idx);
            } else if let Some(end) = last {
                annotate(figure, end, column.name.clone(), Placement::Right, color);
            }
        }
        figure.x_axis.autoscale = AutoScale::Tight;
        figure.x_axis.ticks = dom.ticks;
        figure.y_axis.autoscale = AutoScale::PaddedWithZero(0.05);
        Ok(())
    }
}

pub struct ScatterStrategy;

impl SeriesStrategy for ScatterStrategy {
    fn draw(&self, table: &InputTable, config: &ResolvedConfig, figure: &mut Figure) -> Result<()> {
        let dom = x_domain(table, config, false);
        for (idx, column) in table.usable_columns().enumerate() {
            let points: Vec<(f64, f64)> = dom
                .order
                .iter()
                .filter_map(|&row| column.values[row].map(|v| (dom.positions[row], v)))
                .collect();
            figure.marks.push(Mark::Points {
                points,
                color: office_color(idx),
                radius: POINT_RADIUS,
            });
            push_legend(figure, column, idx);
        }
        figure.x_axis.autoscale = AutoScale::Padded(0.05);
        figure.x_axis.ticks = dom.ticks;
        figure.y_axis.autoscale = AutoScale::Padded(0.05);
        Ok(())
    }
}

pub struct StackedAreaStrategy;

impl SeriesStrategy for StackedAreaStrategy {
    /// Columns stack in their given order: the first column sits on zero, each
    /// later one on the running total. Missing cells count as zero.
    fn draw(&self, table: &InputTable, config: &ResolvedConfig, figure: &mut Figure) -> Result<()> {
        let dom = x_domain(table, config, true);
        let mut cumulative = vec![0.0f64; dom.order.len()];
        let middle = dom.order.len() / 2;
        for (idx, column) in table.usable_columns().enumerate() {
            let mut lower = Vec::with_capacity(dom.order.len());
            let mut upper = Vec::with_capacity(dom.order.len());
            for (slot, &row) in dom.order.iter().enumerate() {
                let x = dom.positions[row];
                lower.push((x, cumulative[slot]));
                cumulative[slot] += column.values[row].unwrap_or(0.0);
                upper.push((x, cumulative[slot]));
            }
            if !config.label_area() {
                push_legend(figure, column, idx);
            } else if let (Some(lo), Some(hi)) = (lower.get(middle), upper.get(middle))
                && hi.1 > lo.1
            {
                let at = (lo.0, (lo.1 + hi.1) / 2.0);
                annotate(figure, at, column.name.clone(), Placement::Center, LABEL_INK);
            }
            figure.marks.push(Mark::Band {
                lower,
                upper,
                color: office_color(idx),
            });
        }
        figure.x_axis.autoscale = AutoScale::Tight;
        figure.x_axis.ticks = dom.ticks;
        figure.y_axis.autoscale = AutoScale::PaddedWithZero(0.05);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Categories along y, values along x.
    Horizontal,
    /// Categories along x, values along y.
    Vertical,
}

/// Grouped bars: one slot per index entry, one bar per column inside the slot.
pub struct BarStrategy {
    pub orientation: Orientation,
}

impl SeriesStrategy for BarStrategy {
    fn draw(&self, table: &InputTable, config: &ResolvedConfig, figure: &mut Figure) -> Result<()> {
        let n = table.n_rows();
        let columns: Vec<&Column> = table.usable_columns().collect();
        let bar_w = GROUP_WIDTH / columns.len().max(1) as f64;

        for (idx, column) in columns.iter().enumerate() {
            let color = office_color(idx);
            for (row, value) in column.values.iter().enumerate() {
                let Some(v) = *value else { continue };
                let (bar, end, placement) = match self.orientation {
                    Orientation::Vertical => {
                        let x0 = row as f64 - GROUP_WIDTH / 2.0 + idx as f64 * bar_w;
                        let bar = Mark::Bar {
                            from: (x0, 0.0),
                            to: (x0 + bar_w, v),
                            color,
                        };
                        (bar, (x0 + bar_w / 2.0, v), Placement::Above)
                    }
                    Orientation::Horizontal => {
                        // First category at the top, first series at the top of its group.
                        let center = (n - 1 - row) as f64;
                        let y1 = center + GROUP_WIDTH / 2.0 - idx as f64 * bar_w;
                        let bar = Mark::Bar {
                            from: (0.0, y1 - bar_w),
                            to: (v, y1),
                            color,
                        };
                        (bar, (v, y1 - bar_w / 2.0), Placement::Right)
                    }
                };
                figure.marks.push(bar);
                if config.label_bars() {
                    annotate(figure, end, value_label(v), placement, LABEL_INK);
                }
            }
            push_legend(figure, column, idx);
        }

        let slots = AutoScale::Fixed(-0.5, n as f64 - 0.5);
        let values = AutoScale::PaddedWithZero(0.05);
        match self.orientation {
            Orientation::Vertical => {
                let labels = category_labels(table.index(), None);
                warn_if_crowded(&labels);
                figure.x_axis.autoscale = slots;
                figure.x_axis.ticks = Ticks::Categories(
                    labels.into_iter().enumerate().map(|(i, l)| (i as f64, l)).collect(),
                );
                figure.y_axis.autoscale = values;
                figure.y_axis.ticks = Ticks::Numeric {
                    year: config.yyear(),
                };
            }
            Orientation::Horizontal => {
                let labels = category_labels(table.index(), Some(HBAR_LABEL_CHARS));
                figure.y_axis.autoscale = slots;
                figure.y_axis.ticks = Ticks::Categories(
                    labels
                        .into_iter()
                        .enumerate()
                        .map(|(i, l)| ((n - 1 - i) as f64, l))
                        .collect(),
                );
                figure.x_axis.autoscale = values;
                figure.x_axis.ticks = Ticks::Numeric {
                    year: config.xyear(),
                };
            }
        }
        debug!("drew {} bar groups of {} series", n, columns.len());
        Ok(())
    }
}

fn category_labels(index: &[IndexValue], wrap: Option<usize>) -> Vec<String> {
    index
        .iter()
        .map(|v| {
            let s = v.to_string();
            match wrap {
                Some(width) => wrap_to_chars(&s, width).join("\n"),
                None => s,
            }
        })
        .collect()
}

/// Long category names overlap on a vertical bar chart's x axis.
fn warn_if_crowded(labels: &[String]) {
    let total: usize = labels.iter().map(|l| l.chars().count()).sum();
    let crowded = labels.iter().any(|l| {
        let len = l.chars().count();
        len > 9 || (len > 6 && labels.len() > 7)
    });
    if crowded || total > 49 {
        warn!(
            "x-axis labels may be unreadable; consider `--type_ horizontal_bar` so every category label fits"
        );
    }
}
