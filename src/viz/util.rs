//! Utility functions for visualization: colors, tick generation, label formatting.

use num_format::{Locale, ToFormattedString};
use plotters::style::RGBColor;
use regex::Regex;
use std::sync::LazyLock;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBColor {
    OFFICE10[idx % OFFICE10.len()]
}

/// "Nice" tick positions (steps of 1, 2, 5 × 10^k) inside `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return vec![min];
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return vec![min, max];
    }
    let eps = step * 1e-9;
    let start = (min / step).ceil() * step;
    let mut out = Vec::new();
    let mut i = 0u32;
    loop {
        let v = start + step * f64::from(i);
        if v > max + eps || i > 10_000 {
            break;
        }
        // Snap float noise: near-zero prints as "0" and the last tick stays in range.
        out.push(if v.abs() < eps { 0.0 } else { v.clamp(min, max) });
        i += 1;
    }
    out
}

/// Round a raw step to 1, 2, 5, or 10 times a power of ten.
pub fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Decimal places needed to print multiples of `step` exactly (at most 6).
pub fn decimals_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    (0..6)
        .find(|d| {
            let scaled = step * 10_f64.powi(*d as i32);
            (scaled.round() - scaled).abs() < 1e-6
        })
        .unwrap_or(6)
}

/// `1234567.5` with 1 decimal -> `"1,234,567.5"`.
pub fn group_number(v: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, v.abs());
    let (int, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
    let mut out = int
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| int.to_string());
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    let is_zero = out.chars().all(|c| matches!(c, '0' | '.' | ','));
    if v < 0.0 && !is_zero {
        out.insert(0, '-');
    }
    out
}

/// Format one numeric tick label.
///
/// - `year`: plain integers (`1990`).
/// - `top` is the largest tick value on the axis; from a million up, labels
///   are thousands with a `K` suffix and zero is left blank.
/// - otherwise: thousands separators, decimals only when the step is fractional.
pub fn format_tick(v: f64, top: f64, step: f64, year: bool) -> String {
    if year {
        return format!("{}", v.round() as i64);
    }
    if top >= 1.0e6 {
        if v == 0.0 {
            return String::new();
        }
        return format!("{}K", group_number(v / 1000.0, decimals_for_step(step / 1000.0)));
    }
    group_number(v, decimals_for_step(step))
}

static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})-(\d{4})").expect("year range pattern is valid")
});

/// Typographic cleanup for titles and notes: year ranges get an en dash, and a
/// literal backslash-n becomes a line break.
pub fn format_title(raw: &str) -> String {
    YEAR_RANGE
        .replace_all(raw, "${1}\u{2013}${2}")
        .replace("\\n", "\n")
}
