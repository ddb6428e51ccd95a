//! Grid lines, tick labels and zero axes

use crate::mapper::CoordinateMapper;
use crate::range::Interval;
use pocketcalc_eval::format::format_fixed;
use serde::Serialize;

/// Grid divisions per axis
pub const DEFAULT_TICKS: usize = 5;
/// Decimal places on tick labels
pub const LABEL_DECIMALS: usize = 2;

/// `count + 1` evenly spaced values from `min` to `max`.
///
/// A count of zero is treated as one division.
pub fn ticks(interval: Interval, count: usize) -> Vec<f64> {
    let count = count.max(1);
    let step = interval.span() / count as f64;
    (0..=count)
        .map(|i| {
            if step.is_finite() {
                interval.min + i as f64 * step
            } else {
                interval.lerp(i as f64 / count as f64)
            }
        })
        .collect()
}

/// Whether the zero line of this axis falls inside the interval
pub fn zero_axis_visible(interval: Interval) -> bool {
    interval.contains(0.0)
}

fn label(value: f64) -> String {
    let text = format_fixed(value, LABEL_DECIMALS);
    // no "-0.00"
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    /// Pixel coordinate along the tick's own axis
    pub pixel: f64,
    pub label: String,
}

/// Everything a renderer needs to draw grid and axes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridPlan {
    /// Vertical grid lines, left to right
    pub x_ticks: Vec<Tick>,
    /// Horizontal grid lines, bottom to top
    pub y_ticks: Vec<Tick>,
    /// Pixel `y` of the horizontal axis (`y = 0`), when visible
    pub x_axis: Option<f64>,
    /// Pixel `x` of the vertical axis (`x = 0`), when visible
    pub y_axis: Option<f64>,
}

impl GridPlan {
    pub fn new(mapper: &CoordinateMapper, tick_count: usize) -> Self {
        let domain = mapper.domain();
        let range = mapper.range();

        let x_ticks = ticks(domain, tick_count)
            .into_iter()
            .map(|value| Tick {
                value,
                pixel: mapper.px(value),
                label: label(value),
            })
            .collect();
        let y_ticks = ticks(range, tick_count)
            .into_iter()
            .map(|value| Tick {
                value,
                pixel: mapper.py(value),
                label: label(value),
            })
            .collect();

        Self {
            x_ticks,
            y_ticks,
            x_axis: zero_axis_visible(range).then(|| mapper.py(0.0)),
            y_axis: zero_axis_visible(domain).then(|| mapper.px(0.0)),
        }
    }
}
