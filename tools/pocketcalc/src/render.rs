//! Terminal rendering of plots

use anyhow::Result;
use pocketcalc_eval::format::format_fixed;
use pocketcalc_plot::grid::LABEL_DECIMALS;
use pocketcalc_plot::{GridPlan, Plot, Surface};

pub const CHART_COLUMNS: usize = 64;
pub const CHART_ROWS: usize = 20;

const CURVE: char = '*';
const X_AXIS: char = '-';
const Y_AXIS: char = '|';
const ORIGIN: char = '+';

/// Draw a plot on a `columns` x `rows` character grid, axes under the curve.
pub fn ascii_chart(plot: &Plot, columns: usize, rows: usize) -> Result<String> {
    let (columns, rows) = (columns.max(2), rows.max(2));
    // one cell per pixel, no margin
    let surface = Surface::new((columns - 1) as f64, (rows - 1) as f64, 0.0)?;
    let mapper = plot.mapper(surface);
    let grid_plan = GridPlan::new(&mapper, 1);

    let mut cells = vec![vec![' '; columns]; rows];
    let cell = |pixel: f64, limit: usize| {
        let index = pixel.round();
        (index >= 0.0 && index < limit as f64).then_some(index as usize)
    };

    if let Some(row) = grid_plan.x_axis.and_then(|py| cell(py, rows)) {
        cells[row].iter_mut().for_each(|c| *c = X_AXIS);
    }
    if let Some(column) = grid_plan.y_axis.and_then(|px| cell(px, columns)) {
        for line in cells.iter_mut() {
            line[column] = if line[column] == X_AXIS { ORIGIN } else { Y_AXIS };
        }
    }

    for point in mapper.polyline(&plot.samples) {
        if let (Some(column), Some(row)) = (cell(point.x, columns), cell(point.y, rows)) {
            cells[row][column] = CURVE;
        }
    }

    let y_max = format_fixed(plot.range.max, LABEL_DECIMALS);
    let y_min = format_fixed(plot.range.min, LABEL_DECIMALS);
    let gutter = y_max.len().max(y_min.len());

    let mut out = String::new();
    for (index, line) in cells.iter().enumerate() {
        let label = match index {
            0 => y_max.as_str(),
            i if i == rows - 1 => y_min.as_str(),
            _ => "",
        };
        let body: String = line.iter().collect();
        out.push_str(&format!("{:>gutter$} |{}\n", label, body, gutter = gutter));
    }

    let x_min = format_fixed(plot.domain.min, LABEL_DECIMALS);
    let x_max = format_fixed(plot.domain.max, LABEL_DECIMALS);
    let padding = columns.saturating_sub(x_min.len() + x_max.len());
    out.push_str(&format!(
        "{:gutter$}  {}{}{}\n",
        "",
        x_min,
        " ".repeat(padding),
        x_max,
        gutter = gutter
    ));
    Ok(out)
}
