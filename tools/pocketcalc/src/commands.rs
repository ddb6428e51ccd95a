//! One-shot subcommands

use crate::render::{ascii_chart, CHART_COLUMNS, CHART_ROWS};
use anyhow::{Context, Result};
use colored::*;
use common::config::{render_config, AppConfig, ConfigFormat};
use pocketcalc_eval::format::{format_display, format_fixed, format_number};
use pocketcalc_eval::{evaluate, AngleMode};
use pocketcalc_plot::{Plot, PlotRequest, PlotSession, Surface};
use pocketcalc_units::{convert_text, Category, UnitRegistry};
use tracing::info;

/// Drawing surface from the plot settings
pub fn surface(config: &AppConfig) -> Result<Surface> {
    let plot = &config.plot;
    Surface::new(plot.width, plot.height, plot.margin).context("Invalid plot surface")
}

/// Result of a one-shot evaluation as printed
pub fn calc_text(
    config: &AppConfig,
    expression: &str,
    x: Option<f64>,
    angle: AngleMode,
    full: bool,
) -> Result<String> {
    let value = evaluate(expression, x, angle)?;
    info!(expression, value, mode = %angle, "calculated");
    if full {
        Ok(format_number(value))
    } else {
        Ok(format_display(value, config.calculator.display_width))
    }
}

pub fn calc(
    config: &AppConfig,
    expression: &str,
    x: Option<f64>,
    angle: AngleMode,
    full: bool,
) -> Result<()> {
    println!("{}", calc_text(config, expression, x, angle, full)?);
    Ok(())
}

pub struct PlotArgs {
    pub expression: String,
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
    pub steps: Option<usize>,
    pub angle: AngleMode,
    pub json: bool,
}

pub fn plot(config: &AppConfig, args: PlotArgs) -> Result<()> {
    let mut session = PlotSession::new(args.angle, args.steps.unwrap_or(config.plot.steps))?;
    let request = PlotRequest::new(args.expression, args.x_min, args.x_max)
        .with_y_range(args.y_min, args.y_max);
    let plot = session.plot(&request)?;

    if args.json {
        let frame = plot.frame(surface(config)?, config.plot.tick_count);
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        print_plot(plot)?;
    }
    Ok(())
}

/// Summary line, optional warning and a text chart
pub fn print_plot(plot: &Plot) -> Result<()> {
    println!(
        "{} {}  {} {}  {} {}  {} {}  [{}]",
        "y =".bright_cyan(),
        plot.expression.bright_yellow(),
        "x:".bright_cyan(),
        plot.domain,
        "y:".bright_cyan(),
        plot.range,
        "points:".bright_cyan(),
        plot.samples.len(),
        plot.angle_mode
    );
    if let Some(warning) = &plot.warning {
        println!("{} {}", "WARN".yellow(), warning);
    }
    print!("{}", ascii_chart(plot, CHART_COLUMNS, CHART_ROWS)?);
    Ok(())
}

/// `<value> <from> = <result> <to>`, result rounded per configuration
pub fn conversion_line(
    config: &AppConfig,
    category: &str,
    value: &str,
    from: &str,
    to: &str,
) -> Result<String> {
    let converted = convert_text(category, from, to, value)?;
    Ok(format!(
        "{} {} = {} {}",
        value.trim(),
        from,
        format_fixed(converted, config.converter.decimals),
        to
    ))
}

pub fn convert(
    config: &AppConfig,
    category: &str,
    value: &str,
    from: &str,
    to: &str,
) -> Result<()> {
    println!("{}", conversion_line(config, category, value, from, to)?);
    Ok(())
}

pub fn units(category: Option<Category>) -> Result<()> {
    let registry = UnitRegistry::builtin();
    let categories = match category {
        Some(category) => vec![category],
        None => Category::ALL.to_vec(),
    };
    for category in categories {
        let table = registry.table(category)?;
        let pair = table
            .default_pair()
            .map(|(from, to)| format!("{} -> {}", from, to))
            .unwrap_or_default();
        println!(
            "{:<12} {}  {}",
            category.name().bright_cyan(),
            table.labels().join(", "),
            format!("(default {})", pair).dimmed()
        );
    }
    Ok(())
}

pub fn show_config(config: &AppConfig, format: ConfigFormat) -> Result<()> {
    print!("{}", render_config(config, format)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_display_and_full() {
        let config = AppConfig::default();
        assert_eq!(
            calc_text(&config, "sqrt(2)", None, AngleMode::Degrees, false).unwrap(),
            "1.4142135623"
        );
        assert_eq!(
            calc_text(&config, "sqrt(2)", None, AngleMode::Degrees, true).unwrap(),
            "1.4142135623730951"
        );
        assert_eq!(
            calc_text(&config, "x^2 + 1", Some(3.0), AngleMode::Radians, false).unwrap(),
            "10"
        );
        assert!(calc_text(&config, "1/0", None, AngleMode::Degrees, false).is_err());
    }

    #[test]
    fn test_calc_respects_display_width() {
        let mut config = AppConfig::default();
        config.calculator.display_width = 4;
        assert_eq!(
            calc_text(&config, "1/3", None, AngleMode::Degrees, false).unwrap(),
            "0.33"
        );
    }

    #[test]
    fn test_conversion_line() {
        let mut config = AppConfig::default();
        assert_eq!(
            conversion_line(&config, "temperature", " 32 ", "°F", "K").unwrap(),
            "32 °F = 273.15 K"
        );
        assert_eq!(
            conversion_line(&config, "length", "1", "m", "cm").unwrap(),
            "1 m = 100.00 cm"
        );

        config.converter.decimals = 0;
        assert_eq!(
            conversion_line(&config, "Length", "1", "km", "m").unwrap(),
            "1 km = 1000 m"
        );

        assert!(conversion_line(&config, "length", "abc", "m", "cm").is_err());
        assert!(conversion_line(&config, "length", "1", "m", "kg").is_err());
    }
}
