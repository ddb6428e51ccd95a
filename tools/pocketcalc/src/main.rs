//! pocketcalc - Calculator, function plotter and unit converter
//!
//! One-shot subcommands for scripting, and an interactive REPL that keeps
//! the angle mode and the displayed plot between commands.

mod commands;
mod render;
mod repl;

use crate::commands::PlotArgs;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use common::config::{load_config_with, ConfigFormat};
use common::logging::init_logging;
use pocketcalc_eval::AngleMode;
use pocketcalc_units::{Category, UnitRegistry};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "pocketcalc")]
#[command(about = "Calculator, function plotter and unit converter")]
#[command(long_about = "Calculator, function plotter and unit converter

Commands:
  calc        Evaluate an expression
  plot        Sample a function of x and draw it
  convert     Convert a value between units
  units       List conversion categories and units
  config      Print the effective configuration
  repl        Interactive session (default)

Examples:
  pocketcalc calc 'sin(30) * 2'
  pocketcalc calc 'x^2 + 1' --x 3
  pocketcalc plot 'y=x^2' --x-min -2 --x-max 2
  pocketcalc plot '1/x' --x-min -5 --x-max 5 --y-min -3 --y-max 3 --json
  pocketcalc convert temperature 32 °F K
  pocketcalc units speed

Configuration is read from config/pocketcalc.{toml,yaml,json} or --config,
then from POCKETCALC_* environment variables (e.g. POCKETCALC_PLOT__STEPS=400).")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (toml, yaml or json)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Angle mode for trigonometry: deg or rad (default from configuration)
    #[arg(short = 'a', long, global = true)]
    angle: Option<AngleMode>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression
    Calc {
        expression: String,

        /// Value bound to x
        #[arg(long, allow_hyphen_values = true)]
        x: Option<f64>,

        /// Print full precision instead of the calculator display
        #[arg(short, long)]
        full: bool,
    },

    /// Sample a function of x and draw it
    Plot {
        /// Function of x, optionally written as y=...
        expression: String,

        #[arg(long, allow_hyphen_values = true)]
        x_min: String,

        #[arg(long, allow_hyphen_values = true)]
        x_max: String,

        /// Lower y bound (computed from the samples when omitted or invalid)
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        y_min: String,

        /// Upper y bound (computed from the samples when omitted or invalid)
        #[arg(long, allow_hyphen_values = true, default_value = "")]
        y_max: String,

        /// Sub-intervals to sample (default from configuration)
        #[arg(long)]
        steps: Option<usize>,

        /// Print the plot frame (points, pixels, grid) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a value between units of one category
    Convert {
        /// length, volume, mass, temperature, time or speed
        category: String,

        #[arg(allow_hyphen_values = true)]
        value: String,

        from: String,

        to: String,
    },

    /// List conversion categories and units
    Units { category: Option<Category> },

    /// Print the effective configuration
    Config {
        #[arg(long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },

    /// Interactive session
    Repl,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Toml,
    Yaml,
    Json,
}

impl From<OutputFormat> for ConfigFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Toml => ConfigFormat::Toml,
            OutputFormat::Yaml => ConfigFormat::Yaml,
            OutputFormat::Json => ConfigFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config =
        load_config_with(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if cli.no_color {
        config.logging.ansi = false;
    }
    let _guard = init_logging(&config.logging)?;

    UnitRegistry::builtin()
        .validate()
        .context("Built-in unit tables are inconsistent")?;

    let angle = cli.angle.unwrap_or(config.angle_mode);
    debug!(config_file = ?cli.config, %angle, "starting");

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Calc {
            expression,
            x,
            full,
        } => commands::calc(&config, &expression, x, angle, full)?,
        Commands::Plot {
            expression,
            x_min,
            x_max,
            y_min,
            y_max,
            steps,
            json,
        } => commands::plot(
            &config,
            PlotArgs {
                expression,
                x_min,
                x_max,
                y_min,
                y_max,
                steps,
                angle,
                json,
            },
        )?,
        Commands::Convert {
            category,
            value,
            from,
            to,
        } => commands::convert(&config, &category, &value, &from, &to)?,
        Commands::Units { category } => commands::units(category)?,
        Commands::Config { format } => commands::show_config(&config, format.into())?,
        Commands::Repl => repl::run(config, angle)?,
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_plot_arguments() {
        let cli = Cli::parse_from([
            "pocketcalc",
            "plot",
            "x^2",
            "--x-min",
            "-2",
            "--x-max",
            "2",
            "--angle",
            "rad",
        ]);
        assert_eq!(cli.angle, Some(AngleMode::Radians));
        match cli.command {
            Some(Commands::Plot {
                expression,
                x_min,
                y_min,
                steps,
                ..
            }) => {
                assert_eq!(expression, "x^2");
                assert_eq!(x_min, "-2");
                assert_eq!(y_min, "");
                assert_eq!(steps, None);
            },
            _ => panic!("expected plot"),
        }
    }

    #[test]
    fn test_defaults_to_repl() {
        let cli = Cli::parse_from(["pocketcalc"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_units_category_parsed() {
        let cli = Cli::parse_from(["pocketcalc", "units", "Speed"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Units {
                category: Some(Category::Speed)
            })
        ));
        assert!(Cli::try_parse_from(["pocketcalc", "units", "energy"]).is_err());
    }
}
