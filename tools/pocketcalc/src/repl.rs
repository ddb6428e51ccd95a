//! Interactive session
//!
//! Holds the calculator display, the grapher form and the displayed plot
//! for the life of the session. The angle mode is shared by calculator and
//! grapher and toggled with `mode`.

use crate::commands::{conversion_line, surface};
use crate::render::{ascii_chart, CHART_COLUMNS, CHART_ROWS};
use anyhow::{bail, Context, Result};
use colored::*;
use common::config::AppConfig;
use pocketcalc_eval::{AngleMode, Calculator, Key};
use pocketcalc_plot::{PlotRequest, PlotSession};
use pocketcalc_units::{Category, UnitRegistry};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

const COMMANDS: [&str; 13] = [
    "calc", "fn", "x", "y", "plot", "show", "json", "clear", "mode", "convert", "units", "help",
    "quit",
];

/// What the loop should do after a line
#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Nothing,
    Quit,
}

pub struct Repl {
    config: AppConfig,
    calculator: Calculator,
    session: PlotSession,
    form: PlotRequest,
}

impl Repl {
    pub fn new(config: AppConfig, angle_mode: AngleMode) -> Result<Self> {
        let calculator = Calculator::with_limits(
            angle_mode,
            config.calculator.input_limit,
            config.calculator.display_width,
        );
        let session = PlotSession::new(angle_mode, config.plot.steps)?;
        Ok(Self {
            config,
            calculator,
            session,
            form: PlotRequest::default(),
        })
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.session.angle_mode()
    }

    fn set_angle_mode(&mut self, mode: AngleMode) {
        self.session.set_angle_mode(mode);
        self.calculator.set_angle_mode(mode);
    }

    /// Run one input line.
    pub fn execute(&mut self, line: &str) -> Result<Reply> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match command.to_ascii_lowercase().as_str() {
            "" => Ok(Reply::Nothing),
            "calc" => self.calculate(rest),
            "fn" => {
                self.form.expression = rest.to_string();
                Ok(Reply::Nothing)
            },
            "x" => match args.as_slice() {
                [min, max] => {
                    self.form.x_min = min.to_string();
                    self.form.x_max = max.to_string();
                    Ok(Reply::Nothing)
                },
                _ => bail!("Usage: x <min> <max>"),
            },
            "y" => match args.as_slice() {
                [min, max] => {
                    self.form.y_min = min.to_string();
                    self.form.y_max = max.to_string();
                    Ok(Reply::Nothing)
                },
                [] => {
                    self.form.y_min.clear();
                    self.form.y_max.clear();
                    Ok(Reply::Nothing)
                },
                _ => bail!("Usage: y <min> <max>, or y alone for automatic"),
            },
            "plot" => {
                if !rest.is_empty() {
                    self.form.expression = rest.to_string();
                }
                self.session.plot(&self.form)?;
                self.show()
            },
            "show" => self.show(),
            "json" => {
                let frame = self
                    .session
                    .frame(surface(&self.config)?, self.config.plot.tick_count)
                    .context("Nothing plotted")?;
                Ok(Reply::Text(serde_json::to_string_pretty(&frame)?))
            },
            "clear" => {
                self.session.clear();
                Ok(Reply::Text("Plot cleared".to_string()))
            },
            "mode" => {
                let mode = match args.as_slice() {
                    [] => self.angle_mode().toggled(),
                    [name] => name.parse::<AngleMode>().map_err(anyhow::Error::msg)?,
                    _ => bail!("Usage: mode [deg|rad]"),
                };
                self.set_angle_mode(mode);
                Ok(Reply::Text(format!("Angle mode: {}", mode)))
            },
            "convert" => match args.as_slice() {
                [category, value, from, to] => Ok(Reply::Text(conversion_line(
                    &self.config,
                    category,
                    value,
                    from,
                    to,
                )?)),
                _ => bail!("Usage: convert <category> <value> <from> <to>"),
            },
            "units" => {
                let category: Category = rest.parse()?;
                let units = UnitRegistry::builtin().units(category)?;
                Ok(Reply::Text(units.join(", ")))
            },
            "help" | "?" => Ok(Reply::Text(help_text())),
            "quit" | "exit" | "q" => Ok(Reply::Quit),
            _ => self.calculate(line),
        }
    }

    /// Feed an entry through the calculator display.
    fn calculate(&mut self, entry: &str) -> Result<Reply> {
        self.calculator.press(Key::Clear)?;
        self.calculator.press(Key::Input(entry.to_string()))?;
        if self.calculator.display().chars().count() < entry.chars().count() {
            bail!(
                "Entry longer than {} characters",
                self.config.calculator.input_limit
            );
        }
        self.calculator.press(Key::Evaluate)?;
        Ok(Reply::Text(self.calculator.display().to_string()))
    }

    fn show(&self) -> Result<Reply> {
        let plot = self.session.current().context("Nothing plotted")?;
        let mut text = format!(
            "y = {}  x: {}  y: {}  points: {}  [{}]\n",
            plot.expression,
            plot.domain,
            plot.range,
            plot.samples.len(),
            plot.angle_mode
        );
        if let Some(warning) = &plot.warning {
            text.push_str(&format!("WARN {}\n", warning));
        }
        text.push_str(&ascii_chart(plot, CHART_COLUMNS, CHART_ROWS)?);
        Ok(Reply::Text(text.trim_end().to_string()))
    }
}

fn help_text() -> String {
    [
        "calc <expr>                      evaluate (any other line does too)",
        "fn <expr>                        set the function to plot",
        "x <min> <max>                    set the x range",
        "y <min> <max> | y                set or reset the y range",
        "plot [expr]                      plot the form, replacing the current plot",
        "show | json                      redraw the plot or print its frame",
        "clear                            clear the plot",
        "mode [deg|rad]                   toggle or set the angle mode",
        "convert <cat> <value> <from> <to>",
        "units <category>                 list units",
        "quit                             leave",
    ]
    .join("\n")
}

/// Tab completion for command names
struct ReplHelper;

impl Helper for ReplHelper {}

impl Hinter for ReplHelper {
    type Hint = String;
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((pos, vec![]));
        }
        let matches = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: (*cmd).to_string(),
                replacement: (*cmd).to_string(),
            })
            .collect();
        Ok((0, matches))
    }
}

/// Interactive loop
pub fn run(config: AppConfig, angle_mode: AngleMode) -> Result<()> {
    let mut repl = Repl::new(config, angle_mode)?;

    let editor_config = rustyline::Config::builder()
        .completion_type(rustyline::CompletionType::List)
        .build();
    let mut rl = Editor::with_config(editor_config).context("Failed to initialize readline")?;
    rl.set_helper(Some(ReplHelper));

    println!("{}", "pocketcalc".bright_cyan().bold());
    println!(
        "Type '{}' for commands, {} for completion\n",
        "help".bright_yellow(),
        "Tab".bright_cyan()
    );

    loop {
        let prompt = format!("{}> ", repl.angle_mode().label());
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match repl.execute(&line) {
                    Ok(Reply::Text(text)) => println!("{}", text),
                    Ok(Reply::Nothing) => {},
                    Ok(Reply::Quit) => break,
                    Err(e) => eprintln!("{} {}", "Error:".red(), e),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{} {}", "Readline error:".red(), e);
                break;
            },
        }
    }

    Ok(())
}
