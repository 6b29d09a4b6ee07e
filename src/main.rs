//! Scientific calculator shell - Entry Point

use clap::Parser;
use scical::config::ResolvedConfig;
use scical::engine::NumericEngine;
use scical::model::error::AppError;
use scical::model::AngleMode;
use scical::repl::Shell;
use scical::state::{Feedback, Session, SessionOptions, SessionState};
use scical::view::NullRenderer;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Scientific calculator - evaluate expressions or run an interactive shell
#[derive(Parser, Debug)]
#[command(name = "scical")]
#[command(version)]
#[command(about = "Scientific calculator with degree/radian modes, history and Ans")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Angle mode for trig functions (rad or deg)
    #[arg(short, long, value_parser = parse_angle_mode)]
    pub angle_mode: Option<AngleMode>,

    /// Evaluate one expression, print the result and exit
    #[arg(short, long)]
    pub eval: Option<String>,

    /// With --eval, print the history entry as JSON
    #[arg(long, requires = "eval")]
    pub json: bool,

    /// Load an expression file into the buffer at startup
    #[arg(short, long, conflicts_with = "eval")]
    pub load: Option<PathBuf>,
}

fn parse_angle_mode(raw: &str) -> Result<AngleMode, String> {
    raw.parse().map_err(|e: scical::model::InvalidAngleMode| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("scical: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = scical::config::resolve(args.config.clone(), args.angle_mode)?;

    scical::logging::init(&config.log_file_path)?;

    info!(
        angle_mode = %config.angle_mode,
        precision = config.precision,
        buttons = config.buttons.len(),
        "Configuration loaded and resolved"
    );

    let mut session = new_session(&config);

    if let Some(expression) = args.eval.as_deref() {
        return one_shot(&mut session, expression, args.json);
    }

    if let Some(path) = &args.load {
        let text = scical::source::import_expression(path)?;
        session.load_text(&text);
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let shell = Shell::new(config.buttons).with_prompt(interactive);

    let errors = shell.run(&mut session, stdin.lock(), io::stdout().lock())?;

    // A piped script that hit errors reports failure
    if errors > 0 && !interactive {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn new_session(config: &ResolvedConfig) -> Session<NumericEngine, NullRenderer> {
    let state = SessionState {
        angle_mode: config.angle_mode,
        second: false,
    };
    let options = SessionOptions {
        precision: config.precision,
        group_digits: config.group_digits,
    };
    Session::with_options(NumericEngine::new(), NullRenderer, state, options)
}

fn one_shot(
    session: &mut Session<NumericEngine, NullRenderer>,
    expression: &str,
    json: bool,
) -> Result<ExitCode, AppError> {
    let mut stdout = io::stdout().lock();

    match session.evaluate_text(expression) {
        Feedback::Result { entry, display } => {
            if json {
                let encoded = serde_json::to_string(&entry).map_err(io::Error::other)?;
                writeln!(stdout, "{encoded}")?;
            } else {
                writeln!(stdout, "{display}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Feedback::Error(message) => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
        Feedback::None => {
            eprintln!("nothing to evaluate");
            Ok(ExitCode::FAILURE)
        }
        Feedback::Edited | Feedback::Message(_) => Ok(ExitCode::SUCCESS),
    }
}
