//! Interactive session: pick a center, then query it repeatedly.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::{check_tolerance, check_top, OutputFormat, DEFAULT_TOLERANCE, DEFAULT_TOP};
use crate::error::{CliError, CliResult};
use crate::report;
use crate::state::Session;

const HELP: &str = "\
  center <actor>        make <actor> the center of the universe
  path <actor>          separation and path from <actor> to the center
  missing               actors with no path to the center
  average               average separation of the center
  within <n>            actors exactly <n> steps from the center
  degree [n]            top [n] actors of the center's tree by direct links
  costars [n]           top [n] actors of the whole graph by number of costars
  similar [tolerance]   actors whose average separation is close to the center's
  stats                 graph and tree sizes
  help                  this list
  quit                  leave the session
";

fn history_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".sixdeg_history")
}

/// Run the interactive session until `quit` or end of input.
pub fn run(session: &mut Session, format: OutputFormat) -> CliResult<()> {
    let mut rl = DefaultEditor::new()?;
    let hist_path = history_path();
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    eprintln!(
        "sixdeg v{}: center is {}. Type help for commands.",
        env!("CARGO_PKG_VERSION"),
        session.center()
    );

    loop {
        let prompt = format!("{}> ", session.center());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                match execute(line, session, format) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => eprintln!("  error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  (Ctrl+C) type quit to leave");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    if let Err(e) = rl.save_history(&hist_path) {
        log::debug!("repl: could not save history to {}: {}", hist_path.display(), e);
    }
    Ok(())
}

/// Execute one command line. Returns `true` when the session should end.
pub fn execute(input: &str, session: &mut Session, format: OutputFormat) -> CliResult<bool> {
    let (cmd, args) = match input.trim().split_once(' ') {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input.trim(), ""),
    };

    match cmd {
        "quit" | "exit" => return Ok(true),
        "help" | "?" => print!("{}", HELP),
        "center" => {
            session.set_center(require_arg(args, "center <actor>")?)?;
            eprintln!("  center is now {}", session.center());
        }
        "path" => report::emit(&session.path(require_arg(args, "path <actor>")?)?, format)?,
        "missing" => report::emit(&session.missing(), format)?,
        "average" | "avg" => report::emit(&session.average()?, format)?,
        "within" => {
            let steps = parse_number(require_arg(args, "within <n>")?, "within <n>")?;
            report::emit(&session.within(steps)?, format)?;
        }
        "degree" | "deg" => {
            let top = parse_top(args, "degree [n]")?;
            report::emit(&session.degree(top), format)?;
        }
        "costars" => {
            let top = parse_top(args, "costars [n]")?;
            report::emit(&session.costars(top), format)?;
        }
        "similar" => {
            let tolerance = match args {
                "" => DEFAULT_TOLERANCE,
                t => check_tolerance(
                    t.parse()
                        .map_err(|_| CliError::Usage("similar [tolerance]".to_string()))?,
                )?,
            };
            report::emit(&session.similar(tolerance)?, format)?;
        }
        "stats" => report::emit(&session.stats(), format)?,
        other => {
            return Err(CliError::Usage(format!(
                "unknown command '{}', type help for commands",
                other
            )))
        }
    }

    Ok(false)
}

fn require_arg<'a>(args: &'a str, usage: &str) -> CliResult<&'a str> {
    if args.is_empty() {
        Err(CliError::Usage(usage.to_string()))
    } else {
        Ok(args)
    }
}

fn parse_top(args: &str, usage: &str) -> CliResult<usize> {
    match args {
        "" => Ok(DEFAULT_TOP),
        n => check_top(parse_number(n, usage)?),
    }
}

fn parse_number(value: &str, usage: &str) -> CliResult<usize> {
    value
        .parse()
        .map_err(|_| CliError::Usage(usage.to_string()))
}
