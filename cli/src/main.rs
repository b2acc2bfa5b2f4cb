//! `sixdeg`: degrees of separation over an actor collaboration graph.
//!
//! Loads actor, movie and cast records, builds the shortest-path tree of a
//! center actor, and answers path, reachability and separation queries,
//! either as one-shot subcommands or in an interactive session.

use std::process;

use clap::{Parser, Subcommand};

mod config;
mod error;
mod load;
mod repl;
mod report;
mod state;

use config::{check_tolerance, check_top, GlobalArgs, Settings, DEFAULT_TOLERANCE, DEFAULT_TOP};
use error::{CliError, CliResult};
use state::Session;

#[derive(Parser)]
#[command(
    name = "sixdeg",
    version,
    about = "Degrees of separation over an actor collaboration graph"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Graph size, load time and reach of the center
    Stats,
    /// Separation and path from an actor to the center
    Path {
        /// Actor name, case sensitive
        actor: String,
    },
    /// Actors with no path to the center
    Missing,
    /// Average separation of every actor connected to the center
    Average,
    /// Actors exactly N steps from the center
    Within {
        steps: usize,
    },
    /// Actors connected to the center, ranked by direct links in its tree
    Degree {
        #[arg(long, default_value_t = DEFAULT_TOP)]
        top: usize,
    },
    /// Every actor ranked by number of costars
    Costars {
        #[arg(long, default_value_t = DEFAULT_TOP)]
        top: usize,
    },
    /// Actors whose own average separation is close to the center's
    Similar {
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f64,
    },
    /// Interactive session (the default)
    Shell,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("sixdeg: {}", e);
        let code = match e {
            CliError::Config(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}

/// `RUST_LOG` wins; otherwise warnings, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: Cli) -> CliResult<()> {
    let settings = Settings::from_args(&cli.global)?;

    // Validate arguments before paying for the load
    let command = cli.command.unwrap_or(Commands::Shell);
    match &command {
        Commands::Degree { top } | Commands::Costars { top } => {
            check_top(*top)?;
        }
        Commands::Similar { tolerance } => {
            check_tolerance(*tolerance)?;
        }
        _ => {}
    }

    let (graph, summary) = load::load(&settings.data)?;
    let mut session = Session::new(graph, summary, &settings.center)?;
    let format = settings.format;

    match command {
        Commands::Stats => report::emit(&session.stats(), format),
        Commands::Path { actor } => report::emit(&session.path(&actor)?, format),
        Commands::Missing => report::emit(&session.missing(), format),
        Commands::Average => report::emit(&session.average()?, format),
        Commands::Within { steps } => report::emit(&session.within(steps)?, format),
        Commands::Degree { top } => report::emit(&session.degree(top), format),
        Commands::Costars { top } => report::emit(&session.costars(top), format),
        Commands::Similar { tolerance } => report::emit(&session.similar(tolerance)?, format),
        Commands::Shell => repl::run(&mut session, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommand_with_globals() {
        let cli = Cli::try_parse_from([
            "sixdeg",
            "path",
            "Tom Hanks",
            "--actors",
            "a.txt",
            "--movies",
            "m.txt",
            "--movie-actors",
            "ma.txt",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.global.format, config::OutputFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Path { ref actor }) if actor == "Tom Hanks"));
    }

    #[test]
    fn test_parse_ranking_subcommands() {
        let cli = Cli::try_parse_from(["sixdeg", "degree", "--top", "5"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Degree { top: 5 })));

        let cli = Cli::try_parse_from(["sixdeg", "costars"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Costars { top: DEFAULT_TOP })));
    }

    #[test]
    fn test_no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["sixdeg", "--center", "Tom Hanks"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.global.center, "Tom Hanks");
    }
}
