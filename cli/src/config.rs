use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{CliError, CliResult};

pub const DEFAULT_CENTER: &str = "Kevin Bacon";

pub const DEFAULT_TOLERANCE: f64 = 0.1;

pub const DEFAULT_TOP: usize = 20;

const MAX_TOLERANCE: f64 = 100.0;

const MAX_TOP: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Options shared by every subcommand.
///
/// Each value resolves as explicit flag > environment variable > default.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Actor records, one `id|name` per line
    #[arg(long, env = "SIXDEG_ACTORS", global = true)]
    pub actors: Option<PathBuf>,

    /// Movie records, one `id|title` per line
    #[arg(long, env = "SIXDEG_MOVIES", global = true)]
    pub movies: Option<PathBuf>,

    /// Cast records, one `movie_id|actor_id` per line
    #[arg(long, env = "SIXDEG_MOVIE_ACTORS", global = true)]
    pub movie_actors: Option<PathBuf>,

    /// Actor at the center of the universe
    #[arg(long, env = "SIXDEG_CENTER", default_value = DEFAULT_CENTER, global = true)]
    pub center: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Locations of the three input files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFiles {
    pub actors: PathBuf,
    pub movies: PathBuf,
    pub movie_actors: PathBuf,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data: DataFiles,
    pub center: String,
    pub format: OutputFormat,
}

impl Settings {
    pub fn from_args(args: &GlobalArgs) -> CliResult<Self> {
        let center = args.center.trim();
        if center.is_empty() {
            return Err(CliError::Config("--center must not be empty".to_string()));
        }

        Ok(Self {
            data: DataFiles {
                actors: require_path(&args.actors, "--actors", "SIXDEG_ACTORS")?,
                movies: require_path(&args.movies, "--movies", "SIXDEG_MOVIES")?,
                movie_actors: require_path(
                    &args.movie_actors,
                    "--movie-actors",
                    "SIXDEG_MOVIE_ACTORS",
                )?,
            },
            center: center.to_string(),
            format: args.format,
        })
    }
}

/// Read a path option, treating an empty value as unset.
fn require_path(value: &Option<PathBuf>, flag: &str, env: &str) -> CliResult<PathBuf> {
    value
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
        .cloned()
        .ok_or_else(|| CliError::Config(format!("{} not set and {} is empty", flag, env)))
}

/// Validate a similarity tolerance.
pub fn check_tolerance(value: f64) -> CliResult<f64> {
    if !(0.0..=MAX_TOLERANCE).contains(&value) {
        return Err(CliError::Config(format!(
            "tolerance must be between 0 and {}, got {}",
            MAX_TOLERANCE, value
        )));
    }
    Ok(value)
}

/// Validate a ranking size.
pub fn check_top(value: usize) -> CliResult<usize> {
    if value == 0 || value > MAX_TOP {
        return Err(CliError::Config(format!(
            "top must be between 1 and {}, got {}",
            MAX_TOP, value
        )));
    }
    Ok(value)
}
