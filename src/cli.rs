use std::ffi::OsString;

use clap::{parser::ValueSource, ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser};

use crate::config::{Config, Mode};

#[derive(Parser, Debug)]
#[command(
    name = "mongo-explorer",
    about = "Skeleton MongoDB exploration tool",
    override_usage = "mongo-explorer [-d] [-D N] [-f FILE] [-h|-?] [-q] [-v] [-V] [ARGS]...",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Increment debug level
    #[arg(
        short = 'd',
        long = "debug",
        action = ArgAction::Append,
        num_args = 0,
        default_missing_value = "true"
    )]
    pub debug: Vec<bool>,

    /// Set debug level
    #[arg(short = 'D', long = "debug-level", value_name = "N")]
    pub debug_level: Vec<u32>,

    /// Parse FILE instead of echoing the arguments
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Vec<String>,

    /// Print this help
    #[arg(short = 'h', long = "help", visible_short_alias = '?', overrides_with = "help")]
    pub help: bool,

    /// Set quiet
    #[arg(short = 'q', long = "quiet", overrides_with = "quiet")]
    pub quiet: bool,

    /// Set verbose
    #[arg(short = 'v', long = "verbose", overrides_with = "verbose")]
    pub verbose: bool,

    /// Print version and exit
    #[arg(short = 'V', long = "version", overrides_with = "version")]
    pub version: bool,

    /// Remaining arguments, echoed back in info mode. Flag parsing stops at the first one.
    #[arg(value_name = "ARGS", trailing_var_arg = true)]
    pub rest: Vec<String>,
}

/// What the command line asks the process to do
#[derive(Debug)]
pub enum Outcome {
    Run(Config),
    Help,
    /// `bare` is set when quiet was requested before the version flag
    Version { bare: bool },
    Usage(clap::Error),
}

/// Parse `argv` (program name included) into an [`Outcome`]
pub fn resolve<I, T>(argv: I) -> Outcome
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match Args::command().try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(err) => return Outcome::Usage(err),
    };
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(err) => return Outcome::Usage(err),
    };

    // help and version end the run in the order they were given
    if args.help || args.version {
        let help_at = seen_at(&matches, "help");
        let version_at = seen_at(&matches, "version");
        match (help_at, version_at) {
            (Some(h), Some(v)) if h < v => return Outcome::Help,
            (Some(_), None) => return Outcome::Help,
            (_, Some(v)) => {
                let bare = seen_at(&matches, "quiet").is_some_and(|q| q < v);
                return Outcome::Version { bare };
            }
            (None, None) => {}
        }
    }

    let mode = match args.file.last() {
        Some(file) => Mode::Parse { file: file.clone() },
        None => Mode::Info,
    };

    Outcome::Run(Config {
        debug_level: if args.debug.is_empty() && args.debug_level.is_empty() {
            0
        } else {
            debug_level(&matches)
        },
        quiet: args.quiet,
        verbose: args.verbose,
        mode,
        rest: args.rest,
    })
}

/// Usage text, printed on stdout for help and argument errors
pub fn usage() -> String {
    Args::command().render_help().to_string()
}

/// Replays `-d` and `-D N` in command-line order: `-D` resets, `-d` adds one
fn debug_level(matches: &ArgMatches) -> u32 {
    let mut steps: Vec<(usize, Option<u32>)> = Vec::new();
    if let Some(indices) = matches.indices_of("debug") {
        steps.extend(indices.map(|at| (at, None)));
    }
    if let (Some(indices), Some(values)) = (
        matches.indices_of("debug_level"),
        matches.get_many::<u32>("debug_level"),
    ) {
        steps.extend(indices.zip(values.copied().map(Some)));
    }
    steps.sort_by_key(|(at, _)| *at);

    steps.into_iter().fold(0u32, |level, (_, set)| match set {
        Some(n) => n,
        None => level.saturating_add(1),
    })
}

fn seen_at(matches: &ArgMatches, id: &str) -> Option<usize> {
    if matches.value_source(id) != Some(ValueSource::CommandLine) {
        return None;
    }
    matches.index_of(id)
}
