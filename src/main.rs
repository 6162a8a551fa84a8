use std::ffi::OsString;

use cli::Outcome;
use config::{Config, Mode};
use logging::RunLog;
use work::{LineFileWorker, Worker};

mod cli;
mod config;
mod error;
mod logging;
mod util;
mod work;

#[tokio::main]
async fn main() {
    let code = tokio::select! {
        code = run(std::env::args_os()) => code,
        Ok(()) = tokio::signal::ctrl_c() => {
            println!("{}  Interrupted!", util::TAG);
            0
        }
    };
    std::process::exit(code);
}

async fn run(argv: impl IntoIterator<Item = OsString>) -> i32 {
    // HOME is never read afterwards, but a run without it does nothing
    if std::env::var_os("HOME").is_none() {
        println!("Set HOME environment variable and re-run");
        return 0;
    }

    let log = match RunLog::create(RunLog::dir_from_env().as_deref()) {
        Ok(log) => log,
        Err(err) => {
            eprintln!("{}  {err}", util::TAG);
            return err.exit_code();
        }
    };

    let config = match cli::resolve(argv) {
        Outcome::Run(config) => config,
        Outcome::Help => {
            print!("{}", cli::usage());
            return 0;
        }
        Outcome::Version { bare } => {
            println!("{}", util::version_banner(bare));
            return 1;
        }
        Outcome::Usage(err) => {
            log.error(format_args!("bad arguments: {:?}", err.kind()));
            eprintln!("{}", err.render().to_string().trim_end());
            print!("{}", cli::usage());
            return 1;
        }
    };

    let cwd = std::env::current_dir().ok();
    eprintln!("{}", util::working_dir_notice(cwd.as_deref()));
    if config.debug_level > 0 {
        eprintln!("{}", util::debug_notice(config.debug_level));
    }
    if config.verbose {
        eprintln!("{}  Logging to {}", util::TAG, log.path().display());
        log.debug(format_args!("{config:?}"));
        if let Some(file) = config.filename() {
            log.debug(format_args!("target file {file}"));
        }
    }

    dispatch(&config, &LineFileWorker, &log).await
}

async fn dispatch<W: Worker>(config: &Config, worker: &W, log: &RunLog) -> i32 {
    match &config.mode {
        Mode::Info => {
            println!("{}", util::sequence_repr(&config.rest));
        }
        Mode::Parse { file } => {
            log.info("Parsing");
            match worker.run(file, log).await {
                Ok(summary) => {
                    log.info(format_args!("wrote {}", summary.output.display()));
                    if !config.quiet {
                        println!("Read {} data items...", summary.rows);
                    }
                }
                Err(err) => {
                    log.error(&err);
                    eprintln!("{err}");
                    return err.exit_code();
                }
            }
        }
    }
    0
}
