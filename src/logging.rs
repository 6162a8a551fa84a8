use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{Level, LevelFilter, Log, Record};

use crate::error::{Error, Result};

const PREFIX: &str = "mongo-explorer-";
const SUFFIX: &str = ".log";

/// Per-run log file. Dropping the handle flushes and closes the file.
pub struct RunLog {
    path: PathBuf,
    logger: env_logger::Logger,
}

impl RunLog {
    /// creates a uniquely named log file in `dir`, or the system temp dir when `None`
    pub fn create(dir: Option<&Path>) -> Result<Self> {
        let dir = dir.map_or_else(std::env::temp_dir, Path::to_path_buf);
        let (file, path) = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile_in(&dir)
            .and_then(|tmp| tmp.keep().map_err(|err| err.error))
            .map_err(|source| Error::LogFile { dir, source })?;

        let logger = env_logger::Builder::new()
            .filter_level(LevelFilter::Trace)
            .write_style(env_logger::WriteStyle::Never)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} -  {} - {}",
                    buf.timestamp_millis(),
                    record.level(),
                    record.args()
                )
            })
            .target(env_logger::Target::Pipe(Box::new(file)))
            .build();

        Ok(Self { path, logger })
    }

    /// log dir from `LOG_DIR`, unset or empty means the system default
    pub fn dir_from_env() -> Option<PathBuf> {
        std::env::var_os("LOG_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        self.logger.log(
            &Record::builder()
                .args(args)
                .level(level)
                .target(module_path!())
                .build(),
        );
    }

    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Level::Info, format_args!("{msg}"));
    }

    pub fn debug(&self, msg: impl fmt::Display) {
        self.log(Level::Debug, format_args!("{msg}"));
    }

    pub fn trace(&self, msg: impl fmt::Display) {
        self.log(Level::Trace, format_args!("{msg}"));
    }

    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Level::Error, format_args!("{msg}"));
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        self.logger.flush();
    }
}
