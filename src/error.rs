use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: cannot open: {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: cannot open: {source}", .path.display())]
    OpenOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot create log file in {}: {source}", .dir.display())]
    LogFile {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::OpenInput { .. }
            | Error::OpenOutput { .. }
            | Error::LogFile { .. }
            | Error::Io(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
