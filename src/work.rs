use std::fmt;
use std::future::Future;
use std::path::PathBuf;

use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};

use crate::error::{Error, Result};
use crate::logging::RunLog;

/// The first two comma-separated columns of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub one: String,
    pub two: Option<String>,
}

impl Record {
    pub fn split(row: &str) -> Self {
        let mut cols = row.split(',');
        Self {
            one: cols.next().unwrap_or_default().to_string(),
            two: cols.next().map(str::to_string),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.one)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// number of rows read
    pub rows: usize,
    pub output: PathBuf,
}

/// Processing applied to the file given with `--file`
pub trait Worker {
    fn run(&self, file: &str, log: &RunLog) -> impl Future<Output = Result<Summary>> + Send;
}

/// Reads `<file>.log` and appends every line, wrapped in brackets, to `<file>.dat`
#[derive(Debug, Default, Clone, Copy)]
pub struct LineFileWorker;

impl LineFileWorker {
    pub fn paths(file: &str) -> (PathBuf, PathBuf) {
        (
            PathBuf::from(format!("{file}.log")),
            PathBuf::from(format!("{file}.dat")),
        )
    }
}

impl Worker for LineFileWorker {
    async fn run(&self, file: &str, log: &RunLog) -> Result<Summary> {
        let (input, output) = Self::paths(file);
        log.info(format_args!(
            "reformatting {} into {}",
            input.display(),
            output.display()
        ));

        let reader = match File::open(&input).await {
            Ok(f) => BufReader::new(f),
            Err(source) => return Err(Error::OpenInput { path: input, source }),
        };
        let mut writer = match OpenOptions::new()
            .append(true)
            .create(true)
            .open(&output)
            .await
        {
            Ok(f) => BufWriter::new(f),
            Err(source) => return Err(Error::OpenOutput { path: output, source }),
        };

        let mut rows = 0;
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.replace(['\r', '\n'], "");
            rows += 1;
            let record = Record::split(&line);
            log.trace(format_args!(
                "row {rows}: {record} / {}",
                record.two.as_deref().unwrap_or("-")
            ));
            writer.write_all(format!("[{line}]\n").as_bytes()).await?;
        }
        writer.flush().await?;
        log.info(format_args!("read {rows} rows"));

        Ok(Summary { rows, output })
    }
}
