/// Top-level action selected for a run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Echo the positional arguments
    #[default]
    Info,
    /// Run the worker over `file`
    Parse { file: String },
}

/// Run configuration, built once from the command line and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub debug_level: u32,
    pub quiet: bool,
    pub verbose: bool,
    pub mode: Mode,
    pub rest: Vec<String>,
}

impl Config {
    /// the target file when in parse mode
    pub fn filename(&self) -> Option<&str> {
        match &self.mode {
            Mode::Info => None,
            Mode::Parse { file } => Some(file.as_str()),
        }
    }
}
