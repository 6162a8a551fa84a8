use std::path::Path;

pub const TAG: &str = "[mongo-explorer]";

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// bare prints only the version number, for scripts
pub fn version_banner(bare: bool) -> String {
    if bare {
        version().to_string()
    } else {
        format!("{TAG}  Version: {}", version())
    }
}

pub fn working_dir_notice(cwd: Option<&Path>) -> String {
    match cwd {
        Some(cwd) => format!("{TAG}  Working directory is {}", cwd.display()),
        None => format!("{TAG}  Working directory is unknown"),
    }
}

pub fn debug_notice(level: u32) -> String {
    format!("{TAG}  Debugging level set to {level}")
}

/// Render items as a bracketed, quoted list: `["a", "b"]`
pub fn sequence_repr(items: &[String]) -> String {
    format!("{items:?}")
}
