use std::ffi::OsString;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "loudgain not found. Make sure it's in your PATH or the same directory as this program{}",
        program_dir.as_ref().map(|d| format!(" ({})", d.display())).unwrap_or_default()
    )]
    LoudgainNotFound { program_dir: Option<PathBuf> },
    #[error("Directory {0:?} does not exist")]
    NotADirectory(PathBuf),
    #[error("Failed to list directory {path:?}: {source}")]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to launch {program:?} in {dir:?}: {source}")]
    Launch {
        program: OsString,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
