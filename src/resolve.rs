use crate::error::Error;
use log::debug;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Base name of the external tool, as looked up on the search path
pub const LOUDGAIN: &str = "loudgain";

/// File name of the tool when it sits next to this program
#[cfg(windows)]
pub const LOUDGAIN_EXECUTABLE: &str = "loudgain.exe";
#[cfg(not(windows))]
pub const LOUDGAIN_EXECUTABLE: &str = "loudgain";

/// How the loudgain executable is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loudgain {
    /// Absolute path of a binary placed beside this program
    Colocated(PathBuf),
    /// Bare name, left for the OS to resolve through `PATH` at spawn time
    OnPath,
}

impl Loudgain {
    /// Resolves loudgain for the running process.
    ///
    /// Looks beside the current executable first, then on `PATH`.
    pub fn resolve() -> Result<Self, Error> {
        let program_dir = std::env::current_exe()
            .and_then(|exe| exe.canonicalize())
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let search_path = std::env::var_os("PATH");
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve_in(program_dir.as_deref(), search_path.as_deref(), &cwd)
    }

    /// Resolves loudgain against an explicit program directory and search path
    ///
    /// # Arguments
    /// * `program_dir` - Directory holding this program, checked for a co-located binary
    /// * `search_path` - `PATH`-style list of directories to search for `loudgain`
    /// * `cwd` - Directory that relative search path entries are resolved against;
    ///   the spawn resolves them from the process working directory, so pass that
    ///
    /// # Returns
    /// The co-located binary if present, otherwise [`Loudgain::OnPath`] if the
    /// search path has one, otherwise [`Error::LoudgainNotFound`]
    pub fn resolve_in(
        program_dir: Option<&Path>,
        search_path: Option<&OsStr>,
        cwd: &Path,
    ) -> Result<Self, Error> {
        if let Some(dir) = program_dir {
            let candidate = dir.join(LOUDGAIN_EXECUTABLE);
            if candidate.is_file() {
                let candidate = std::path::absolute(&candidate).unwrap_or(candidate);
                debug!("Found co-located loudgain at {:?}", candidate);
                return Ok(Self::Colocated(candidate));
            }
        }

        match which::which_in(LOUDGAIN, search_path, cwd) {
            Ok(found) => {
                debug!("Found loudgain on PATH at {:?}", found);
                Ok(Self::OnPath)
            }
            Err(_) => Err(Error::LoudgainNotFound {
                program_dir: program_dir.map(Path::to_path_buf),
            }),
        }
    }

    /// The program to hand to the OS when spawning the tool
    pub fn program(&self) -> OsString {
        match self {
            Self::Colocated(path) => path.clone().into_os_string(),
            Self::OnPath => OsString::from(LOUDGAIN),
        }
    }
}

impl fmt::Display for Loudgain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Colocated(path) => write!(f, "{}", path.display()),
            Self::OnPath => write!(f, "{LOUDGAIN} (from PATH)"),
        }
    }
}
