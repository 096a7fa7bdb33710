/// Module for error handling
pub mod error;
/// Module for the extension-to-preset table
pub mod format;
/// Module for locating the loudgain binary
pub mod resolve;

pub use crate::error::Error;
pub use crate::format::AudioFormat;
pub use crate::resolve::Loudgain;

use log::{debug, info, warn};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use walkdir::WalkDir;

/// Configuration options for a library scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Root of the music library. Every directory below it, itself included, is visited.
    pub root_dir: PathBuf,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            root_dir: PathBuf::from("."),
        }
    }
}

/// What a single directory holds, judged from its own files only
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Nothing but subdirectories (or nothing at all)
    NoFiles,
    /// Files, but none with a recognized audio extension
    NoAudio,
    /// More than one recognized audio format, in the order first seen
    Mixed(Vec<AudioFormat>),
    /// Exactly one audio format; `files` are the visible files of that format, sorted
    Album {
        format: AudioFormat,
        files: Vec<PathBuf>,
    },
}

/// Result of one loudgain run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    Succeeded,
    /// Non-zero exit; the code is `None` when the tool was killed by a signal
    Failed(Option<i32>),
}

/// A fully prepared loudgain command for one album directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub working_dir: PathBuf,
}

impl Invocation {
    /// Builds the command line for an album: preset tokens followed by the files
    ///
    /// # Arguments
    /// * `loudgain` - Resolved tool to run
    /// * `dir` - Album directory, used as the child's working directory
    /// * `format` - The single audio format found in `dir`
    /// * `files` - Files of that format, passed through in the given order
    pub fn for_album(
        loudgain: &Loudgain,
        dir: impl AsRef<Path>,
        format: AudioFormat,
        files: &[PathBuf],
    ) -> Self {
        let args = format
            .preset()
            .iter()
            .map(OsString::from)
            .chain(files.iter().map(|f| f.clone().into_os_string()))
            .collect();
        Invocation {
            program: loudgain.program(),
            args,
            working_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Full argument vector, program first
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }

    /// Runs loudgain with inherited stdio and waits for it to exit.
    ///
    /// Only a failure to start the process is an error; a non-zero exit is
    /// reported as [`ToolOutcome::Failed`].
    pub fn run(&self) -> Result<ToolOutcome, Error> {
        debug!("Running {:?}", self.argv());
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                dir: self.working_dir.clone(),
                source,
            })?;
        Ok(if status.success() {
            ToolOutcome::Succeeded
        } else {
            ToolOutcome::Failed(status.code())
        })
    }
}

/// Tally of what happened to each directory during a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Directories loudgain was run on, whatever its exit status
    pub dispatched: usize,
    pub empty: usize,
    pub no_audio: usize,
    pub mixed: usize,
    /// Directories and paths that could not be read, each counted once
    pub unreadable: usize,
    /// Directories where loudgain exited unsuccessfully
    pub failed: Vec<PathBuf>,
}

impl ScanReport {
    /// Number of directories visited but not handed to loudgain
    pub fn skipped(&self) -> usize {
        self.empty + self.no_audio + self.mixed + self.unreadable
    }

    pub fn log_summary(&self) {
        info!(
            "Scan complete. {} directories processed, {} skipped ({} empty, {} without audio, {} mixed, {} unreadable).",
            self.dispatched,
            self.skipped(),
            self.empty,
            self.no_audio,
            self.mixed,
            self.unreadable
        );
        if !self.failed.is_empty() {
            warn!("loudgain reported errors in the following directories:");
            for dir in &self.failed {
                warn!("  {}", dir.display());
            }
        }
    }
}

/// Validates scan options for correctness
///
/// # Arguments
/// * `options` - Reference to ScanOptions struct
pub fn validate_options(options: &ScanOptions) -> Result<(), Error> {
    if !options.root_dir.is_dir() {
        return Err(Error::NotADirectory(options.root_dir.clone()));
    }
    Ok(())
}

/// Classifies a directory by the audio formats among its immediate files
///
/// Anything that is not a directory (after following symlinks) counts as a
/// file. Subdirectories are ignored; they are classified on their own visit.
/// Hidden files take part in classification but are never handed to
/// loudgain, so AppleDouble companions like `._01.flac` stay out of the album.
///
/// # Arguments
/// * `dir` - Directory to inspect
///
/// # Returns
/// The classification, with album files sorted by path
pub fn classify_directory(dir: impl AsRef<Path>) -> Result<Classification, Error> {
    let dir = dir.as_ref();
    let list_err = |source: std::io::Error| Error::ListDirectory {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let path = entry.map_err(list_err)?.path();
        if !path.is_dir() {
            files.push(path);
        }
    }
    if files.is_empty() {
        return Ok(Classification::NoFiles);
    }
    files.sort();

    let mut formats: Vec<AudioFormat> = Vec::new();
    for file in &files {
        let format = AudioFormat::from_path(file);
        debug!(
            "  {:?} -> {}",
            file.file_name().unwrap_or_default(),
            format.map_or("unrecognized", AudioFormat::extension)
        );
        if let Some(format) = format {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
    }

    Ok(match formats.len() {
        0 => Classification::NoAudio,
        1 => {
            let format = formats[0];
            let files: Vec<PathBuf> = files
                .into_iter()
                .filter(|f| AudioFormat::from_path(f) == Some(format) && !is_hidden(f))
                .collect();
            if files.is_empty() {
                Classification::NoAudio
            } else {
                Classification::Album { format, files }
            }
        }
        _ => Classification::Mixed(formats),
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.as_encoded_bytes().starts_with(b"."))
}

/// Runs loudgain once per album directory under `options.root_dir`
///
/// # Arguments
/// * `options` - Scan options; the root must be an existing directory
/// * `loudgain` - Resolved tool to invoke
///
/// # Returns
/// A report of every directory's outcome. Tool failures are recorded there;
/// only a failure to launch the tool ends the scan early.
pub fn scan_library(options: &ScanOptions, loudgain: &Loudgain) -> Result<ScanReport, Error> {
    scan_library_with(options, loudgain, Invocation::run)
}

/// Walks the library like [`scan_library`], handing each album to `dispatch`
///
/// Directories are visited parent first, siblings in file-name order. The
/// root is made absolute first so every file passed on is an absolute path.
pub fn scan_library_with<F>(
    options: &ScanOptions,
    loudgain: &Loudgain,
    mut dispatch: F,
) -> Result<ScanReport, Error>
where
    F: FnMut(&Invocation) -> Result<ToolOutcome, Error>,
{
    validate_options(options)?;
    let root = std::path::absolute(&options.root_dir).map_err(|source| Error::Io {
        path: options.root_dir.clone(),
        source,
    })?;

    info!("Scanning {}...", root.display());
    let mut report = ScanReport::default();
    // directories already reported by classify_directory
    let mut unreadable: HashSet<PathBuf> = HashSet::new();

    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.path().is_some_and(|p| unreadable.contains(p)) {
                    debug!("Walk error for already skipped directory: {}", e);
                } else {
                    warn!("Skipping unreadable path: {}", e);
                    report.unreadable += 1;
                }
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();

        match classify_directory(dir) {
            Err(e) => {
                warn!("{}", e);
                report.unreadable += 1;
                unreadable.insert(dir.to_path_buf());
            }
            Ok(Classification::NoFiles) => {
                info!("No files found in directory {}", dir.display());
                report.empty += 1;
            }
            Ok(Classification::NoAudio) => {
                info!("No audio files found in directory {}", dir.display());
                report.no_audio += 1;
            }
            Ok(Classification::Mixed(formats)) => {
                let found: Vec<&str> = formats.iter().map(|f| f.extension()).collect();
                warn!(
                    "Multiple audio file types detected in directory {} ({}), skipping",
                    dir.display(),
                    found.join(", ")
                );
                report.mixed += 1;
            }
            Ok(Classification::Album { format, files }) => {
                info!(
                    "Scanning {} {} file(s) in {}",
                    files.len(),
                    format,
                    dir.display()
                );
                let invocation = Invocation::for_album(loudgain, dir, format, &files);
                report.dispatched += 1;
                if let ToolOutcome::Failed(code) = dispatch(&invocation)? {
                    match code {
                        Some(code) => warn!(
                            "loudgain exited with status {} in directory {}",
                            code,
                            dir.display()
                        ),
                        None => warn!(
                            "loudgain was terminated by a signal in directory {}",
                            dir.display()
                        ),
                    }
                    report.failed.push(dir.to_path_buf());
                }
            }
        }
    }

    Ok(report)
}
