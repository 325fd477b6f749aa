use crate::error::{BzdirError, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder the command line uses for "path not provided".
pub const BLANK_SENTINEL: &str = " ";

pub const DEFAULT_LOG_PATH: &str = "./compression_log.csv";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Verify,
    Unknown(i64),
}

impl From<i64> for Mode {
    fn from(v: i64) -> Self {
        match v {
            0 => Mode::Compress,
            1 => Mode::Decompress,
            2 => Mode::Verify,
            other => Mode::Unknown(other),
        }
    }
}

impl Mode {
    /// The integer selector this mode was parsed from.
    pub fn code(&self) -> i64 {
        match self {
            Mode::Compress => 0,
            Mode::Decompress => 1,
            Mode::Verify => 2,
            Mode::Unknown(v) => *v,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What to do when a single file in a batch fails.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run on the first failing file.
    #[default]
    Abort,
    /// Record the failure in the batch report and move on.
    Continue,
}

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub mode: Mode,
    pub input_path: Option<PathBuf>,
    pub compressed_path: Option<PathBuf>,
    pub decompressed_path: Option<PathBuf>,
    pub log_path: PathBuf,
    pub on_failure: FailurePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Compress,
            input_path: None,
            compressed_path: None,
            decompressed_path: None,
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            on_failure: FailurePolicy::Abort,
        }
    }
}

/// Blank or whitespace-only strings mean the path was not supplied.
pub fn path_arg(raw: &str) -> Option<PathBuf> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(PathBuf::from(raw))
    }
}

impl RunConfig {
    pub fn new(
        mode: i64,
        input_path: &str,
        compressed_path: &str,
        decompressed_path: &str,
        log_path: &str,
    ) -> Self {
        Self {
            mode: Mode::from(mode),
            input_path: path_arg(input_path),
            compressed_path: path_arg(compressed_path),
            decompressed_path: path_arg(decompressed_path),
            log_path: path_arg(log_path).unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_PATH)),
            on_failure: FailurePolicy::Abort,
        }
    }

    /// Source and destination directories for the selected mode, checked
    /// before any file I/O happens. `Ok(None)` for an unknown mode.
    pub fn directories(&self) -> Result<Option<(&Path, &Path)>> {
        let (mode, src, dst, flags) = match self.mode {
            Mode::Compress => (
                0,
                &self.input_path,
                &self.compressed_path,
                "input_path (-i) and compressed_path (-c)",
            ),
            Mode::Decompress => (
                1,
                &self.compressed_path,
                &self.decompressed_path,
                "compressed_path (-c) and decompressed_path (-d)",
            ),
            // verification compares the originals against the restored copies
            Mode::Verify => (
                2,
                &self.input_path,
                &self.decompressed_path,
                "input_path (-i) and decompressed_path (-d)",
            ),
            Mode::Unknown(_) => return Ok(None),
        };
        match (src, dst) {
            (Some(s), Some(d)) => Ok(Some((s.as_path(), d.as_path()))),
            _ => Err(BzdirError::MissingArgument { mode, flags }),
        }
    }
}
