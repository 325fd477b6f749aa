use bzdir_core::config::{BLANK_SENTINEL, DEFAULT_LOG_PATH};
use bzdir_core::{FailurePolicy, RunConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compresses all files in a folder using BZ2 compression. Multiple modes available (see -m)",
    long_about = None
)]
pub struct Cli {
    /// Process mode: 0 = compress all files in source folder (-i) and write to
    /// compressed folder (-c), 1 = decompress files in compressed folder (-c) and
    /// write to decompressed folder (-d), 2 = check decompressed files (in -d)
    /// against source files (in -i)
    #[arg(short = 'm', long = "process_mode", default_value_t = 0, allow_negative_numbers = true)]
    pub process_mode: i64,

    /// Path to input files
    #[arg(short = 'i', long = "input_path", default_value = BLANK_SENTINEL)]
    pub input_path: String,

    /// Path to compressed files
    #[arg(short = 'c', long = "compressed_path", required = true)]
    pub compressed_path: String,

    /// Path to decompressed files
    #[arg(short = 'd', long = "decompressed_path", default_value = BLANK_SENTINEL)]
    pub decompressed_path: String,

    /// Path and name for the output log file (.csv format)
    #[arg(short = 'l', long = "log_path", default_value = DEFAULT_LOG_PATH)]
    pub log_path: String,

    /// Record failing files and continue with the rest of the batch
    #[arg(long = "keep-going")]
    pub keep_going: bool,
}

impl Cli {
    pub fn to_config(&self) -> RunConfig {
        let mut cfg = RunConfig::new(
            self.process_mode,
            &self.input_path,
            &self.compressed_path,
            &self.decompressed_path,
            &self.log_path,
        );
        if self.keep_going {
            cfg.on_failure = FailurePolicy::Continue;
        }
        cfg
    }
}
