pub mod handlers;

use crate::presentation::cli::Cli;
use bzdir_core::error::Result;
use bzdir_core::{RunOutcome, pipeline};
use clap::Parser;
use tracing::debug;

/// Parses the command line and runs one mode. `Ok(false)` means the run
/// completed but found failures, mismatches or comparison errors.
pub fn run() -> Result<bool> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> Result<bool> {
    let cfg = cli.to_config();
    debug!(?cfg, "resolved configuration");
    handlers::echo_config(&cfg);

    match pipeline::run(&cfg)? {
        RunOutcome::Compressed(report) => Ok(handlers::handle_batch("Compression", &report)),
        RunOutcome::Decompressed(report) => Ok(handlers::handle_batch("Decompression", &report)),
        RunOutcome::Verified(cmp) => Ok(handlers::handle_verify(&cmp)),
        RunOutcome::NotAChoice(_) => {
            handlers::handle_not_a_choice();
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bzdir").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn full_cycle_through_the_cli() {
        let root = tempfile::tempdir().unwrap();
        let (input, packed, restored) = (
            root.path().join("in"),
            root.path().join("packed"),
            root.path().join("out"),
        );
        for d in [&input, &packed, &restored] {
            fs::create_dir(d).unwrap();
        }
        fs::write(input.join("data.txt"), b"abcabcabc".repeat(300)).unwrap();
        let log = root.path().join("log.csv");
        let (i, c, d, l) = (
            input.to_str().unwrap(),
            packed.to_str().unwrap(),
            restored.to_str().unwrap(),
            log.to_str().unwrap(),
        );

        assert!(run_with(cli(&["-m", "0", "-i", i, "-c", c, "-l", l])).unwrap());
        assert!(run_with(cli(&["-m", "1", "-c", c, "-d", d, "-l", l])).unwrap());
        assert!(run_with(cli(&["-m", "2", "-i", i, "-c", c, "-d", d, "-l", l])).unwrap());

        fs::write(restored.join("data.txt"), b"changed").unwrap();
        assert!(!run_with(cli(&["-m", "2", "-i", i, "-c", c, "-d", d, "-l", l])).unwrap());
    }

    #[test]
    fn unknown_mode_succeeds_without_work() {
        let root = tempfile::tempdir().unwrap();
        let log = root.path().join("log.csv");
        assert!(run_with(cli(&["-m", "9", "-c", "packed", "-l", log.to_str().unwrap()])).unwrap());
        assert!(!log.exists());
    }

    #[test]
    fn missing_paths_fail() {
        let root = tempfile::tempdir().unwrap();
        let log = root.path().join("log.csv");
        assert!(run_with(cli(&["-m", "1", "-c", "somewhere", "-l", log.to_str().unwrap()])).is_err());
        assert!(!log.exists());
    }
}
