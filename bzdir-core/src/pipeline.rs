use crate::audit::{AuditLog, TransformRecord, compression_factor};
use crate::codec::Compressor;
use crate::codec::bzip2c::Bzip2Compressor;
use crate::config::{FailurePolicy, Mode, RunConfig};
use crate::error::{BzdirError, Result};
use crate::list::list_files;
use crate::verify::{ComparisonResult, compare_dirs};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Per-batch summary for the compress and decompress modes.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<TransformRecord>,
    /// Files left alone because they do not carry the compressed suffix.
    pub skipped: Vec<String>,
    /// Only populated under [`FailurePolicy::Continue`].
    pub failed: Vec<(String, BzdirError)>,
}

impl BatchReport {
    pub fn total_original_kb(&self) -> f64 {
        self.processed.iter().map(|r| r.original_file_size).sum()
    }

    pub fn total_new_kb(&self) -> f64 {
        self.processed.iter().map(|r| r.new_file_size).sum()
    }

    pub fn overall_factor(&self) -> Option<f64> {
        compression_factor(self.total_original_kb(), self.total_new_kb())
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Compressed(BatchReport),
    Decompressed(BatchReport),
    Verified(ComparisonResult),
    NotAChoice(i64),
}

/// Runs the mode selected in `cfg`. Paths are validated before anything
/// touches the filesystem, and the audit log is only opened for modes that
/// write rows.
pub fn run(cfg: &RunConfig) -> Result<RunOutcome> {
    let Some((src, dst)) = cfg.directories()? else {
        return Ok(RunOutcome::NotAChoice(cfg.mode.code()));
    };
    let codec = Bzip2Compressor;

    match cfg.mode {
        Mode::Compress => {
            with_log(cfg, |log| compress_dir(&codec, log, src, dst, cfg.on_failure))
                .map(RunOutcome::Compressed)
        }
        Mode::Decompress => {
            with_log(cfg, |log| decompress_dir(&codec, log, src, dst, cfg.on_failure))
                .map(RunOutcome::Decompressed)
        }
        Mode::Verify => compare_dirs(src, dst).map(RunOutcome::Verified),
        Mode::Unknown(v) => Ok(RunOutcome::NotAChoice(v)),
    }
}

/// Opens the audit log, runs `f`, and flushes the log whether or not `f`
/// succeeded.
fn with_log<T>(cfg: &RunConfig, f: impl FnOnce(&mut AuditLog) -> Result<T>) -> Result<T> {
    let mut log = AuditLog::open(&cfg.log_path)?;
    let out = f(&mut log);
    let flushed = log.finish();
    let out = out?;
    flushed?;
    Ok(out)
}

/// Compresses every regular file in `src` into `dst` as `<name>.bz2`.
pub fn compress_dir(
    codec: &dyn Compressor,
    log: &mut AuditLog,
    src: &Path,
    dst: &Path,
    policy: FailurePolicy,
) -> Result<BatchReport> {
    ensure_dir(dst)?;
    let names = list_files(src)?;
    info!(files = names.len(), src = %src.display(), dst = %dst.display(), "compressing");

    let mut report = BatchReport::default();
    for name in names {
        let new_name = codec.compressed_name(&name);
        let step = transform_file(src, &name, dst, &new_name, |raw| codec.compress(raw))
            .and_then(|()| log.record(src, &name, dst, &new_name));
        settle(&mut report, name, step, policy)?;
    }
    Ok(report)
}

/// Restores every `<name>.bz2` in `src` into `dst` as `<name>`.
pub fn decompress_dir(
    codec: &dyn Compressor,
    log: &mut AuditLog,
    src: &Path,
    dst: &Path,
    policy: FailurePolicy,
) -> Result<BatchReport> {
    ensure_dir(dst)?;
    let names = list_files(src)?;
    info!(files = names.len(), src = %src.display(), dst = %dst.display(), "decompressing");

    let mut report = BatchReport::default();
    for name in names {
        let Some(new_name) = codec.restored_name(&name).map(str::to_owned) else {
            warn!(file = %name, suffix = codec.extension(), "no compressed suffix, skipping");
            report.skipped.push(name);
            continue;
        };
        let origin = src.join(&name);
        let step = transform_file(src, &name, dst, &new_name, |packed| {
            codec.decompress(packed, &origin)
        })
        .and_then(|()| log.record(src, &name, dst, &new_name));
        settle(&mut report, name, step, policy)?;
    }
    Ok(report)
}

/// Reads one file, transforms it, and writes the result. The output is
/// closed before returning, so its size on disk is final.
fn transform_file(
    src: &Path,
    name: &str,
    dst: &Path,
    new_name: &str,
    f: impl FnOnce(&[u8]) -> Result<Vec<u8>>,
) -> Result<()> {
    let from = src.join(name);
    let to = dst.join(new_name);
    let raw = fs::read(&from).map_err(BzdirError::file(&from))?;
    let out = f(&raw)?;
    fs::write(&to, &out).map_err(BzdirError::file(&to))?;
    debug!(from = %from.display(), to = %to.display(), in_len = raw.len(), out_len = out.len(), "transformed");
    Ok(())
}

fn settle(
    report: &mut BatchReport,
    name: String,
    step: Result<TransformRecord>,
    policy: FailurePolicy,
) -> Result<()> {
    match (step, policy) {
        (Ok(row), _) => report.processed.push(row),
        (Err(e), FailurePolicy::Continue) => {
            warn!(file = %name, error = %e, "file failed, continuing");
            report.failed.push((name, e));
        }
        (Err(e), FailurePolicy::Abort) => return Err(e),
    }
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    let md = fs::metadata(dir).map_err(BzdirError::dir(dir))?;
    if md.is_dir() {
        Ok(())
    } else {
        Err(BzdirError::DirectoryInaccessible {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_totals() {
        let row = |o: f64, n: f64| TransformRecord {
            date: String::new(),
            original_path: String::new(),
            filename: String::new(),
            destination_path: String::new(),
            original_file_size: o,
            new_file_size: n,
            compression_factor: compression_factor(o, n),
        };
        let report = BatchReport {
            processed: vec![row(600.0, 100.0), row(400.0, 150.0)],
            ..Default::default()
        };
        assert_eq!(report.total_original_kb(), 1000.0);
        assert_eq!(report.total_new_kb(), 250.0);
        assert_eq!(report.overall_factor(), Some(4.0));
        assert!(report.is_clean());
        assert_eq!(BatchReport::default().overall_factor(), None);
    }

    #[test]
    fn unknown_mode_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("log.csv");
        let cfg = RunConfig {
            mode: Mode::Unknown(5),
            log_path: log_path.clone(),
            ..Default::default()
        };
        assert!(matches!(run(&cfg).unwrap(), RunOutcome::NotAChoice(5)));
        assert!(!log_path.exists());
    }
}
