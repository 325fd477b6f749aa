use crate::error::{BzdirError, Result};
use crate::list::size_kb;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tracing::{debug, warn};

pub const LOG_HEADER: [&str; 7] = [
    "Date",
    "Original_path",
    "Filename",
    "Destination_path",
    "Original_file_size",
    "New_file_size",
    "Compression_factor",
];

const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[month]/[day]/[year], [hour]:[minute]:[second]");

/// One audit-log row. Field order is the column order of [`LOG_HEADER`].
#[derive(Clone, Debug, Serialize)]
pub struct TransformRecord {
    pub date: String,
    pub original_path: String,
    pub filename: String,
    pub destination_path: String,
    pub original_file_size: f64,
    pub new_file_size: f64,
    /// `None` when the destination is empty; written as an empty field.
    pub compression_factor: Option<f64>,
}

/// `original / new`, undefined for an empty destination.
pub fn compression_factor(original_kb: f64, new_kb: f64) -> Option<f64> {
    (new_kb > 0.0).then(|| original_kb / new_kb)
}

pub fn timestamp_now() -> Result<String> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    now.format(TIMESTAMP)
        .map_err(|e| BzdirError::Io(io::Error::other(e)))
}

/// Append-only CSV audit trail, one handle per run.
pub struct AuditLog {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl AuditLog {
    /// Creates the log with its header row, or appends to an existing file.
    /// Existing content is trusted as is; its header is never checked.
    pub fn open(path: &Path) -> Result<Self> {
        let exists = path.try_exists().map_err(BzdirError::file(path))?;
        let file = if exists {
            OpenOptions::new()
                .append(true)
                .open(path)
                .map_err(BzdirError::file(path))?
        } else {
            File::create(path).map_err(BzdirError::file(path))?
        };

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if !exists {
            writer.write_record(LOG_HEADER)?;
            debug!(path = %path.display(), "created audit log");
        }
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    /// Stats both files on disk and appends a row. The destination file must
    /// already be fully written.
    pub fn record(
        &mut self,
        src_dir: &Path,
        name: &str,
        dst_dir: &Path,
        new_name: &str,
    ) -> Result<TransformRecord> {
        let original_file_size = size_kb(src_dir, &[name])?;
        let new_file_size = size_kb(dst_dir, &[new_name])?;
        let compression_factor = compression_factor(original_file_size, new_file_size);
        if compression_factor.is_none() {
            warn!(file = new_name, "destination is empty; compression factor undefined");
        }

        let row = TransformRecord {
            date: timestamp_now()?,
            original_path: src_dir.display().to_string(),
            filename: name.to_owned(),
            destination_path: dst_dir.display().to_string(),
            original_file_size,
            new_file_size,
            compression_factor,
        };
        self.writer.serialize(&row)?;
        Ok(row)
    }

    /// Flushes buffered rows. Dropping the log also flushes, but drops
    /// swallow the error.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush().map_err(BzdirError::file(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn factor_is_ratio_of_sizes() {
        let f = compression_factor(1000.0, 250.0).unwrap();
        assert!((f - 4.0).abs() < 1e-9);
        assert_eq!(compression_factor(12.0, 0.0), None);
    }

    #[test]
    fn timestamp_shape() {
        let ts = timestamp_now().unwrap();
        // MM/DD/YYYY, HH:MM:SS
        assert_eq!(ts.len(), 20);
        assert_eq!(&ts[2..3], "/");
        assert_eq!(&ts[5..6], "/");
        assert_eq!(&ts[10..12], ", ");
        assert_eq!(&ts[14..15], ":");
    }

    #[test]
    fn header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("log.csv");
        AuditLog::open(&log_path).unwrap().finish().unwrap();
        AuditLog::open(&log_path).unwrap().finish().unwrap();

        let text = fs::read_to_string(&log_path).unwrap();
        assert_eq!(
            text,
            "Date,Original_path,Filename,Destination_path,Original_file_size,New_file_size,Compression_factor\n"
        );
    }

    #[test]
    fn existing_content_is_not_validated() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("log.csv");
        fs::write(&log_path, "whatever was here\n").unwrap();
        AuditLog::open(&log_path).unwrap().finish().unwrap();
        assert_eq!(fs::read_to_string(&log_path).unwrap(), "whatever was here\n");
    }

    #[test]
    fn record_row_contents() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("a.bin"), vec![7u8; 4000]).unwrap();
        fs::write(dst.join("a.bin.bz2"), vec![1u8; 1000]).unwrap();
        fs::write(src.join("e"), b"abc").unwrap();
        fs::write(dst.join("e.bz2"), b"").unwrap();

        let log_path = dir.path().join("log.csv");
        let mut log = AuditLog::open(&log_path).unwrap();
        let row = log.record(&src, "a.bin", &dst, "a.bin.bz2").unwrap();
        assert_eq!(row.original_file_size, 4.0);
        assert_eq!(row.new_file_size, 1.0);
        assert_eq!(row.compression_factor, Some(4.0));
        let empty = log.record(&src, "e", &dst, "e.bz2").unwrap();
        assert_eq!(empty.compression_factor, None);
        log.finish().unwrap();

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&log_path)
            .unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], src.display().to_string());
        assert_eq!(&rows[0][2], "a.bin");
        assert_eq!(&rows[0][3], dst.display().to_string());
        assert_eq!(&rows[0][4], "4.0");
        assert_eq!(&rows[0][5], "1.0");
        assert_eq!(&rows[0][6], "4.0");
        assert_eq!(&rows[1][6], "");
    }

    #[test]
    fn record_missing_destination_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a"), b"abc").unwrap();
        let mut log = AuditLog::open(&dir.path().join("log.csv")).unwrap();
        let err = log.record(dir.path(), "a", dir.path(), "a.bz2").unwrap_err();
        assert!(matches!(err, BzdirError::FileInaccessible { .. }));
    }
}
