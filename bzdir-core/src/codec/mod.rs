use crate::error::Result;
use std::path::Path;

/// Byte-level transform applied to one file at a time.
pub trait Compressor {
    /// Suffix appended to compressed file names, including the dot.
    fn extension(&self) -> &'static str;
    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>>;
    /// `origin` is only used to label a `CorruptInput` error.
    fn decompress(&self, packed: &[u8], origin: &Path) -> Result<Vec<u8>>;

    fn compressed_name(&self, name: &str) -> String {
        format!("{name}{}", self.extension())
    }

    /// Original name for a compressed file, or `None` if it lacks the suffix.
    fn restored_name<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_suffix(self.extension())
            .filter(|stem| !stem.is_empty())
    }
}

pub mod bzip2c;
