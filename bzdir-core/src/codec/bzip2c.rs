use super::Compressor;
use crate::error::{BzdirError, Result};
use bzip2::Compression;
use bzip2::read::{BzEncoder, MultiBzDecoder};
use std::io::Read;
use std::path::Path;

pub const BZ2_EXTENSION: &str = ".bz2";

/// bzip2 at block size 9, the strongest setting the format has.
pub struct Bzip2Compressor;

impl Compressor for Bzip2Compressor {
    fn extension(&self) -> &'static str {
        BZ2_EXTENSION
    }

    fn compress(&self, raw: &[u8]) -> Result<Vec<u8>> {
        let mut enc = BzEncoder::new(raw, Compression::best());
        let mut out = Vec::with_capacity(raw.len() / 2);
        enc.read_to_end(&mut out)?;
        Ok(out)
    }

    fn decompress(&self, packed: &[u8], origin: &Path) -> Result<Vec<u8>> {
        let mut dec = MultiBzDecoder::new(packed);
        let mut out = Vec::new();
        dec.read_to_end(&mut out)
            .map_err(|source| BzdirError::CorruptInput {
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(out)
    }
}
