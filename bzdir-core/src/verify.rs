use crate::error::Result;
use crate::list::list_files;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use tracing::debug;

const CMP_BUF: usize = 64 * 1024;

/// Outcome of a deep comparison. Every source file lands in exactly one list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    pub matched: Vec<String>,
    pub mismatched: Vec<String>,
    pub errors: Vec<String>,
}

impl ComparisonResult {
    pub fn is_clean(&self) -> bool {
        self.mismatched.is_empty() && self.errors.is_empty()
    }
}

/// Compares every regular file directly in `source` against the file of the
/// same name in `restored`, byte for byte. Extra files in `restored` are
/// ignored. Only a failure to list `source` is returned as an error.
pub fn compare_dirs(source: &Path, restored: &Path) -> Result<ComparisonResult> {
    let mut out = ComparisonResult::default();
    for name in list_files(source)? {
        match same_contents(&source.join(&name), &restored.join(&name)) {
            Ok(true) => out.matched.push(name),
            Ok(false) => out.mismatched.push(name),
            Err(e) => {
                debug!(file = %name, error = %e, "comparison failed");
                out.errors.push(name);
            }
        }
    }
    Ok(out)
}

fn same_contents(a: &Path, b: &Path) -> io::Result<bool> {
    let fa = File::open(a)?;
    let fb = File::open(b)?;
    if !fb.metadata()?.is_file() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
    }

    let mut ra = BufReader::new(fa);
    let mut rb = BufReader::new(fb);
    let mut ba = vec![0u8; CMP_BUF];
    let mut bb = vec![0u8; CMP_BUF];
    loop {
        let n = fill(&mut ra, &mut ba)?;
        let m = fill(&mut rb, &mut bb)?;
        if n != m || ba[..n] != bb[..m] {
            return Ok(false);
        }
        if n == 0 {
            return Ok(true);
        }
    }
}

/// Reads until `buf` is full or EOF so both sides advance in lockstep.
fn fill<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(k) => filled += k,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
