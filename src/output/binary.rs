//! Binary content detection

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected
pub const SNIFF_LEN: u64 = 512;

/// Check whether a file looks binary by inspecting its first bytes.
pub fn is_binary_file(path: &Path) -> io::Result<bool> {
    let mut sample = Vec::with_capacity(SNIFF_LEN as usize);
    File::open(path)?.take(SNIFF_LEN).read_to_end(&mut sample)?;

    let truncated = sample.len() as u64 == SNIFF_LEN;
    Ok(is_binary(&sample, truncated))
}

/// Bytes are binary when they are not valid UTF-8. When the sample was cut
/// short, a multi-byte character split at the end does not count.
pub fn is_binary(sample: &[u8], truncated: bool) -> bool {
    match std::str::from_utf8(sample) {
        Ok(_) => false,
        Err(e) => !(truncated && e.error_len().is_none()),
    }
}
