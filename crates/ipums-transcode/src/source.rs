//! Raw data input.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::bufread::MultiGzDecoder;
use ipums_model::Result;
use tracing::debug;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BUFFER_SIZE: usize = 256 * 1024;

/// Open a raw data file for line-by-line reading.
///
/// Gzip input (including multi-member archives) is detected from the magic
/// bytes and decompressed on the fly; anything else is read as plain text.
pub fn open_raw_data(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let compressed = reader.fill_buf()?.starts_with(&GZIP_MAGIC);
    debug!(path = %path.display(), compressed, "opened raw data");
    if compressed {
        Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            MultiGzDecoder::new(reader),
        )))
    } else {
        Ok(Box::new(reader))
    }
}
