use crate::Result;
use flate2::bufread::MultiGzDecoder;
use ohno::IntoAppError;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use std::time::Instant;

const LOG_TARGET: &str = "decompress";

/// Default size of the blocks moved from the decoder to the destination file.
pub const DEFAULT_BLOCK_SIZE: usize = 60_000;

/// Decompress the gzip file at `source` into `destination`, one block at a time.
///
/// At most `block_size` decompressed bytes are held in memory at once. The whole
/// compressed stream is consumed, including any concatenated gzip members. Returns
/// the number of decompressed bytes written.
pub fn decompress(source: impl AsRef<Path>, destination: impl AsRef<Path>, block_size: usize) -> Result<u64> {
    let source = source.as_ref();
    let destination = destination.as_ref();
    let start = Instant::now();

    log::info!(target: LOG_TARGET, "Decompressing '{}' into '{}'", source.display(), destination.display());

    let input = File::open(source).into_app_err_with(|| format!("unable to open '{}'", source.display()))?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(input));

    let output = File::create(destination).into_app_err_with(|| format!("unable to create '{}'", destination.display()))?;
    let mut writer = BufWriter::new(output);

    let mut block = vec![0u8; block_size.max(1)];
    let mut total = 0u64;

    loop {
        let len = match decoder.read(&mut block) {
            Ok(0) => break,
            Ok(len) => len,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).into_app_err_with(|| format!("unable to decompress '{}'", source.display())),
        };

        writer
            .write_all(&block[..len])
            .into_app_err_with(|| format!("unable to write '{}'", destination.display()))?;
        total += len as u64;
    }

    writer.flush().into_app_err_with(|| format!("unable to write '{}'", destination.display()))?;

    log::debug!(
        target: LOG_TARGET,
        "Wrote {total} bytes to '{}' in {:.3}s",
        destination.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(total)
}
