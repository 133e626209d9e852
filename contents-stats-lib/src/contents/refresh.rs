use super::{Architecture, ContentsFiles, FetchOutcome, FetchResult, Mirror, Phase, Progress, Unavailable, decompress};
use crate::Result;
use ohno::IntoAppError;
use std::fs;
use std::path::Path;

const LOG_TARGET: &str = "   refresh";

/// Bring the cached Contents index for `architecture` up to date.
///
/// Downloads the compressed index, decompresses it over the cached copy and removes
/// the download. Any failure along the way leaves the previously cached index
/// untouched and is reported as [`FetchOutcome::UsedCache`].
pub async fn refresh(
    mirror: &Mirror,
    architecture: Architecture,
    files: &ContentsFiles,
    block_size: usize,
    progress: &mut dyn Progress,
) -> FetchOutcome {
    progress.set_phase(Phase::Downloading, &architecture.compressed_file_name());

    match mirror.download(architecture, files.compressed()).await {
        FetchResult::Downloaded { bytes } => {
            log::debug!(target: LOG_TARGET, "Downloaded {bytes} bytes for '{architecture}'");
        }
        FetchResult::Unavailable(reason) => {
            log::warn!(target: LOG_TARGET, "Could not download the Contents index for '{architecture}': {reason}");
            return FetchOutcome::UsedCache(reason);
        }
    }

    progress.set_phase(Phase::Decompressing, &architecture.compressed_file_name());

    let outcome = match decompress_into_cache(files, block_size).await {
        Ok(bytes) => {
            log::debug!(target: LOG_TARGET, "Decompressed {bytes} bytes into '{}'", files.decompressed().display());
            FetchOutcome::Fetched
        }
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Could not decompress the Contents index for '{architecture}': {e:#}");
            remove_if_present(files.partial());
            FetchOutcome::UsedCache(Unavailable::Decompression(format!("{e:#}")))
        }
    };

    progress.set_phase(Phase::Removing, &architecture.compressed_file_name());
    remove_if_present(files.compressed());

    outcome
}

/// Decompress the download next to the cache, then move it over the cached index.
async fn decompress_into_cache(files: &ContentsFiles, block_size: usize) -> Result<u64> {
    let source = files.compressed().to_path_buf();
    let partial = files.partial().to_path_buf();

    let bytes = tokio::task::spawn_blocking(move || decompress(&source, &partial, block_size)).await??;

    fs::rename(files.partial(), files.decompressed())
        .into_app_err_with(|| format!("unable to replace '{}'", files.decompressed().display()))?;

    Ok(bytes)
}

fn remove_if_present(path: &Path) {
    if path.exists()
        && let Err(e) = fs::remove_file(path)
    {
        log::debug!(target: LOG_TARGET, "Could not remove '{}': {e:#}", path.display());
    }
}
