use super::{Architecture, FetchResult, Unavailable};
use crate::Result;
use futures_util::StreamExt;
use ohno::IntoAppError;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

const LOG_TARGET: &str = "    mirror";

/// Default mirror directory holding the `Contents-<arch>.gz` files.
pub const DEFAULT_MIRROR_URL: &str = "http://ftp.uk.debian.org/debian/dists/stable/main/";

/// Client for a Debian mirror's `dists/<suite>/<component>/` directory.
#[derive(Debug, Clone)]
pub struct Mirror {
    client: reqwest::Client,
    base_url: Url,
}

impl Mirror {
    pub fn new(base_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("contents-stats/", env!("CARGO_PKG_VERSION")))
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Location of the compressed index for `architecture`.
    pub fn contents_url(&self, architecture: Architecture) -> Result<Url> {
        self.base_url
            .join(&architecture.compressed_file_name())
            .into_app_err_with(|| format!("unable to build the Contents URL for '{architecture}' under '{}'", self.base_url))
    }

    /// Download the compressed index for `architecture` into `destination`.
    ///
    /// The mirror's base page is probed first. Anticipated network conditions are reported
    /// as [`FetchResult::Unavailable`] rather than as errors, and in that case nothing is
    /// left at `destination`.
    pub async fn download(&self, architecture: Architecture, destination: &Path) -> FetchResult {
        if let Some(reason) = self.probe().await {
            return FetchResult::Unavailable(reason);
        }

        let url = match self.contents_url(architecture) {
            Ok(url) => url,
            Err(e) => return FetchResult::Unavailable(Unavailable::File(format!("{e:#}"))),
        };

        log::info!(target: LOG_TARGET, "Downloading '{url}'");
        let start = Instant::now();

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return FetchResult::Unavailable(Unavailable::File(format!("requesting {url}: {e}"))),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchResult::Unavailable(Unavailable::File(format!("HTTP {status} from {url}")));
        }

        match save_body(response, destination).await {
            Ok(bytes) => {
                log::debug!(
                    target: LOG_TARGET,
                    "Saved {bytes} bytes from '{url}' to '{}' in {:.3}s",
                    destination.display(),
                    start.elapsed().as_secs_f64()
                );
                FetchResult::Downloaded { bytes }
            }
            Err(e) => {
                if destination.exists()
                    && let Err(remove_err) = fs::remove_file(destination)
                {
                    log::debug!(target: LOG_TARGET, "Could not remove partial download '{}': {remove_err:#}", destination.display());
                }

                FetchResult::Unavailable(Unavailable::File(format!("{e:#}")))
            }
        }
    }

    /// Check that the mirror answers at all before asking for a specific file.
    async fn probe(&self) -> Option<Unavailable> {
        log::debug!(target: LOG_TARGET, "Probing mirror '{}'", self.base_url);

        match self.client.get(self.base_url.clone()).send().await {
            Ok(response) if response.status().is_success() => None,
            Ok(response) => Some(Unavailable::Mirror(format!("HTTP {} from {}", response.status(), self.base_url))),
            Err(e) => Some(Unavailable::Mirror(format!("requesting {}: {e}", self.base_url))),
        }
    }
}

/// Stream a response body to disk chunk by chunk, returning the number of bytes written.
async fn save_body(response: reqwest::Response, destination: &Path) -> Result<u64> {
    let mut file = File::create(destination)
        .await
        .into_app_err_with(|| format!("unable to create '{}'", destination.display()))?;

    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.into_app_err("unable to read the response body")?;
        file.write_all(&chunk)
            .await
            .into_app_err_with(|| format!("unable to write '{}'", destination.display()))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .into_app_err_with(|| format!("unable to write '{}'", destination.display()))?;

    Ok(written)
}
