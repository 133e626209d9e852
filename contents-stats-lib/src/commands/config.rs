use crate::Result;
use crate::contents::{DEFAULT_BLOCK_SIZE, DEFAULT_MIRROR_URL, DEFAULT_TOP_COUNT};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::Deserialize;
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "contents-stats.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Mirror directory that holds the `Contents-<arch>.gz` files
    #[serde(default = "default_mirror_url")]
    pub mirror_url: String,

    /// Size in bytes of each block moved from the decompressor to disk
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Number of packages listed in the report
    #[serde(default = "default_top_count")]
    pub top_count: usize,
}

fn default_mirror_url() -> String {
    DEFAULT_MIRROR_URL.to_string()
}

const fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

const fn default_top_count() -> usize {
    DEFAULT_TOP_COUNT
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Without one, `contents-stats.toml` in
    /// `work_dir` is used when present.
    pub fn load(work_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading contents-stats configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = work_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading contents-stats configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let _ = self.mirror_url()?;

        if self.block_size == 0 {
            return Err(app_err!("block_size must be greater than 0"));
        }

        if self.top_count == 0 {
            return Err(app_err!("top_count must be greater than 0"));
        }

        Ok(())
    }

    /// The mirror URL, normalized to end with `/` so file names join beneath it.
    pub fn mirror_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.mirror_url).into_app_err_with(|| format!("invalid mirror URL '{}'", self.mirror_url))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!("mirror URL '{}' must use http or https", self.mirror_url));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(url)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
