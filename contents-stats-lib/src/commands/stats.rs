use super::Host;
use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use super::stage_reporter::StageReporter;
use crate::Result;
use crate::contents::{Architecture, ContentsFiles, FetchOutcome, Mirror, Phase, Progress, count_packages, rank, refresh};
use crate::reports::{generate_console, generate_json};
use camino::Utf8PathBuf;
use clap::Args;
use core::str::FromStr;
use ohno::{EnrichableExt, IntoAppError};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "     stats";

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Architecture whose Contents index is analyzed (armel, armhf, arm64, i386, amd64, mips, mipsel, mips64el, ppc64el, s390x, source)
    #[arg(value_name = "ARCH", value_parser = Architecture::from_str)]
    pub architecture: Architecture,

    /// Mirror directory holding the `Contents-<arch>.gz` files [default: from configuration]
    #[arg(long, value_name = "URL")]
    pub mirror: Option<String>,

    /// Directory where the Contents files are downloaded and cached
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub work_dir: Utf8PathBuf,

    /// Path to configuration file (default is `contents-stats.toml` in the working directory)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Also write the ranked packages to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,
}

/// Refresh the Contents index for the requested architecture, then report its largest packages.
pub async fn process_stats<H: Host>(host: &mut H, args: &StatsArgs) -> Result<()> {
    init_logging(args.log_level);

    let mut config = Config::load(&args.work_dir, args.config.as_ref())?;
    if let Some(mirror) = &args.mirror {
        config.mirror_url.clone_from(mirror);
        config.validate()?;
    }

    let architecture = args.architecture;
    let use_colors = args.color.use_colors();
    let files = ContentsFiles::new(&args.work_dir, architecture);
    let mirror = Mirror::new(config.mirror_url()?)?;

    log::info!(target: LOG_TARGET, "Using mirror '{}' for '{architecture}'", mirror.base_url());

    let outcome = refresh(&mirror, architecture, &files, config.block_size, &mut StageReporter::new(host, use_colors)).await;

    if let FetchOutcome::UsedCache(reason) = &outcome {
        let _ = writeln!(host.error(), "warning: {reason}; displaying results from the previous download");
    }

    StageReporter::new(host, use_colors).set_phase(Phase::Processing, &architecture.contents_file_name());

    let path = files.decompressed().to_path_buf();
    let counts = match tokio::task::spawn_blocking(move || count_packages(path)).await? {
        Ok(counts) => counts,
        Err(e) if outcome.is_fetched() => return Err(e),
        Err(e) => return Err(e.enrich("no previously downloaded Contents index is available")),
    };

    let ranked = rank(&counts, config.top_count);

    let mut console_output = String::new();
    generate_console(architecture, &ranked, use_colors, &mut console_output)?;
    let _ = write!(host.output(), "\n{console_output}");

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(architecture, &outcome, &ranked, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    }

    Ok(())
}
