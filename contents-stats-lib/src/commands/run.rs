//! Command dispatch logic for contents-stats

use super::{StatsArgs, process_stats};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use ohno::app_err;
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "contents-stats", version, author, long_about = None)]
#[command(about = "Report the Debian packages that own the most files for an architecture")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    stats: StatsArgs,
}

/// Dispatch command-line arguments to the stats command
///
/// This function parses the command-line arguments and executes the command. It's
/// designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the command line is invalid or if the command fails. An invalid
/// command line is also reported on the host's error stream and terminates the host
/// with clap's usage exit code before any I/O happens.
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = write!(host.error(), "{}", e.render());
            host.exit(e.exit_code());
            return Err(app_err!("invalid command line: {}", e.kind()));
        }
        Err(e) => {
            // --help and --version
            let _ = write!(host.output(), "{}", e.render());
            return Ok(());
        }
    };

    process_stats(host, &cli.stats).await
}
