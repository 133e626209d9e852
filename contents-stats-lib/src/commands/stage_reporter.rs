use super::Host;
use crate::contents::{Phase, Progress};
use owo_colors::OwoColorize;
use std::io::Write;

/// Width of the right-aligned phase label, matching cargo's status lines.
const LABEL_WIDTH: usize = 12;

/// Reports each pipeline phase as a status line on the host's output.
#[derive(Debug)]
pub struct StageReporter<'a, H: Host> {
    host: &'a mut H,
    use_colors: bool,
}

impl<'a, H: Host> StageReporter<'a, H> {
    pub const fn new(host: &'a mut H, use_colors: bool) -> Self {
        Self { host, use_colors }
    }
}

impl<H: Host> Progress for StageReporter<'_, H> {
    fn set_phase(&mut self, phase: Phase, subject: &str) {
        let label = format!("{:>width$}", phase.to_string(), width = LABEL_WIDTH);
        let label = if self.use_colors { label.cyan().bold().to_string() } else { label };

        let _ = writeln!(self.host.output(), "{label} {subject}");
    }
}
