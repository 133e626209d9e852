use strum::Display;

/// A stage of the pipeline that is worth telling the user about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Downloading,
    Decompressing,
    Removing,
    Processing,
}

/// A trait for reporting the progress of a run.
pub trait Progress: Send {
    /// Announce that `phase` has started working on `subject` (usually a file name).
    fn set_phase(&mut self, phase: Phase, subject: &str);
}
