//! Diagnostic log output for the command-line tool

use tracing::Level;

/// Verbosity of diagnostic output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Stage starts, skipped tiles and completion
    Normal,
    /// Everything, including cache statistics and tile collisions
    Verbose,
}

impl Verbosity {
    /// Pick a verbosity from the command-line switches; `quiet` wins
    pub const fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Most detailed level emitted
    pub const fn max_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
        }
    }
}

/// Install a stderr subscriber for the whole process
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(verbosity: Verbosity) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(verbosity.max_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
