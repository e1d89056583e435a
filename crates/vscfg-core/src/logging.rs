//! Logging configuration
//!
//! The log level is decided once from CLI flags and carried explicitly to the
//! components that need it, instead of being read from process state.

/// How much output the run should produce
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Progress and warnings
    #[default]
    Normal,
    /// Debug detail, including package manager output
    Verbose,
    /// Everything
    Trace,
}

/// Logging configuration passed through the call chain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfig {
    pub verbosity: Verbosity,
}

impl LogConfig {
    /// Build from the `-v` count and `--quiet` flag
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else {
            match verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        };
        Self { verbosity }
    }

    /// Filter directive for `tracing_subscriber::EnvFilter`
    pub fn filter_directive(&self) -> &'static str {
        match self.verbosity {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "info",
            Verbosity::Verbose => "debug",
            Verbosity::Trace => "trace",
        }
    }

    /// Whether stdout/stderr of external tools should be surfaced at info level
    pub fn show_process_output(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    /// Whether interactive progress (spinners) should be drawn
    pub fn show_progress(&self) -> bool {
        self.verbosity != Verbosity::Quiet
    }
}
