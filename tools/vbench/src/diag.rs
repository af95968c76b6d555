//! Stderr diagnostics for vbench.
//!
//! stdout carries only the report. Progress lines, warnings and phase
//! timings go to stderr, gated on the level picked with `-q` / `-v`.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Instant;

/// How much vbench says on stderr.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Errors only.
    Quiet,
    /// Progress and warnings.
    Progress,
    /// Also sample counts and phase timings.
    Detail,
}

impl Level {
    /// Level selected by the `-q` and `-v` flags. clap rejects both together.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Level::Quiet,
            (false, true) => Level::Detail,
            (false, false) => Level::Progress,
        }
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Level::Progress as u8);

/// Set the process-wide level. Called once from `main`.
pub fn set_level(level: Level) {
    LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Whether messages at `level` are printed.
pub fn enabled(level: Level) -> bool {
    LEVEL.load(Ordering::Relaxed) >= level as u8
}

/// Progress line, hidden by `-q`.
macro_rules! progress {
    ($($arg:tt)*) => {
        if $crate::diag::enabled($crate::diag::Level::Progress) {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use progress;

/// Counts and other detail, shown only with `-v`.
macro_rules! detail {
    ($($arg:tt)*) => {
        if $crate::diag::enabled($crate::diag::Level::Detail) {
            eprintln!($($arg)*);
        }
    };
}

pub(crate) use detail;

/// Non-fatal problem with the input or the filters, hidden by `-q`.
macro_rules! warning {
    ($($arg:tt)*) => {
        if $crate::diag::enabled($crate::diag::Level::Progress) {
            eprintln!("warning: {}", format_args!($($arg)*));
        }
    };
}

pub(crate) use warning;

/// Run one pipeline phase, reporting its wall time at detail level.
pub fn timed<T>(phase: &str, work: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let value = work();
    detail!("  {phase}: {:.1?}", start.elapsed());
    value
}
