//! Command-line entry points
//!
//! Each submodule holds the clap arguments of one binary plus a `run_*`
//! function that does the work against injectable repositories/runners, so
//! the binaries in `src/bin` stay thin.

pub mod multi;
pub mod semver;

pub use multi::{run_multi, MultiArgs, MultiRun};
pub use semver::{run_semver, SemverArgs, SemverOutcome};
