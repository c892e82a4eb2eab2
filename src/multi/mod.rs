//! Running one command across many repositories
//!
//! - `walker` - repository discovery and per-repository execution
//! - `groups` - merging repositories with identical output
//! - `runner` - the seam between the walker and real git/processes
//! - `archive` - tar backup of repository metadata

pub mod archive;
pub mod groups;
pub mod runner;
pub mod walker;

pub use archive::{archive_members, archive_name, create_archive};
pub use groups::{OutputGroup, OutputGroups};
pub use runner::{GitRunner, ProjectRunner};
pub use walker::{walk, MultiOptions, MultiReport, ProjectOutcome, OUTPUT_PREFIX};
