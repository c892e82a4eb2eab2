use crate::error::Result;
use crate::exec::{self, CommandOutput, OutputMode};
use crate::git::{Git2Repository, Repository};
use std::io::Write;
use std::path::Path;

/// The per-repository operations the walker performs.
pub trait ProjectRunner {
    /// Whether the repository at `dir` has uncommitted changes
    fn is_changed(&self, dir: &Path) -> Result<bool>;

    /// Run `command` inside `dir`, streaming to `out` when `mode` asks for it
    fn run(
        &self,
        dir: &Path,
        command: &[String],
        mode: &OutputMode,
        grep: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<CommandOutput>;
}

/// Runs real commands and checks status through libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitRunner;

impl ProjectRunner for GitRunner {
    fn is_changed(&self, dir: &Path) -> Result<bool> {
        Git2Repository::open(dir)?.is_changed()
    }

    fn run(
        &self,
        dir: &Path,
        command: &[String],
        mode: &OutputMode,
        grep: Option<&str>,
        out: &mut dyn Write,
    ) -> Result<CommandOutput> {
        exec::execute_command(command, dir, mode, grep, out)
    }
}
