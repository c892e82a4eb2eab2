//! `git-multi`: run one git command in every repository below a directory.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::{GroupByOutput, IgnoreSet, GROUP_BY_OUTPUT_KEY};
use crate::error::Result;
use crate::git::{read_global_config_value, Git2Repository, Repository};
use crate::multi::{self, MultiOptions, MultiReport, ProjectRunner};
use crate::ui;

/// Filter applied to `git branch` output to keep the current branch only.
const CURRENT_BRANCH_GREP: &str = "* ";

#[derive(clap::Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "git-multi",
    version,
    about = "Execute a git command in every git repository below the current directory"
)]
pub struct MultiArgs {
    #[arg(short, long, help = "Only execute in the repository with this name")]
    pub project: Option<String>,

    #[arg(short, long = "except", help = "Comma separated repositories to ignore")]
    pub except: Option<String>,

    #[arg(short, long, help = "Only execute in repositories with uncommitted changes")]
    pub changed: bool,

    #[arg(short, long, help = "Show the current branch of every repository")]
    pub branch: bool,

    #[arg(
        long = "branch-verbose",
        help = "Show the current branch and last commit, grouped (also -bv)"
    )]
    pub branch_verbose: bool,

    #[arg(short, long, default_value_t = 1, help = "Directory levels to search for repositories")]
    pub depth: u32,

    #[arg(short, long, help = "Archive all .git directories into a tar file and exit")]
    pub archive: bool,

    #[arg(long, help = "Print debug logs to stderr")]
    pub verbose: bool,

    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Git command to execute (default: status -s)"
    )]
    pub command: Vec<String>,
}

/// Options that consume the following argument as their value.
const VALUE_OPTIONS: &[&str] = &["-p", "--project", "-e", "--except", "-d", "--depth"];

/// Rewrite the two-letter `-bv` switch, which clap cannot express as a short flag.
///
/// The first argument is the program name. Rewriting stops at the first
/// positional argument, where the git command begins.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut normalized: Vec<String> = args.next().into_iter().collect();
    let mut expects_value = false;
    let mut in_command = false;

    for arg in args {
        if !in_command {
            if expects_value {
                expects_value = false;
            } else if arg == "-bv" {
                normalized.push("--branch-verbose".to_string());
                continue;
            } else if arg == "--" || !arg.starts_with('-') {
                in_command = true;
            } else {
                expects_value = VALUE_OPTIONS.contains(&arg.as_str());
            }
        }
        normalized.push(arg);
    }
    normalized
}

/// Command, grep filter and forced grouping derived from the arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    pub command: Vec<String>,
    pub grep: Option<String>,
    pub force_grouping: bool,
}

impl MultiArgs {
    pub fn resolve_command(&self) -> ResolvedCommand {
        let (mut command, grep, force_grouping) = if self.branch_verbose {
            (
                vec!["branch".to_string(), "-v".to_string()],
                Some(CURRENT_BRANCH_GREP.to_string()),
                true,
            )
        } else if self.branch {
            (
                vec!["branch".to_string()],
                Some(CURRENT_BRANCH_GREP.to_string()),
                false,
            )
        } else if self.command.is_empty() {
            (vec!["status".to_string(), "-s".to_string()], None, false)
        } else {
            (self.command.clone(), None, false)
        };

        if command.first().map(String::as_str) != Some("gitk") {
            command.insert(0, "git".to_string());
        }

        ResolvedCommand {
            command,
            grep,
            force_grouping,
        }
    }

    /// `--project` without a trailing slash
    pub fn project_name(&self) -> Option<String> {
        self.project
            .as_deref()
            .map(|p| p.strip_suffix('/').unwrap_or(p).to_string())
    }

    /// Build walk options from the arguments, the configured grouping default
    /// and the (already merged) ignore set.
    pub fn to_options(&self, group_by_output: GroupByOutput, ignore: IgnoreSet) -> MultiOptions {
        let resolved = self.resolve_command();
        MultiOptions {
            command: resolved.command,
            depth: self.depth,
            project: self.project_name(),
            ignore,
            only_if_changed: self.changed,
            group_by_output: group_by_output.is_enabled() || resolved.force_grouping,
            grep: resolved.grep,
        }
    }
}

/// Grouping default from `multi.groupbyoutput`.
///
/// Looks in the repository containing `dir` when there is one, otherwise in
/// the global configuration. Unreadable configuration means no grouping.
pub fn group_by_output_default(dir: &Path) -> GroupByOutput {
    let value = match Git2Repository::open(dir) {
        Ok(repo) => repo.config_value(GROUP_BY_OUTPUT_KEY),
        Err(_) => read_global_config_value(GROUP_BY_OUTPUT_KEY),
    };

    match value {
        Ok(value) => GroupByOutput::from_config_value(value.as_deref()),
        Err(e) => {
            warn!(key = GROUP_BY_OUTPUT_KEY, error = %e, "cannot read git config");
            GroupByOutput::Disabled
        }
    }
}

/// What a `git-multi` invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiRun {
    Archived(PathBuf),
    /// `--archive` found no repositories
    NothingToArchive,
    Walked(MultiReport),
}

/// Run `git-multi` rooted at `root`.
///
/// Banner, progress and grouped results go to `out`.
pub fn run_multi<R, W>(
    root: &Path,
    args: &MultiArgs,
    group_by_output: GroupByOutput,
    runner: &R,
    out: &mut W,
) -> Result<MultiRun>
where
    R: ProjectRunner,
    W: Write,
{
    let mut ignore = args
        .except
        .as_deref()
        .map(IgnoreSet::from_csv)
        .unwrap_or_default();
    ignore.load_ignore_file(root)?;
    if !ignore.is_empty() {
        writeln!(out, "{}", ui::format_ignored(ignore.names()))?;
    }

    if args.archive {
        let name = multi::archive_name(chrono::Local::now());
        return match multi::create_archive(root, &name, out)? {
            Some(path) => {
                writeln!(out, "Saved git repositories to {}", name)?;
                Ok(MultiRun::Archived(path))
            }
            None => {
                writeln!(out, "No git repositories to archive")?;
                Ok(MultiRun::NothingToArchive)
            }
        };
    }

    let options = args.to_options(group_by_output, ignore);

    writeln!(
        out,
        "{}",
        ui::format_banner(&options.command, options.grep.as_deref())
    )?;

    if options.group_by_output {
        write!(out, "Progress: ")?;
        out.flush()?;
    }

    let report = multi::walk(root, &options, runner, out)?;

    if options.group_by_output {
        writeln!(out)?;
        writeln!(out, "{}", ui::RULE)?;
        writeln!(out)?;
        write!(out, "{}", ui::format_groups(&report.groups.sorted()))?;
    }

    Ok(MultiRun::Walked(report))
}
