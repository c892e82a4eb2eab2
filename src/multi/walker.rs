use crate::config::IgnoreSet;
use crate::error::Result;
use crate::exec::{CommandOutput, OutputMode};
use crate::multi::groups::OutputGroups;
use crate::multi::runner::ProjectRunner;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Indentation for per-repository output lines.
pub const OUTPUT_PREFIX: &str = "\t";

/// Settings for one `git-multi` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiOptions {
    /// Program and arguments, e.g. `["git", "status", "-s"]`
    pub command: Vec<String>,
    /// Remaining directory levels to search; 1 inspects only immediate children
    pub depth: u32,
    /// Only visit entries with this name
    pub project: Option<String>,
    pub ignore: IgnoreSet,
    /// Skip repositories without uncommitted changes
    pub only_if_changed: bool,
    pub group_by_output: bool,
    /// Keep only output lines containing this substring
    pub grep: Option<String>,
}

impl Default for MultiOptions {
    fn default() -> Self {
        MultiOptions {
            command: vec!["git".to_string(), "status".to_string(), "-s".to_string()],
            depth: 1,
            project: None,
            ignore: IgnoreSet::new(),
            only_if_changed: false,
            group_by_output: false,
            grep: None,
        }
    }
}

/// What happened in one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    /// Skipped by the changed pre-check
    NotChanged,
    /// The command could not run or exited non-zero
    Failed { command: String, output: String },
    /// Succeeded with (trailing-whitespace trimmed) output
    Output(String),
    /// Succeeded without output
    NoOutput,
}

impl ProjectOutcome {
    /// Classify the result of running `command`.
    pub fn classify(command: &[String], result: Result<CommandOutput>) -> Self {
        let command = command.join(" ");
        match result {
            Ok(out) if out.success => {
                let trimmed = out.output.trim_end();
                if trimmed.is_empty() {
                    ProjectOutcome::NoOutput
                } else {
                    ProjectOutcome::Output(trimmed.to_string())
                }
            }
            Ok(out) => ProjectOutcome::Failed {
                command,
                output: out.output.trim_end().to_string(),
            },
            Err(e) => ProjectOutcome::Failed {
                command,
                output: e.to_string(),
            },
        }
    }

    /// The text this outcome is grouped and printed under.
    pub fn display_text(&self) -> String {
        match self {
            ProjectOutcome::NotChanged => format!("{}Not changed", OUTPUT_PREFIX),
            ProjectOutcome::Failed { command, output } => {
                format!("{}Error executing:{}:{}", OUTPUT_PREFIX, command, output)
            }
            ProjectOutcome::Output(output) => output.clone(),
            ProjectOutcome::NoOutput => format!("{}OK", OUTPUT_PREFIX),
        }
    }
}

/// Everything a walk produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiReport {
    /// Filled only when grouping is enabled
    pub groups: OutputGroups,
    /// Visited repositories in visiting order
    pub outcomes: Vec<(String, ProjectOutcome)>,
    /// Ignored repositories, each listed once
    pub skipped: Vec<String>,
}

/// Visit every repository under `root` and run the configured command in it.
///
/// Ungrouped runs print each repository's name and live command output to
/// `out` as they go. Grouped runs print one progress marker per repository
/// and leave the printing of groups to the caller.
pub fn walk<R, W>(
    root: &Path,
    options: &MultiOptions,
    runner: &R,
    out: &mut W,
) -> Result<MultiReport>
where
    R: ProjectRunner,
    W: Write,
{
    let mut walk = Walk {
        root,
        options,
        runner,
        out,
        report: MultiReport::default(),
    };
    walk.process_dir(root, options.depth)?;
    Ok(walk.report)
}

struct Walk<'a, R, W> {
    root: &'a Path,
    options: &'a MultiOptions,
    runner: &'a R,
    out: &'a mut W,
    report: MultiReport,
}

impl<R: ProjectRunner, W: Write> Walk<'_, R, W> {
    fn process_dir(&mut self, dir: &Path, depth: u32) -> Result<()> {
        for (name, path) in sorted_entries(dir)? {
            if let Some(project) = &self.options.project {
                if project != &name {
                    continue;
                }
            }
            if !path.is_dir() {
                continue;
            }

            if path.join(".git").exists() {
                if self.options.ignore.contains(&name) {
                    info!(repository = %name, "ignored");
                    self.report.skipped.push(name);
                    continue;
                }
                self.process_project(&path)?;
            } else if depth > 1 {
                if let Err(e) = self.process_dir(&path, depth - 1) {
                    warn!(dir = %path.display(), error = %e, "cannot search directory");
                }
            }
        }
        Ok(())
    }

    fn process_project(&mut self, path: &Path) -> Result<()> {
        let name = self.display_name(path);
        let options = self.options;
        let grouped = options.group_by_output;
        let command = &options.command;

        if !grouped {
            writeln!(self.out, "{}:", name)?;
            self.out.flush()?;
        }

        let changed = if options.only_if_changed {
            match self.runner.is_changed(path) {
                Ok(changed) => changed,
                Err(e) => {
                    warn!(repository = %name, error = %e, "changed check failed, running anyway");
                    true
                }
            }
        } else {
            true
        };

        let outcome = if !changed {
            let outcome = ProjectOutcome::NotChanged;
            if !grouped {
                writeln!(self.out, "{}", outcome.display_text())?;
            }
            outcome
        } else {
            let mode = if grouped {
                OutputMode::Capture
            } else {
                OutputMode::Stream {
                    prefix: OUTPUT_PREFIX.to_string(),
                }
            };
            let result = self.runner.run(
                path,
                command,
                &mode,
                options.grep.as_deref(),
                &mut *self.out,
            );
            let outcome = ProjectOutcome::classify(command, result);

            // Successful output has already been streamed.
            if !grouped {
                if let ProjectOutcome::Failed { .. } | ProjectOutcome::NoOutput = outcome {
                    writeln!(self.out, "{}", outcome.display_text())?;
                }
            }
            outcome
        };

        debug!(repository = %name, outcome = ?outcome, "processed");

        if grouped {
            self.report.groups.add(outcome.display_text(), name.clone());
            write!(self.out, "* ")?;
            self.out.flush()?;
        }
        self.report.outcomes.push((name, outcome));
        Ok(())
    }

    /// Path relative to the walk root, `/`-separated
    fn display_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Directory entries sorted by name.
fn sorted_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push((name, entry.path()));
    }
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitPlusError;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use tempfile::TempDir;

    #[derive(Default)]
    struct ScriptedRunner {
        changed: HashSet<String>,
        outputs: HashMap<String, CommandOutput>,
        executed: RefCell<Vec<String>>,
    }

    impl ScriptedRunner {
        fn output(mut self, repo: &str, success: bool, output: &str) -> Self {
            self.outputs.insert(
                repo.to_string(),
                CommandOutput {
                    success,
                    output: output.to_string(),
                },
            );
            self
        }

        fn changed(mut self, repo: &str) -> Self {
            self.changed.insert(repo.to_string());
            self
        }
    }

    fn repo_name(dir: &Path) -> String {
        dir.file_name().unwrap().to_string_lossy().into_owned()
    }

    impl ProjectRunner for ScriptedRunner {
        fn is_changed(&self, dir: &Path) -> Result<bool> {
            Ok(self.changed.contains(&repo_name(dir)))
        }

        fn run(
            &self,
            dir: &Path,
            _command: &[String],
            mode: &OutputMode,
            _grep: Option<&str>,
            out: &mut dyn Write,
        ) -> Result<CommandOutput> {
            let name = repo_name(dir);
            self.executed.borrow_mut().push(name.clone());
            let result = self
                .outputs
                .get(&name)
                .cloned()
                .ok_or_else(|| GitPlusError::command(format!("no script for {}", name)))?;

            if let OutputMode::Stream { prefix } = mode {
                if result.success {
                    for line in result.output.lines() {
                        writeln!(out, "{}{}", prefix, line)?;
                    }
                }
            }
            Ok(result)
        }
    }

    fn make_repos(root: &Path, names: &[&str]) {
        for name in names {
            fs::create_dir_all(root.join(name).join(".git")).unwrap();
        }
    }

    #[test]
    fn test_classify() {
        let cmd = vec!["git".to_string(), "status".to_string()];
        let ok = |s: &str| {
            Ok(CommandOutput {
                success: true,
                output: s.to_string(),
            })
        };

        assert_eq!(ProjectOutcome::classify(&cmd, ok("")), ProjectOutcome::NoOutput);
        assert_eq!(ProjectOutcome::classify(&cmd, ok("  \n")), ProjectOutcome::NoOutput);
        assert_eq!(
            ProjectOutcome::classify(&cmd, ok(" M a.rs\n")),
            ProjectOutcome::Output(" M a.rs".to_string())
        );

        let failed = ProjectOutcome::classify(
            &cmd,
            Ok(CommandOutput {
                success: false,
                output: "fatal: bad\n".to_string(),
            }),
        );
        assert_eq!(failed.display_text(), "\tError executing:git status:fatal: bad");
    }

    #[test]
    fn test_only_changed_repositories_run() {
        let dir = TempDir::new().unwrap();
        make_repos(dir.path(), &["a", "b"]);

        let runner = ScriptedRunner::default()
            .changed("b")
            .output("b", true, " M file.txt\n");
        let options = MultiOptions {
            only_if_changed: true,
            command: vec!["git".to_string(), "status".to_string()],
            ..MultiOptions::default()
        };

        let mut out = Vec::new();
        let report = walk(dir.path(), &options, &runner, &mut out).unwrap();

        assert_eq!(*runner.executed.borrow(), vec!["b"]);
        assert_eq!(
            report.outcomes,
            vec![
                ("a".to_string(), ProjectOutcome::NotChanged),
                ("b".to_string(), ProjectOutcome::Output(" M file.txt".to_string())),
            ]
        );
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed, "a:\n\tNot changed\nb:\n\t M file.txt\n");
    }

    #[test]
    fn test_ignored_repositories_skipped_once() {
        let dir = TempDir::new().unwrap();
        make_repos(dir.path(), &["keep", "skip"]);

        let mut ignore = IgnoreSet::from_csv("skip");
        ignore.extend(["skip"]);
        let runner = ScriptedRunner::default().output("keep", true, "");
        let options = MultiOptions {
            ignore,
            ..MultiOptions::default()
        };

        let report = walk(dir.path(), &options, &runner, &mut std::io::sink()).unwrap();
        assert_eq!(report.skipped, vec!["skip"]);
        assert_eq!(*runner.executed.borrow(), vec!["keep"]);
    }

    #[test]
    fn test_grouping_merges_identical_output() {
        let dir = TempDir::new().unwrap();
        make_repos(dir.path(), &["c", "a", "b"]);

        let runner = ScriptedRunner::default()
            .output("a", true, "")
            .output("b", true, "* main\n")
            .output("c", true, "\n");
        let options = MultiOptions {
            group_by_output: true,
            ..MultiOptions::default()
        };

        let mut out = Vec::new();
        let report = walk(dir.path(), &options, &runner, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "* * * ");
        let groups = report.groups.sorted();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].header, "a, c:");
        assert_eq!(groups[0].output, "\tOK");
        assert_eq!(groups[1].header, "b:");
        assert_eq!(groups[1].output, "* main");
    }

    #[test]
    fn test_failure_does_not_abort_walk() {
        let dir = TempDir::new().unwrap();
        make_repos(dir.path(), &["broken", "fine"]);

        // "broken" has no script, so the runner returns Err for it.
        let runner = ScriptedRunner::default().output("fine", true, "ok\n");
        let mut out = Vec::new();
        let report = walk(dir.path(), &MultiOptions::default(), &runner, &mut out).unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert!(matches!(report.outcomes[0].1, ProjectOutcome::Failed { .. }));
        assert_eq!(report.outcomes[1].1, ProjectOutcome::Output("ok".to_string()));
        assert!(String::from_utf8(out).unwrap().contains("\tError executing:git status -s:"));
    }

    #[test]
    fn test_ungrouped_output_for_every_outcome() {
        let dir = TempDir::new().unwrap();
        make_repos(dir.path(), &["bad", "dirty", "empty", "missing"]);

        let runner = ScriptedRunner::default()
            .output("bad", false, "fatal: not a branch\n")
            .output("dirty", true, " M a.rs\n?? b.rs\n")
            .output("empty", true, "");

        let mut out = Vec::new();
        walk(dir.path(), &MultiOptions::default(), &runner, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "bad:\n\tError executing:git status -s:fatal: not a branch\n\
             dirty:\n\t M a.rs\n\t?? b.rs\n\
             empty:\n\tOK\n\
             missing:\n\tError executing:git status -s:Command failed: no script for missing\n"
        );
    }

    #[test]
    fn test_depth_controls_recursion() {
        let dir = TempDir::new().unwrap();
        make_repos(dir.path(), &["top", "group/nested", "group/deeper/leaf"]);

        let runner = ScriptedRunner::default()
            .output("top", true, "")
            .output("nested", true, "")
            .output("leaf", true, "");

        let shallow = walk(dir.path(), &MultiOptions::default(), &runner, &mut std::io::sink()).unwrap();
        let names: Vec<&str> = shallow.outcomes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["top"]);

        let options = MultiOptions {
            depth: 2,
            ..MultiOptions::default()
        };
        let deeper = walk(dir.path(), &options, &runner, &mut std::io::sink()).unwrap();
        let names: Vec<&str> = deeper.outcomes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["group/nested", "top"]);

        let options = MultiOptions {
            depth: 3,
            ..MultiOptions::default()
        };
        let deepest = walk(dir.path(), &options, &runner, &mut std::io::sink()).unwrap();
        assert_eq!(deepest.outcomes.len(), 3);
    }

    #[test]
    fn test_single_project_filter() {
        let dir = TempDir::new().unwrap();
        make_repos(dir.path(), &["one", "two"]);
        fs::write(dir.path().join("two.txt"), "").unwrap();

        let runner = ScriptedRunner::default().output("two", true, "");
        let options = MultiOptions {
            project: Some("two".to_string()),
            ..MultiOptions::default()
        };

        let report = walk(dir.path(), &options, &runner, &mut std::io::sink()).unwrap();
        assert_eq!(*runner.executed.borrow(), vec!["two"]);
        assert_eq!(report.outcomes.len(), 1);
    }

    #[test]
    fn test_plain_directories_are_not_repositories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("README"), "").unwrap();

        let runner = ScriptedRunner::default();
        let report = walk(dir.path(), &MultiOptions::default(), &runner, &mut std::io::sink()).unwrap();
        assert!(report.outcomes.is_empty());
    }
}
