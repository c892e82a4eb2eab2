use crate::error::{GitPlusError, Result};
use crate::exec::{self, OutputMode};
use chrono::{DateTime, Local};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// `git-repositories-YYYY-MM-DD-HH-MM.tar`
pub fn archive_name(now: DateTime<Local>) -> String {
    format!("git-repositories-{}.tar", now.format("%Y-%m-%d-%H-%M"))
}

/// `<repo>/.git` and `<repo>/.gitignore` for every immediate child repository
/// of `root`, relative to `root` and sorted.
pub fn archive_members(root: &Path) -> Result<Vec<String>> {
    let mut repositories = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() && path.join(".git").exists() {
            repositories.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    repositories.sort();

    let mut members = Vec::new();
    for name in repositories {
        members.push(format!("{}/.git", name));
        if root.join(&name).join(".gitignore").exists() {
            members.push(format!("{}/.gitignore", name));
        }
    }
    Ok(members)
}

/// Write a tar of all repository metadata under `root` and return its path.
///
/// `tar` lists each member on `out`. Returns `None` when `root` holds no
/// repositories, in which case nothing is written.
pub fn create_archive<W: Write>(root: &Path, name: &str, out: &mut W) -> Result<Option<PathBuf>> {
    let members = archive_members(root)?;
    if members.is_empty() {
        warn!(root = %root.display(), "no git repositories to archive");
        return Ok(None);
    }

    let mut command = vec!["tar".to_string(), "cvf".to_string(), name.to_string()];
    command.extend(members);

    let result = exec::execute_command(
        &command,
        root,
        &OutputMode::Stream {
            prefix: String::new(),
        },
        None,
        out,
    )?;
    if !result.success {
        return Err(GitPlusError::command(format!(
            "tar failed: {}",
            result.output.trim_end()
        )));
    }

    let path = root.join(name);
    info!(archive = %path.display(), "archive written");
    Ok(Some(path))
}
