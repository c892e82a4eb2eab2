//! Running external commands (`git`, `gitk`, `tar`) and capturing their output.

use crate::error::{GitPlusError, Result};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use tracing::debug;

/// How command output is handled while the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Collect output silently
    Capture,
    /// Write each (filtered) stdout line to the output sink as it arrives,
    /// after the given prefix. stderr follows once the command has exited
    /// successfully; a failed command's stderr is left to the caller.
    Stream { prefix: String },
}

/// Result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the command exited with status 0
    pub success: bool,
    /// stdout followed by stderr, after the grep filter
    pub output: String,
}

/// Keep only lines containing `pattern`. `None` keeps everything.
pub fn grep_lines(text: &str, pattern: Option<&str>) -> String {
    match pattern {
        None => text.to_string(),
        Some(pattern) => text
            .lines()
            .filter(|line| line.contains(pattern))
            .map(|line| format!("{}\n", line))
            .collect(),
    }
}

/// Run `command` (program followed by its arguments) in `dir`.
///
/// A command that cannot be spawned is an `Err`; a command that runs and
/// exits non-zero is `Ok` with `success == false`. Output that is not valid
/// UTF-8 is converted lossily. Streamed lines go to `out`.
pub fn execute_command<W>(
    command: &[String],
    dir: &Path,
    mode: &OutputMode,
    grep: Option<&str>,
    out: &mut W,
) -> Result<CommandOutput>
where
    W: Write + ?Sized,
{
    let (program, args) = command
        .split_first()
        .ok_or_else(|| GitPlusError::command("empty command"))?;

    debug!(dir = %dir.display(), command = %command.join(" "), "executing");

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);

    let output = match mode {
        OutputMode::Capture => cmd.output().map_err(|e| spawn_error(program, e))?,
        OutputMode::Stream { prefix } => {
            let child = cmd
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .map_err(|e| spawn_error(program, e))?;
            stream_output(child, prefix, grep, out)?
        }
    };

    let success = output.status.success();
    debug!(status = ?output.status.code(), "command finished");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if let OutputMode::Stream { prefix } = mode {
        if success {
            for line in stderr.lines() {
                writeln!(out, "{}{}", prefix, line)?;
            }
            out.flush()?;
        }
    }

    let mut text = grep_lines(&stdout, grep);
    text.push_str(&stderr);

    Ok(CommandOutput {
        success,
        output: text,
    })
}

fn spawn_error(program: &str, e: io::Error) -> GitPlusError {
    GitPlusError::command(format!("cannot run '{}': {}", program, e))
}

/// Echo stdout line by line while stderr drains on its own thread.
///
/// The child is always waited for, even when echoing fails.
fn stream_output<W>(
    mut child: Child,
    prefix: &str,
    grep: Option<&str>,
    out: &mut W,
) -> Result<Output>
where
    W: Write + ?Sized,
{
    let stderr_reader = child.stderr.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf).map(|_| buf)
        })
    });

    let mut stdout = Vec::new();
    let echoed = match child.stdout.take() {
        Some(pipe) => echo_lines(pipe, prefix, grep, out, &mut stdout),
        None => Ok(()),
    };
    if echoed.is_err() {
        // Unblock the stderr reader and the wait below.
        let _ = child.kill();
    }

    let stderr = match stderr_reader {
        Some(handle) => join_reader(handle),
        None => Ok(Vec::new()),
    };
    let status = child.wait()?;
    echoed?;

    Ok(Output {
        status,
        stdout,
        stderr: stderr?,
    })
}

fn echo_lines<R, W>(
    pipe: R,
    prefix: &str,
    grep: Option<&str>,
    out: &mut W,
    captured: &mut Vec<u8>,
) -> Result<()>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut reader = BufReader::new(pipe);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        captured.extend_from_slice(&line);

        let text = String::from_utf8_lossy(&line);
        let text = text.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if grep.map_or(true, |pattern| text.contains(pattern)) {
            writeln!(out, "{}{}", prefix, text)?;
            out.flush()?;
        }
    }
}

fn join_reader(handle: JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>> {
    match handle.join() {
        Ok(read) => Ok(read?),
        Err(_) => Err(GitPlusError::command("stderr reader thread panicked")),
    }
}
