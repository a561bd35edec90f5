//! Post-generation hook execution.
//! Hooks are external commands run one after another inside the generated
//! project. The first failure stops the sequence; files already written are
//! left in place.

use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// One external command: a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    program: String,
    args: Vec<String>,
}

impl Hook {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Builds a hook from an argv list, `["uv", "sync"]` style.
    pub fn from_argv(argv: Vec<String>) -> Result<Self> {
        let mut argv = argv.into_iter();
        match argv.next() {
            Some(program) if !program.trim().is_empty() => {
                Ok(Self::new(program, argv.collect()))
            }
            _ => Err(Error::ConfigError("hook command must not be empty".to_string())),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn describe_exit(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with status {code}"),
        None => format!("was terminated ({status})"),
    }
}

/// Runs a single hook in `cwd`, inheriting stdout and stderr.
pub fn run_hook<P: AsRef<Path>>(hook: &Hook, cwd: P) -> Result<()> {
    let cwd = cwd.as_ref();
    debug!("Running hook `{}` in {}", hook, cwd.display());

    let status = Command::new(&hook.program)
        .args(&hook.args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| Error::HookExecution {
            command: hook.to_string(),
            exit: format!("could not be started: {e}"),
        })?;

    if !status.success() {
        return Err(Error::HookExecution {
            command: hook.to_string(),
            exit: describe_exit(status),
        });
    }

    Ok(())
}

/// Runs `hooks` strictly in order inside `cwd`, stopping at the first failure.
pub fn run_hooks<P: AsRef<Path>>(hooks: &[Hook], cwd: P) -> Result<()> {
    let cwd = cwd.as_ref();
    for hook in hooks {
        run_hook(hook, cwd)?;
    }
    debug!("Ran {} post-generation hook(s)", hooks.len());
    Ok(())
}
