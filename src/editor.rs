//! External text editor launched on a scratch file inside the repository
//! metadata directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{ReleaseError, Result};

/// Environment variable selecting the editor command
pub const EDITOR_ENV: &str = "EDITOR";

/// Editor used when `EDITOR` is unset
pub const DEFAULT_EDITOR: &str = "vim";

/// Scratch file name, overwritten on every run
pub const RELEASE_MSG_FILENAME: &str = "RELEASE_EDITMSG";

/// Something that lets the user edit a piece of text
pub trait TextEditor {
    /// Present `initial` for editing and return the saved text
    fn edit(&self, initial: &str) -> Result<String>;
}

/// Editor process bound to a single scratch file
#[derive(Debug, Clone)]
pub struct ScopedEditor {
    program: PathBuf,
    args: Vec<String>,
    file: PathBuf,
}

impl ScopedEditor {
    /// Resolve the editor command and bind it to `<git_dir>/RELEASE_EDITMSG`.
    ///
    /// `command` is split on whitespace into a program and its arguments; the
    /// program must be found on `PATH` (or be a path to an existing file).
    /// A missing or blank command falls back to `default_editor`.
    pub fn resolve(command: Option<&str>, default_editor: &str, git_dir: &Path) -> Result<Self> {
        let command = command
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(default_editor);

        let mut parts = command.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| ReleaseError::editor("no editor configured"))?;

        let program = which::which(name).map_err(|e| {
            ReleaseError::editor(format!("unable to find editor({}): {}", name, e))
        })?;

        Ok(ScopedEditor {
            program,
            args: parts.map(str::to_string).collect(),
            file: git_dir.join(RELEASE_MSG_FILENAME),
        })
    }

    /// Resolve the editor from the `EDITOR` environment variable
    pub fn from_env(default_editor: &str, git_dir: &Path) -> Result<Self> {
        let command = std::env::var(EDITOR_ENV).ok();
        Self::resolve(command.as_deref(), default_editor, git_dir)
    }

    /// Path of the scratch file
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Resolved editor executable
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl TextEditor for ScopedEditor {
    fn edit(&self, initial: &str) -> Result<String> {
        fs::write(&self.file, initial).map_err(|e| {
            ReleaseError::editor(format!(
                "unable to write release message to {}: {}",
                self.file.display(),
                e
            ))
        })?;

        debug!(editor = %self.program.display(), file = %self.file.display(), "launching editor");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.file)
            .status()
            .map_err(|e| ReleaseError::editor(format!("edit error: {}", e)))?;

        if !status.success() {
            return Err(ReleaseError::editor(format!(
                "editor exited with {}",
                status
            )));
        }

        Ok(fs::read_to_string(&self.file)?)
    }
}
