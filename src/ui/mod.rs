//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Styling and output formatting
//! - This module - Interactive prompts and user input handling

use console::Term;

use crate::domain::{Branch, Release};
use crate::error::{ReleaseError, Result};

pub mod formatter;
pub mod input;

pub use formatter::{
    display_choice, display_error, display_notice, display_release_created, Styler,
};
pub use input::{key_or_cancel, LineEditor, LineEvent};

/// Interactive questions asked during the release workflow
///
/// `Ok(None)` means the user cancelled; cancellation is not an error.
pub trait Prompter {
    /// Pick the target branch; returns an index into `branches`
    fn select_target(&self, branches: &[Branch], last_release: &Release) -> Result<Option<usize>>;

    /// Ask for the new tag, pre-filled with `suggested`
    fn prompt_tag(&self, suggested: &str, last_tag: &str) -> Result<Option<String>>;
}

/// Outcome of one line typed at the branch menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Cancel,
    Invalid,
}

/// Interpret branch menu input.
///
/// Empty input picks the first entry, `q` cancels, otherwise a 1-based
/// index is expected.
pub fn parse_selection(input: &str, count: usize) -> Selection {
    match input.trim() {
        "" => Selection::Index(0),
        "q" | "Q" | "quit" => Selection::Cancel,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 && n <= count => Selection::Index(n - 1),
            _ => Selection::Invalid,
        },
    }
}

/// [Prompter] reading from the controlling terminal
///
/// Keys are read raw, so Ctrl-C reaches the prompt as a key press and
/// cancels instead of killing the process.
pub struct TerminalPrompter {
    term: Term,
    styler: Styler,
}

impl TerminalPrompter {
    pub fn new(styler: Styler) -> Self {
        Self::with_term(Term::stdout(), styler)
    }

    pub fn with_term(term: Term, styler: Styler) -> Self {
        TerminalPrompter { term, styler }
    }

    /// Prompts need a real terminal; piped output would answer them blindly
    fn ensure_terminal(&self) -> Result<()> {
        if self.term.is_term() {
            Ok(())
        } else {
            Err(ReleaseError::config(
                "git-release needs an interactive terminal",
            ))
        }
    }

    /// Read one line after `prompt`, starting from `initial`.
    ///
    /// Returns `None` when the user cancels.
    fn read_line(&self, prompt: &str, initial: &str) -> Result<Option<String>> {
        let mut line = LineEditor::new(initial);
        self.term.write_str(&format!("{}{}", prompt, line.buffer()))?;

        loop {
            match line.apply(key_or_cancel(self.term.read_key_raw())?) {
                LineEvent::Pending => {
                    self.term.clear_line()?;
                    self.term.write_str(&format!("{}{}", prompt, line.buffer()))?;
                }
                LineEvent::Submit(text) => {
                    self.term.write_line("")?;
                    return Ok(Some(text));
                }
                LineEvent::Cancel => {
                    self.term.write_line("")?;
                    return Ok(None);
                }
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn select_target(&self, branches: &[Branch], last_release: &Release) -> Result<Option<usize>> {
        self.ensure_terminal()?;
        let s = &self.styler;

        self.term.write_line(&format!(
            "{} {}",
            s.question_icon(),
            s.bold("Choose a target branch")
        ))?;
        for (i, branch) in branches.iter().enumerate() {
            let ahead = branch
                .commits_beyond(&last_release.tag)
                .map(|n| format!(" (+{})", n))
                .unwrap_or_default();
            self.term
                .write_line(&format!("  {}. {}{}", i + 1, branch.name, s.faint(ahead)))?;
        }

        let prompt = format!(
            "Select a branch (1-{}, q to cancel) [default: 1]: ",
            branches.len()
        );
        loop {
            let Some(input) = self.read_line(&prompt, "")? else {
                return Ok(None);
            };

            match parse_selection(&input, branches.len()) {
                Selection::Index(i) => {
                    display_choice(s, "Target:", &branches[i].name);
                    return Ok(Some(i));
                }
                Selection::Cancel => return Ok(None),
                Selection::Invalid => {
                    self.term
                        .write_line(&format!("{} Invalid selection", s.bad_icon()))?;
                }
            }
        }
    }

    fn prompt_tag(&self, suggested: &str, last_tag: &str) -> Result<Option<String>> {
        self.ensure_terminal()?;
        let s = &self.styler;

        let prompt = format!(
            "{} Enter release tag (last release: {}): ",
            s.question_icon(),
            s.highlight(last_tag)
        );
        let Some(input) = self.read_line(&prompt, suggested)? else {
            return Ok(None);
        };

        let tag = input.trim().to_string();
        if !tag.is_empty() {
            display_choice(s, "Tag:", &tag);
        }
        Ok(Some(tag))
    }
}
