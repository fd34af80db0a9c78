//! Pure formatting functions for UI output.
//!
//! Styling goes through [Styler], a stateless value handed to whatever
//! prints user-facing text. `console` drops the colors on its own when the
//! output is not a terminal.

use std::fmt::Display;

use console::{style, StyledObject};

use crate::domain::Release;

/// Stateless styling capability
#[derive(Debug, Clone, Copy, Default)]
pub struct Styler;

impl Styler {
    /// Names the user should notice: branches, tags
    pub fn highlight<D: Display>(&self, value: D) -> StyledObject<D> {
        style(value).cyan().bold()
    }

    pub fn bold<D: Display>(&self, value: D) -> StyledObject<D> {
        style(value).bold()
    }

    pub fn faint<D: Display>(&self, value: D) -> StyledObject<D> {
        style(value).dim()
    }

    pub fn good_icon(&self) -> StyledObject<&'static str> {
        style("✔").green().bold()
    }

    pub fn bad_icon(&self) -> StyledObject<&'static str> {
        style("✗").red().bold()
    }

    pub fn notice_icon(&self) -> StyledObject<&'static str> {
        style("!").yellow().bold()
    }

    pub fn question_icon(&self) -> StyledObject<&'static str> {
        style("?").blue().bold()
    }
}

/// Print a one-line error to stderr.
pub fn display_error(styler: &Styler, message: &str) {
    eprintln!("{} {}", styler.bad_icon(), message);
}

/// Print an informative message for a run that stopped without releasing.
pub fn display_notice(styler: &Styler, message: &str) {
    println!("{} {}", styler.notice_icon(), message);
}

/// Print a labelled choice the user just confirmed, e.g. `✔ Target: main`.
pub fn display_choice(styler: &Styler, label: &str, value: &str) {
    println!(
        "{} {} {}",
        styler.good_icon(),
        styler.bold(label),
        styler.highlight(value)
    );
}

/// Format the success report for a created release.
pub fn release_created_message(styler: &Styler, release: &Release) -> String {
    let url = release.html_url.as_deref().unwrap_or("(no URL returned)");
    format!(
        "{} New release({}) created:\n  {}",
        styler.good_icon(),
        styler.highlight(&release.tag.name),
        url
    )
}

/// Print the success report for a created release.
pub fn display_release_created(styler: &Styler, release: &Release) {
    println!("{}", release_created_message(styler, release));
}
