//! Main workflow orchestration logic
//!
//! Drives one release from repository detection to submission. Every
//! collaborator sits behind a trait so the whole flow runs in tests
//! without a terminal, an editor process or the network.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::diff::{diff_commits, CommitDiff};
use crate::domain::{next_version, rank_branches, Branch, Release, Tag};
use crate::editor::TextEditor;
use crate::error::{ReleaseError, Result};
use crate::git::{LocalRepository, RepoSlug};
use crate::github::RemoteService;
use crate::message::{parse_message, render_message};
use crate::ui::Prompter;

/// Steps of a release run, logged as the workflow advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Init,
    RepoDetected,
    RemoteStateLoaded,
    PreconditionsChecked,
    TargetSelected,
    DiffComputed,
    TagChosen,
    MessageEdited,
    Submitted,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowState::Init => "init",
            WorkflowState::RepoDetected => "repo-detected",
            WorkflowState::RemoteStateLoaded => "remote-state-loaded",
            WorkflowState::PreconditionsChecked => "preconditions-checked",
            WorkflowState::TargetSelected => "target-selected",
            WorkflowState::DiffComputed => "diff-computed",
            WorkflowState::TagChosen => "tag-chosen",
            WorkflowState::MessageEdited => "message-edited",
            WorkflowState::Submitted => "submitted",
        };
        f.write_str(s)
    }
}

/// Why a run stopped without creating a release
///
/// None of these is a failure; the process exits successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    /// The user backed out of a prompt
    Cancelled,
    /// The repository has no branches to release from
    NoBranches,
    /// The selected branch holds nothing beyond the last release
    AlreadyReleased { branch: String },
    /// The tag prompt was left empty
    EmptyTag,
    /// The edited message lacks a title or a body
    EmptyMessage,
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::Cancelled => f.write_str("release cancelled"),
            AbortReason::NoBranches => f.write_str("no branches"),
            AbortReason::AlreadyReleased { branch } => {
                write!(f, "{} is already released", branch)
            }
            AbortReason::EmptyTag => f.write_str("empty tag name, release aborted"),
            AbortReason::EmptyMessage => {
                f.write_str("empty release title or message, release aborted")
            }
        }
    }
}

/// Result of a run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Released(Release),
    Aborted(AbortReason),
}

/// What the local repository tells us before any network call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub slug: RepoSlug,
    pub current_branch: String,
    /// Directory holding the editor scratch file
    pub git_dir: PathBuf,
}

/// Inspect the working copy and resolve the hosted repository.
///
/// Fails when run outside a repository, when `remote_name` is missing or
/// its URL does not name an `owner/repo`, or when HEAD is detached.
pub fn detect_repository<L: LocalRepository + ?Sized>(
    repo: &L,
    remote_name: &str,
) -> Result<RepoContext> {
    if !repo.is_inside_repository() {
        return Err(ReleaseError::config("not a git repo"));
    }

    let url = repo.remote_url(remote_name)?;
    let slug = RepoSlug::parse(&url).ok_or_else(|| {
        ReleaseError::config(format!(
            "cannot find owner/repo in the URL of remote '{}': {}",
            remote_name, url
        ))
    })?;
    let current_branch = repo.current_branch_name()?;

    let context = RepoContext {
        slug,
        current_branch,
        git_dir: repo.git_dir(),
    };
    debug!(
        state = %WorkflowState::RepoDetected,
        repo = %context.slug,
        branch = %context.current_branch,
        "repository detected"
    );
    Ok(context)
}

/// Fetch the latest release and the branch list at the same time.
///
/// Both requests always run to completion. When both fail the release
/// error is reported.
pub fn load_remote_state<S: RemoteService + ?Sized>(
    remote: &S,
) -> Result<(Option<Release>, Vec<Branch>)> {
    let (latest, branches) = rayon::join(|| remote.latest_release(), || remote.list_branches());
    Ok((latest?, branches?))
}

/// Interactive release drafting over the given collaborators
pub struct ReleaseWorkflow<'a, S, P, E>
where
    S: RemoteService + ?Sized,
    P: Prompter + ?Sized,
    E: TextEditor + ?Sized,
{
    remote: &'a S,
    prompter: &'a P,
    editor: &'a E,
    tag_prefix: String,
}

impl<'a, S, P, E> ReleaseWorkflow<'a, S, P, E>
where
    S: RemoteService + ?Sized,
    P: Prompter + ?Sized,
    E: TextEditor + ?Sized,
{
    pub fn new(remote: &'a S, prompter: &'a P, editor: &'a E, tag_prefix: impl Into<String>) -> Self {
        ReleaseWorkflow {
            remote,
            prompter,
            editor,
            tag_prefix: tag_prefix.into(),
        }
    }

    /// Run the workflow for the repository described by `context`.
    ///
    /// Errors are failures; stopping early for any other reason is reported
    /// as [WorkflowOutcome::Aborted].
    pub fn run(&self, context: &RepoContext) -> Result<WorkflowOutcome> {
        let (latest, branches) = load_remote_state(self.remote)?;
        enter(WorkflowState::RemoteStateLoaded);
        debug!(branches = branches.len(), has_release = latest.is_some(), "remote state loaded");

        if branches.is_empty() {
            return Ok(WorkflowOutcome::Aborted(AbortReason::NoBranches));
        }
        let last = latest.ok_or(ReleaseError::NoPreviousRelease)?;
        enter(WorkflowState::PreconditionsChecked);

        let branches = rank_branches(branches, &context.current_branch);
        let Some(index) = self.prompter.select_target(&branches, &last)? else {
            return Ok(WorkflowOutcome::Aborted(AbortReason::Cancelled));
        };
        let target = branches
            .get(index)
            .ok_or_else(|| ReleaseError::validation(format!("no branch at index {}", index)))?;
        enter(WorkflowState::TargetSelected);

        let suggested = next_version(&last.tag.name, &self.tag_prefix)?;

        let commits = match diff_commits(self.remote, last.tag.reference(), target.reference())? {
            CommitDiff::Ahead(commits) => commits,
            CommitDiff::NothingNew(status) => {
                debug!(branch = %target.name, %status, "nothing to release");
                return Ok(WorkflowOutcome::Aborted(AbortReason::AlreadyReleased {
                    branch: target.name.clone(),
                }));
            }
        };
        enter(WorkflowState::DiffComputed);

        let tag_name = match self.prompter.prompt_tag(&suggested, &last.tag.name)? {
            None => return Ok(WorkflowOutcome::Aborted(AbortReason::Cancelled)),
            Some(tag) if tag.trim().is_empty() => {
                return Ok(WorkflowOutcome::Aborted(AbortReason::EmptyTag))
            }
            Some(tag) => tag.trim().to_string(),
        };
        enter(WorkflowState::TagChosen);

        let edited = self.editor.edit(&render_message(&tag_name, &commits))?;
        let message = parse_message(&edited);
        if message.is_incomplete() {
            return Ok(WorkflowOutcome::Aborted(AbortReason::EmptyMessage));
        }
        enter(WorkflowState::MessageEdited);

        let draft = Release::draft(message.title, message.body, Tag::new(&tag_name))?;
        let created = self.remote.create_release(
            &draft.name,
            &tag_name,
            target.reference(),
            &draft.description,
        )?;
        enter(WorkflowState::Submitted);
        info!(repo = %context.slug, tag = %tag_name, target = %target.name, "release created");

        Ok(WorkflowOutcome::Released(created))
    }
}

fn enter(state: WorkflowState) {
    debug!(%state, "workflow state");
}
