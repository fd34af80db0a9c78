use anyhow::{Context, Result};
use clap::Parser;

use git_release::cli::{detect_repository, AbortReason, ReleaseWorkflow, WorkflowOutcome};
use git_release::config;
use git_release::editor::ScopedEditor;
use git_release::git::Git2Repository;
use git_release::github::GithubClient;
use git_release::ui::{self, Styler, TerminalPrompter};

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Draft a GitHub release from the commits since the last one"
)]
struct Args {}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let _args = Args::parse();
    let styler = Styler;

    if let Err(e) = run(&styler) {
        ui::display_error(&styler, &format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(styler: &Styler) -> Result<()> {
    let config = config::load_config(None)?;

    // Everything that can be misconfigured is checked before the first request
    let repo = Git2Repository::open(".")?;
    let context = detect_repository(&repo, &config.remote)?;
    let token = config::find_token()?;
    let editor = ScopedEditor::from_env(&config.default_editor, &context.git_dir)?;

    let client = GithubClient::new(&config.api_url, context.slug.clone(), &token)
        .context("unable to set up the GitHub client")?;
    let prompter = TerminalPrompter::new(*styler);

    let workflow = ReleaseWorkflow::new(&client, &prompter, &editor, &config.tag_prefix);
    match workflow.run(&context)? {
        WorkflowOutcome::Released(release) => ui::display_release_created(styler, &release),
        WorkflowOutcome::Aborted(AbortReason::Cancelled) => {}
        WorkflowOutcome::Aborted(reason) => ui::display_notice(styler, &reason.to_string()),
    }

    Ok(())
}
