//! Command-line workflow layer between the binary and the library modules

pub mod orchestration;

pub use orchestration::{
    detect_repository, load_remote_state, AbortReason, ReleaseWorkflow, RepoContext,
    WorkflowOutcome, WorkflowState,
};
