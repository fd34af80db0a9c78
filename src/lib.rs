pub mod cli;
pub mod config;
pub mod diff;
pub mod domain;
pub mod editor;
pub mod error;
pub mod git;
pub mod github;
pub mod message;
pub mod ui;

pub use error::{ReleaseError, Result};
