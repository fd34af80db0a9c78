//! Domain logic - pure release rules independent of git and the network

pub mod branch;
pub mod commit;
pub mod release;
pub mod tag;
pub mod version;

pub use branch::{rank_branches, Branch};
pub use commit::Commit;
pub use release::Release;
pub use tag::Tag;
pub use version::{next_version, DEFAULT_TAG_PREFIX};
