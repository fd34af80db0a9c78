use crate::error::{ReleaseError, Result};

/// Tag prefix used when none is configured
pub const DEFAULT_TAG_PREFIX: &str = "v";

/// Suggests the tag following `last_tag` by bumping its patch component.
///
/// The prefix is stripped before parsing and re-applied only when the input
/// carried it. Prerelease and build metadata are dropped.
///
/// # Example
/// ```
/// # use git_release::domain::next_version;
/// assert_eq!(next_version("v1.2.3", "v").unwrap(), "v1.2.4");
/// assert_eq!(next_version("2.0.9", "v").unwrap(), "2.0.10");
/// ```
pub fn next_version(last_tag: &str, prefix: &str) -> Result<String> {
    let (has_prefix, bare) = match last_tag.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() => (true, rest),
        _ => (false, last_tag),
    };

    let current = semver::Version::parse(bare).map_err(|e| {
        ReleaseError::version(format!("cannot parse tag '{}': {}", last_tag, e))
    })?;
    let patch = current.patch.checked_add(1).ok_or_else(|| {
        ReleaseError::version(format!("cannot bump patch of '{}': out of range", last_tag))
    })?;
    let next = semver::Version::new(current.major, current.minor, patch);

    Ok(if has_prefix {
        format!("{}{}", prefix, next)
    } else {
        next.to_string()
    })
}
