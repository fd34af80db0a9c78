use crate::domain::Tag;
use crate::error::{ReleaseError, Result};

/// A GitHub release, either drafted locally or returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release title
    pub name: String,
    /// Release body
    pub description: String,
    pub tag: Tag,
    /// Web page of the release, set once it exists remotely
    pub html_url: Option<String>,
}

impl Release {
    /// Build a release ready for submission.
    ///
    /// Fails when the title or body is empty; such a release is never sent.
    pub fn draft(name: impl Into<String>, description: impl Into<String>, tag: Tag) -> Result<Self> {
        let release = Release {
            name: name.into(),
            description: description.into(),
            tag,
            html_url: None,
        };
        release.validate()?;
        Ok(release)
    }

    /// Check the non-empty title and body invariant
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ReleaseError::validation(
                "empty release title and message",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_ok() {
        let release = Release::draft("v1.0.1", "* fix", Tag::new("v1.0.1")).unwrap();
        assert_eq!(release.name, "v1.0.1");
        assert!(release.html_url.is_none());
    }

    #[test]
    fn test_draft_rejects_empty_title() {
        assert!(Release::draft("", "body", Tag::new("v1")).is_err());
    }

    #[test]
    fn test_draft_rejects_blank_body() {
        let err = Release::draft("title", "  \n", Tag::new("v1")).unwrap_err();
        assert!(matches!(err, ReleaseError::Validation(_)));
    }
}
