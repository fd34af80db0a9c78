use crate::domain::Commit;

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// Commit the tag points at, when known
    pub target: Option<Commit>,
    /// Number of commits reachable from the tag
    pub commit_count: usize,
}

impl Tag {
    /// Create a tag with no resolved target
    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            target: None,
            commit_count: 0,
        }
    }

    /// Set the target commit and its history size
    pub fn with_target(mut self, target: Commit, commit_count: usize) -> Self {
        self.target = Some(target);
        self.commit_count = commit_count;
        self
    }

    /// Reference used when comparing against this tag: the commit id when
    /// resolved, otherwise the tag name itself
    pub fn reference(&self) -> &str {
        self.target
            .as_ref()
            .map(|c| c.id.as_str())
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = Tag::new("v1.2.3");
        assert_eq!(tag.name, "v1.2.3");
        assert!(tag.target.is_none());
    }

    #[test]
    fn test_reference_prefers_commit_id() {
        let tag = Tag::new("v1.2.3").with_target(Commit::new("deadbeef", "m", "a"), 10);
        assert_eq!(tag.reference(), "deadbeef");
        assert_eq!(tag.commit_count, 10);
    }

    #[test]
    fn test_reference_falls_back_to_name() {
        assert_eq!(Tag::new("v1.2.3").reference(), "v1.2.3");
    }
}
