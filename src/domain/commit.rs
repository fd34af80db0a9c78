/// Width of the abbreviated commit id shown in release messages
pub const SHORT_ID_LEN: usize = 7;

/// A commit as reported by the remote repository service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Full commit hash
    pub id: String,
    /// Abbreviated hash
    pub short_id: String,
    /// Full commit message, first line is the subject
    pub message: String,
    /// Author display name
    pub author: String,
}

impl Commit {
    /// Create a commit, deriving the short id from the full hash
    pub fn new(id: impl Into<String>, message: impl Into<String>, author: impl Into<String>) -> Self {
        let id = id.into();
        let short_id = id.chars().take(SHORT_ID_LEN).collect();

        Commit {
            id,
            short_id,
            message: message.into(),
            author: author.into(),
        }
    }

    /// First line of the commit message
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id_is_prefix() {
        let commit = Commit::new("0123456789abcdef", "msg", "Alice");
        assert_eq!(commit.short_id, "0123456");
    }

    #[test]
    fn test_short_id_of_short_hash() {
        let commit = Commit::new("abc", "msg", "Alice");
        assert_eq!(commit.short_id, "abc");
    }

    #[test]
    fn test_subject_is_first_line() {
        let commit = Commit::new("abc", "Fix bug\n\nLonger explanation", "Alice");
        assert_eq!(commit.subject(), "Fix bug");
    }

    #[test]
    fn test_subject_of_empty_message() {
        let commit = Commit::new("abc", "", "Alice");
        assert_eq!(commit.subject(), "");
    }
}
