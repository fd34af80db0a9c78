//! Release message template and the comment-stripping edit protocol.
//!
//! The rendered template is fully commented out, so saving it unchanged
//! produces an empty message and the release is aborted.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::Commit;

static COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*#").expect("valid comment pattern"));

/// Title and body recovered from an edited release message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseMessage {
    pub title: String,
    pub body: String,
}

impl ReleaseMessage {
    /// True when either part is missing; such a message aborts the release
    pub fn is_incomplete(&self) -> bool {
        self.title.is_empty() || self.body.is_empty()
    }
}

/// Whether `line` is ignored by [parse_message]
pub fn is_comment(line: &str) -> bool {
    COMMENT_LINE.is_match(line)
}

/// Render the editable release message for `tag_name`.
///
/// Commits are listed newest first, one `#* [short] - subject (author)` line
/// each. `commits` is expected oldest first, as returned by the compare API.
pub fn render_message(tag_name: &str, commits: &[Commit]) -> String {
    let notes: String = commits
        .iter()
        .rev()
        .map(|commit| {
            format!(
                "#* [{}] - {} ({})\n",
                commit.short_id,
                commit.subject(),
                commit.author
            )
        })
        .collect();

    format!(
        "#{tag_name}
#
# Please enter the release title as the first line. Lines starting
# with '#' will be ignored, and an empty title or message aborts the release.
# Remove the leading '#' from any line below to put it in the release body.
#
#**Commits**
#
{notes}"
    )
}

/// Parse an edited release message.
///
/// Comment lines are dropped. The first remaining line is the title and the
/// rest, joined and trimmed, is the body. No remaining lines gives an empty
/// message.
pub fn parse_message(text: &str) -> ReleaseMessage {
    let mut lines = text.lines().filter(|line| !is_comment(line));

    let Some(title) = lines.next() else {
        return ReleaseMessage::default();
    };

    let body = lines.collect::<Vec<_>>().join("\n");

    ReleaseMessage {
        title: title.trim().to_string(),
        body: body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_commits() -> Vec<Commit> {
        vec![
            Commit::new("abc1234aaaa", "Fix bug", "Alice"),
            Commit::new("def4567bbbb", "Add feature\n\nwith details", "Bob"),
        ]
    }

    #[test]
    fn test_render_layout() {
        let text = render_message("v1.0.1", &sample_commits());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "#v1.0.1");
        assert!(lines.contains(&"#**Commits**"));
        assert!(lines.iter().all(|l| is_comment(l)));
    }

    #[test]
    fn test_render_lists_newest_first() {
        let text = render_message("v1.0.1", &sample_commits());
        let feature = text.find("#* [def4567] - Add feature (Bob)").unwrap();
        let fix = text.find("#* [abc1234] - Fix bug (Alice)").unwrap();
        assert!(feature < fix);
        assert!(!text.contains("with details"));
    }

    #[test]
    fn test_unedited_template_is_empty() {
        let text = render_message("v1.0.1", &sample_commits());
        assert_eq!(parse_message(&text), ReleaseMessage::default());
    }

    #[test]
    fn test_unedited_template_without_commits_is_empty() {
        assert_eq!(parse_message(&render_message("v2", &[])), ReleaseMessage::default());
    }

    #[test]
    fn test_parse_empty_input() {
        assert_eq!(parse_message(""), ReleaseMessage::default());
    }

    #[test]
    fn test_parse_single_line_without_newline() {
        let msg = parse_message("v1.2.0");
        assert_eq!(msg.title, "v1.2.0");
        assert_eq!(msg.body, "");
        assert!(msg.is_incomplete());
    }

    #[test]
    fn test_parse_all_comments() {
        assert_eq!(parse_message("# a\n#b\n   # c\n"), ReleaseMessage::default());
    }

    #[test]
    fn test_indented_hash_is_comment() {
        assert!(is_comment("  # foo"));
        assert!(is_comment("\t#"));
        assert!(!is_comment("foo # bar"));
    }

    #[test]
    fn test_blank_body_is_empty() {
        let msg = parse_message("v2.0.0\n\n\n");
        assert_eq!(msg.title, "v2.0.0");
        assert_eq!(msg.body, "");
    }

    #[test]
    fn test_parse_title_and_body() {
        let text = "# comment\nv1.0.1\n\n* [abc1234] - Fix bug (Alice)\n# ignored\n* [def4567] - Add feature (Bob)\n\n";
        let msg = parse_message(text);
        assert_eq!(msg.title, "v1.0.1");
        assert_eq!(
            msg.body,
            "* [abc1234] - Fix bug (Alice)\n* [def4567] - Add feature (Bob)"
        );
        assert!(!msg.is_incomplete());
    }

    #[test]
    fn test_parse_crlf_input() {
        let msg = parse_message("Title\r\nBody line\r\n");
        assert_eq!(msg.title, "Title");
        assert_eq!(msg.body, "Body line");
    }

    #[test]
    fn test_uncommented_tag_line_becomes_title() {
        let text = render_message("v3.0.0", &[]).replacen("#v3.0.0", "v3.0.0", 1);
        assert_eq!(parse_message(&text).title, "v3.0.0");
    }
}
