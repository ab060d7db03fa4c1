use crate::github::CommitSha;

/// A comment that can be posted to a pull request.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn render(&self) -> &str {
        &self.text
    }
}

pub fn changeset_detected_comment(commit_sha: &CommitSha) -> Comment {
    Comment::new(format!(
        r#"###  ✅  Changeset detected

Latest commit: {commit_sha}

**The changes in this PR will be included in the next version bump.**"#
    ))
}

pub fn changeset_missing_comment(commit_sha: &CommitSha) -> Comment {
    Comment::new(format!(
        r#"###  ⚠️  No Changeset found

Latest commit: {commit_sha}

Merging this PR will not cause a version bump for any packages. If these changes should not result in a new version, you're good to go. **If these changes should result in a version bump, you need to add a changeset.**"#
    ))
}
