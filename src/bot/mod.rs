use axum::async_trait;

use crate::github::{CommentId, PullRequestNumber};

mod changeset;
mod comment;
pub mod event;
mod handlers;

pub use changeset::{has_changeset_been_added, ChangedFile, FileStatus};
pub use comment::{changeset_detected_comment, changeset_missing_comment, Comment};
pub use handlers::{handle_pull_request_event, StatusCommentAction};

/// Provides functionality for working with a remote repository.
#[async_trait]
pub trait RepositoryClient {
    /// List all files changed by the pull request with the given number.
    async fn list_changed_files(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<ChangedFile>>;

    /// List all comments posted on the conversation thread of the given pull request.
    async fn list_comments(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<ThreadComment>>;

    /// Post a comment to the pull request with the given number.
    async fn post_comment(
        &self,
        pr: PullRequestNumber,
        comment: Comment,
    ) -> anyhow::Result<CommentId>;

    /// Replace the text of an existing comment.
    async fn update_comment(&self, id: CommentId, comment: Comment) -> anyhow::Result<()>;
}

/// A comment from the conversation thread of a pull request.
#[derive(Clone, Debug, PartialEq)]
pub struct ThreadComment {
    pub id: CommentId,
    /// Login of the comment author. GitHub reports `None` for deleted ("ghost") accounts.
    pub author: Option<String>,
}
