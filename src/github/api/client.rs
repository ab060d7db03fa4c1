use anyhow::Context;
use axum::async_trait;
use octocrab::{Octocrab, Page};

use crate::bot::{ChangedFile, Comment, RepositoryClient, ThreadComment};
use crate::github::{CommentId, GithubRepoName, PullRequestNumber};

/// The largest page size allowed by the GitHub API.
const PAGE_SIZE: u8 = 100;

#[derive(serde::Serialize)]
struct PageParams {
    per_page: u8,
}

#[derive(serde::Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

#[derive(serde::Deserialize, Debug)]
struct CommentAuthorPayload {
    login: String,
}

#[derive(serde::Deserialize, Debug)]
struct IssueCommentPayload {
    id: u64,
    user: Option<CommentAuthorPayload>,
}

/// Provides access to a single repository of an app installation using the GitHub API.
pub struct GithubRepositoryClient {
    client: Octocrab,
    repo_name: GithubRepoName,
}

impl GithubRepositoryClient {
    pub fn new(client: Octocrab, repo_name: GithubRepoName) -> Self {
        Self { client, repo_name }
    }

    fn format_pr(&self, pr: PullRequestNumber) -> String {
        format!("{}#{}", self.repo_name, pr)
    }
}

#[async_trait]
impl RepositoryClient for GithubRepositoryClient {
    async fn list_changed_files(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<ChangedFile>> {
        // https://docs.github.com/en/rest/pulls/pulls?apiVersion=2022-11-28#list-pull-requests-files
        let page: Page<ChangedFile> = self
            .client
            .get(
                format!("/repos/{}/pulls/{pr}/files", self.repo_name),
                Some(&PageParams {
                    per_page: PAGE_SIZE,
                }),
            )
            .await
            .with_context(|| format!("Cannot fetch changed files of {}", self.format_pr(pr)))?;
        let files = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot fetch changed files of {}", self.format_pr(pr)))?;
        Ok(files)
    }

    async fn list_comments(&self, pr: PullRequestNumber) -> anyhow::Result<Vec<ThreadComment>> {
        // https://docs.github.com/en/rest/issues/comments?apiVersion=2022-11-28#list-issue-comments
        let page: Page<IssueCommentPayload> = self
            .client
            .get(
                format!("/repos/{}/issues/{pr}/comments", self.repo_name),
                Some(&PageParams {
                    per_page: PAGE_SIZE,
                }),
            )
            .await
            .with_context(|| format!("Cannot fetch comments of {}", self.format_pr(pr)))?;
        let comments = self
            .client
            .all_pages(page)
            .await
            .with_context(|| format!("Cannot fetch comments of {}", self.format_pr(pr)))?;

        Ok(comments
            .into_iter()
            .map(|comment| ThreadComment {
                id: CommentId(comment.id),
                author: comment.user.map(|user| user.login),
            })
            .collect())
    }

    /// The comment will be posted as the Github App user of the bot.
    async fn post_comment(
        &self,
        pr: PullRequestNumber,
        comment: Comment,
    ) -> anyhow::Result<CommentId> {
        // https://docs.github.com/en/rest/issues/comments?apiVersion=2022-11-28#create-an-issue-comment
        let response: IssueCommentPayload = self
            .client
            .post(
                format!("/repos/{}/issues/{pr}/comments", self.repo_name),
                Some(&CommentRequest {
                    body: comment.render(),
                }),
            )
            .await
            .with_context(|| format!("Cannot post comment to {}", self.format_pr(pr)))?;
        Ok(CommentId(response.id))
    }

    async fn update_comment(&self, id: CommentId, comment: Comment) -> anyhow::Result<()> {
        // https://docs.github.com/en/rest/issues/comments?apiVersion=2022-11-28#update-an-issue-comment
        let response: IssueCommentPayload = self
            .client
            .patch(
                format!("/repos/{}/issues/comments/{id}", self.repo_name),
                Some(&CommentRequest {
                    body: comment.render(),
                }),
            )
            .await
            .with_context(|| format!("Cannot update comment {id} in {}", self.repo_name))?;
        tracing::trace!("Updated comment: {response:?}");
        Ok(())
    }
}
