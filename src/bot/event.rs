use crate::github::{Branch, GithubRepoName, PullRequestNumber};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullRequestAction {
    /// A pull request was opened.
    Opened,
    /// New commits were pushed to the head branch of a pull request.
    Synchronize,
}

impl PullRequestAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestAction::Opened => "opened",
            PullRequestAction::Synchronize => "synchronize",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PullRequestEvent {
    pub repository: GithubRepoName,
    pub action: PullRequestAction,
    pub pr_number: PullRequestNumber,
    pub head: Branch,
}
