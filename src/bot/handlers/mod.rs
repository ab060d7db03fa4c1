use tracing::Instrument;

use crate::bot::event::PullRequestEvent;
use crate::bot::handlers::pr_events::reconcile_status_comment;
use crate::bot::RepositoryClient;
use crate::config::BotConfig;
use crate::github::CommentId;
use crate::utils::logging::LogError;

mod pr_events;

/// What happened to the status comment of a pull request after handling an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusCommentAction {
    /// The pull request is exempt, nothing was read or written.
    Skipped,
    Created(CommentId),
    Updated(CommentId),
}

/// This function handles a single pull request event.
///
/// Errors are logged within the span of the event and then returned to the caller,
/// which is expected to treat the whole delivery as failed.
pub async fn handle_pull_request_event<Client: RepositoryClient + Sync>(
    event: PullRequestEvent,
    client: &Client,
    config: &BotConfig,
) -> anyhow::Result<StatusCommentAction> {
    let span = tracing::info_span!(
        "PullRequest",
        pr = format!("{}#{}", event.repository, event.pr_number),
        action = event.action.as_str()
    );
    tracing::debug!(parent: &span, "Received pull request event: {event:?}");

    match reconcile_status_comment(client, config, &event)
        .instrument(span.clone())
        .await
    {
        Ok(action) => Ok(action),
        Err(error) => {
            span.log_error(&error);
            Err(error)
        }
    }
}
