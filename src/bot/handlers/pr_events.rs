use anyhow::Context;

use crate::bot::event::{PullRequestAction, PullRequestEvent};
use crate::bot::handlers::StatusCommentAction;
use crate::bot::{
    changeset_detected_comment, changeset_missing_comment, has_changeset_been_added,
    RepositoryClient,
};
use crate::config::BotConfig;
use crate::github::{CommentId, PullRequestNumber};

/// Makes sure that the pull request has exactly one up-to-date status comment,
/// updating the existing one if it can be found.
pub(super) async fn reconcile_status_comment<Client: RepositoryClient + Sync>(
    client: &Client,
    config: &BotConfig,
    event: &PullRequestEvent,
) -> anyhow::Result<StatusCommentAction> {
    if config.is_release_branch(&event.head.name) {
        tracing::debug!("Ignoring pull request from release branch {}", event.head.name);
        return Ok(StatusCommentAction::Skipped);
    }

    let pr = event.pr_number;

    // A freshly opened PR cannot have our comment yet, so we save the API call.
    // A status comment that exists anyway will not be reused in that case.
    let lookup = async {
        match event.action {
            PullRequestAction::Synchronize => find_status_comment(client, config, pr).await,
            PullRequestAction::Opened => Ok(None),
        }
    };
    let detection = async {
        let files = client
            .list_changed_files(pr)
            .await
            .with_context(|| format!("Cannot list changed files of PR {pr}"))?;
        tracing::trace!("Changed files: {files:?}");
        Ok::<_, anyhow::Error>(has_changeset_been_added(&files))
    };
    let (existing_comment, has_changeset) = futures::future::try_join(lookup, detection).await?;

    tracing::info!(
        "Changeset {} at {}",
        if has_changeset { "found" } else { "missing" },
        event.head.sha
    );

    let comment = if has_changeset {
        changeset_detected_comment(&event.head.sha)
    } else {
        changeset_missing_comment(&event.head.sha)
    };

    match existing_comment {
        Some(id) => {
            client
                .update_comment(id, comment)
                .await
                .with_context(|| format!("Cannot update status comment {id}"))?;
            tracing::info!("Updated status comment {id}");
            Ok(StatusCommentAction::Updated(id))
        }
        None => {
            let id = client
                .post_comment(pr, comment)
                .await
                .with_context(|| format!("Cannot post status comment to PR {pr}"))?;
            tracing::info!("Posted status comment {id}");
            Ok(StatusCommentAction::Created(id))
        }
    }
}

/// Finds the first comment on the PR thread that was posted by one of the known bot accounts.
async fn find_status_comment<Client: RepositoryClient + Sync>(
    client: &Client,
    config: &BotConfig,
    pr: PullRequestNumber,
) -> anyhow::Result<Option<CommentId>> {
    let comments = client
        .list_comments(pr)
        .await
        .with_context(|| format!("Cannot list comments of PR {pr}"))?;
    let id = comments
        .into_iter()
        .find(|comment| {
            comment
                .author
                .as_deref()
                .is_some_and(|login| config.is_bot_login(login))
        })
        .map(|comment| comment.id);
    tracing::debug!("Existing status comment: {id:?}");
    Ok(id)
}
