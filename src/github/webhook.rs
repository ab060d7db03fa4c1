use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::bot::event::{PullRequestAction, PullRequestEvent};
use crate::github::server::ServerStateRef;
use crate::github::{Branch, CommitSha, GithubRepoName, PullRequestNumber};

/// GitHub caps webhook payloads at 25 MB.
const MAX_WEBHOOK_SIZE: usize = 25 * 1024 * 1024;

#[derive(serde::Deserialize, Debug)]
struct WebhookOwner {
    login: String,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookRepository {
    name: String,
    owner: WebhookOwner,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookInstallation {
    id: u64,
}

#[derive(serde::Deserialize, Debug)]
struct PullRequestHead {
    #[serde(rename = "ref")]
    ref_field: String,
    sha: String,
}

#[derive(serde::Deserialize, Debug)]
struct PullRequestInner {
    head: PullRequestHead,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookAction<'a> {
    action: &'a str,
}

#[derive(serde::Deserialize, Debug)]
struct WebhookPullRequest {
    number: u64,
    pull_request: PullRequestInner,
    repository: WebhookRepository,
    installation: Option<WebhookInstallation>,
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("x-github-event header not found")]
    MissingEventType,
    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
    #[error("Webhook for {0} was not sent by an app installation")]
    MissingInstallation(GithubRepoName),
}

/// A pull request event together with the app installation that delivered it.
#[derive(Debug)]
pub struct WebhookEvent {
    pub installation_id: u64,
    pub event: PullRequestEvent,
}

/// axum extractor for GitHub webhook events.
#[derive(Debug)]
pub struct GitHubWebhook(pub WebhookEvent);

/// Extracts a webhook event from a HTTP request.
///
/// Events that the bot does not care about are rejected with `200 OK`,
/// so that GitHub considers them delivered.
#[async_trait]
impl FromRequest<ServerStateRef> for GitHubWebhook {
    type Rejection = StatusCode;

    async fn from_request(
        request: Request,
        state: &ServerStateRef,
    ) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        // Eagerly load body
        let body: Bytes = axum::body::to_bytes(body, MAX_WEBHOOK_SIZE)
            .await
            .map_err(|error| {
                tracing::error!("Parsing webhook body failed: {error:?}");
                StatusCode::BAD_REQUEST
            })?;

        // Verify that the request is valid
        if !verify_gh_signature(&parts.headers, &body, state.get_webhook_secret()) {
            tracing::error!("Webhook request failed, could not authenticate webhook");
            return Err(StatusCode::BAD_REQUEST);
        }

        // Parse webhook content
        match parse_webhook_event(&parts.headers, &body) {
            Ok(Some(event)) => Ok(GitHubWebhook(event)),
            Ok(None) => Err(StatusCode::OK),
            Err(error) => {
                tracing::error!("Cannot parse webhook event: {error:?}");
                Err(StatusCode::BAD_REQUEST)
            }
        }
    }
}

fn parse_webhook_event(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
) -> Result<Option<WebhookEvent>, WebhookError> {
    let Some(event_type) = headers.get("x-github-event") else {
        return Err(WebhookError::MissingEventType);
    };

    match event_type.as_bytes() {
        b"pull_request" => {
            let WebhookAction { action } = serde_json::from_slice(body)?;
            let action = match action {
                "opened" => PullRequestAction::Opened,
                "synchronize" => PullRequestAction::Synchronize,
                _ => {
                    tracing::debug!("Ignoring pull request event with action {action}");
                    return Ok(None);
                }
            };

            let payload: WebhookPullRequest = serde_json::from_slice(body)?;
            parse_pull_request_event(action, payload).map(Some)
        }
        _ => {
            tracing::debug!("Ignoring unknown event type {:?}", event_type.to_str());
            Ok(None)
        }
    }
}

fn parse_pull_request_event(
    action: PullRequestAction,
    payload: WebhookPullRequest,
) -> Result<WebhookEvent, WebhookError> {
    let repository = GithubRepoName::new(&payload.repository.owner.login, &payload.repository.name);
    let Some(installation) = payload.installation else {
        return Err(WebhookError::MissingInstallation(repository));
    };

    Ok(WebhookEvent {
        installation_id: installation.id,
        event: PullRequestEvent {
            repository,
            action,
            pr_number: PullRequestNumber(payload.number),
            head: Branch {
                name: payload.pull_request.head.ref_field,
                sha: CommitSha(payload.pull_request.head.sha),
            },
        },
    })
}

type HmacSha256 = Hmac<Sha256>;

/// Verifies that the request is properly signed by GitHub with SHA-256 and the passed `secret`.
fn verify_gh_signature(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
    secret: &WebhookSecret,
) -> bool {
    let Some(signature) = headers.get("x-hub-signature-256").map(|v| v.as_bytes()) else {
        return false;
    };
    let Some(signature) = signature
        .strip_prefix(b"sha256=")
        .and_then(|v| hex::decode(v).ok())
    else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose().as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// Wrapper for a secret which is zeroed on drop and can be exposed only through the [`WebhookSecret::expose`] method.
pub struct WebhookSecret(SecretString);

impl WebhookSecret {
    pub fn new(secret: String) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret().as_str()
    }
}
