use std::any::Any;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use octocrab::Octocrab;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::bot::handle_pull_request_event;
use crate::config::BotConfig;
use crate::github::api::client::GithubRepositoryClient;
use crate::github::api::installation_repository_client;
use crate::github::webhook::{GitHubWebhook, WebhookEvent, WebhookSecret};
use crate::github::{AppError, GithubRepoName};

/// Shared server state for all axum handlers.
/// It is never modified after startup, every webhook is handled independently.
pub struct ServerState {
    webhook_secret: WebhookSecret,
    github_client: Octocrab,
    config: BotConfig,
}

impl ServerState {
    pub fn new(webhook_secret: WebhookSecret, github_client: Octocrab, config: BotConfig) -> Self {
        Self {
            webhook_secret,
            github_client,
            config,
        }
    }

    pub fn get_webhook_secret(&self) -> &WebhookSecret {
        &self.webhook_secret
    }

    fn repository_client(
        &self,
        installation_id: u64,
        repository: GithubRepoName,
    ) -> GithubRepositoryClient {
        installation_repository_client(&self.github_client, installation_id, repository)
    }
}

pub type ServerStateRef = Arc<ServerState>;

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/github", post(github_webhook_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(Arc::new(state))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Router panicked: {err:?}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

/// Axum handler that receives a webhook and updates the status comment of the pull request.
///
/// A failure is reported back to GitHub, which marks the delivery as failed so that it
/// can be redelivered.
pub async fn github_webhook_handler(
    State(state): State<ServerStateRef>,
    GitHubWebhook(webhook): GitHubWebhook,
) -> Result<StatusCode, AppError> {
    let WebhookEvent {
        installation_id,
        event,
    } = webhook;
    let client = state.repository_client(installation_id, event.repository.clone());
    handle_pull_request_event(event, &client, &state.config).await?;
    Ok(StatusCode::OK)
}
