use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;

use changeset_bot::config::BotConfig;
use changeset_bot::github::server::{create_app, ServerState};
use changeset_bot::github::{create_github_client, WebhookSecret};
use changeset_bot::utils::logging::init_logging;

#[derive(clap::Parser)]
struct Opts {
    /// Secret used to authenticate webhooks.
    #[arg(long, env = "WEBHOOK_SECRET")]
    webhook_secret: String,

    /// Github App ID.
    #[arg(long, env = "APP_ID")]
    app_id: u64,

    /// Private key used to authenticate as a Github App.
    #[arg(long, env = "PRIVATE_KEY")]
    private_key: String,

    /// Port on which the webhook server listens.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Base URL of the GitHub API, can point to a GitHub Enterprise instance.
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: String,
}

async fn server(state: ServerState, port: u16) -> anyhow::Result<()> {
    let app = create_app(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind to {addr}"))?;
    tracing::info!("Listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    runtime.block_on(async move {
        let github_client = create_github_client(
            opts.app_id.into(),
            opts.github_api_url,
            opts.private_key.into(),
        )?;
        let state = ServerState::new(
            WebhookSecret::new(opts.webhook_secret),
            github_client,
            BotConfig::default(),
        );

        let res = server(state, opts.port).await;
        tracing::warn!("Server has ended: {res:?}");
        res
    })
}

fn main() {
    init_logging();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
