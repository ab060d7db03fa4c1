use anyhow::Context;
use octocrab::models::{AppId, InstallationId};
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};

use crate::github::api::client::GithubRepositoryClient;
use crate::github::GithubRepoName;

pub mod client;

/// Creates a client authenticated as the GitHub App with the given ID.
pub fn create_github_client(
    app_id: AppId,
    github_url: String,
    private_key: SecretString,
) -> anyhow::Result<Octocrab> {
    let key = jsonwebtoken::EncodingKey::from_rsa_pem(private_key.expose_secret().as_bytes())
        .context("Could not encode private key")?;

    Octocrab::builder()
        .base_uri(github_url)
        .context("Invalid GitHub API URL")?
        .app(app_id, key)
        .build()
        .context("Could not create octocrab builder")
}

/// Creates a client for a single repository of the given app installation.
///
/// The installation client caches its access token and refreshes it once it expires.
pub fn installation_repository_client(
    app_client: &Octocrab,
    installation_id: u64,
    repository: GithubRepoName,
) -> GithubRepositoryClient {
    let client = app_client.installation(InstallationId(installation_id));
    GithubRepositoryClient::new(client, repository)
}
