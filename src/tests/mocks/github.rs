use octocrab::Octocrab;
use serde::Serialize;
use wiremock::{
    matchers::{method, path, path_regex, query_param, query_param_is_missing},
    Mock, MockServer, Request, ResponseTemplate,
};

use crate::github::api::client::GithubRepositoryClient;
use crate::github::api::installation_repository_client;
use crate::github::{create_github_client, CommentId};
use crate::tests::io::load_test_file;
use crate::tests::mocks::app::{
    default_app_id, default_installation_id, setup_installation_token_mock,
};
use crate::tests::state::{default_repo_name, TEST_BOT_LOGIN};

/// ID of every comment created through the mocked API.
const CREATED_COMMENT_ID: u64 = 1001;

#[derive(Clone, Serialize)]
pub struct ChangedFileMock {
    sha: String,
    filename: String,
    status: String,
    additions: u64,
    deletions: u64,
    changes: u64,
}

impl ChangedFileMock {
    pub fn new(filename: &str, status: &str) -> Self {
        Self {
            sha: "bbcd538c8e72b8c175046e27cc8f907076331401".to_string(),
            filename: filename.to_string(),
            status: status.to_string(),
            additions: 1,
            deletions: 0,
            changes: 1,
        }
    }
}

#[derive(Serialize)]
struct UserMock {
    login: String,
    r#type: String,
}

#[derive(Serialize)]
struct CommentMock {
    id: u64,
    body: String,
    user: Option<UserMock>,
}

impl CommentMock {
    fn new(id: u64, author: Option<&str>) -> Self {
        Self {
            id,
            body: format!("Comment {id}"),
            user: author.map(|login| UserMock {
                login: login.to_string(),
                r#type: "Bot".to_string(),
            }),
        }
    }
}

/// Simulated GitHub API serving a single repository.
pub struct GitHubMockServer {
    mock_server: MockServer,
}

impl GitHubMockServer {
    pub async fn start() -> Self {
        let mock_server = MockServer::start().await;
        setup_installation_token_mock(&mock_server).await;

        let repo = default_repo_name();
        Mock::given(method("POST"))
            .and(path_regex(format!("^/repos/{repo}/issues/\\d+/comments$")))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(CommentMock::new(CREATED_COMMENT_ID, Some(TEST_BOT_LOGIN))),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("PATCH"))
            .and(path_regex(format!("^/repos/{repo}/issues/comments/\\d+$")))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(CommentMock::new(0, Some(TEST_BOT_LOGIN))),
            )
            .mount(&mock_server)
            .await;

        Self { mock_server }
    }

    /// Sets the files changed by the given pull request.
    pub async fn files(self, pr: u64, files: Vec<ChangedFileMock>) -> Self {
        Mock::given(method("GET"))
            .and(path(format!("/repos/{}/pulls/{pr}/files", default_repo_name())))
            .respond_with(ResponseTemplate::new(200).set_body_json(files))
            .mount(&self.mock_server)
            .await;
        self
    }

    /// Sets the comments (ID and author) of the given pull request.
    pub async fn comments(self, pr: u64, comments: Vec<(u64, Option<&str>)>) -> Self {
        let comments: Vec<CommentMock> = comments
            .into_iter()
            .map(|(id, author)| CommentMock::new(id, author))
            .collect();
        Mock::given(method("GET"))
            .and(path(format!(
                "/repos/{}/issues/{pr}/comments",
                default_repo_name()
            )))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments))
            .mount(&self.mock_server)
            .await;
        self
    }

    /// Serves the files changed by the given pull request on two pages.
    pub async fn paged_files(
        self,
        pr: u64,
        first: Vec<ChangedFileMock>,
        second: Vec<ChangedFileMock>,
    ) -> Self {
        let api_path = format!("/repos/{}/pulls/{pr}/files", default_repo_name());
        self.mount_pages(&api_path, first, second).await;
        self
    }

    /// Serves the comments of the given pull request on two pages.
    pub async fn paged_comments(
        self,
        pr: u64,
        first: Vec<(u64, Option<&str>)>,
        second: Vec<(u64, Option<&str>)>,
    ) -> Self {
        let to_mocks = |comments: Vec<(u64, Option<&str>)>| -> Vec<CommentMock> {
            comments
                .into_iter()
                .map(|(id, author)| CommentMock::new(id, author))
                .collect()
        };
        let api_path = format!("/repos/{}/issues/{pr}/comments", default_repo_name());
        self.mount_pages(&api_path, to_mocks(first), to_mocks(second))
            .await;
        self
    }

    /// The first page links to the second one through the `Link` header.
    async fn mount_pages<T: Serialize>(&self, api_path: &str, first: T, second: T) {
        let next = format!(
            "<{}{api_path}?per_page=100&page=2>; rel=\"next\"",
            self.mock_server.uri()
        );
        Mock::given(method("GET"))
            .and(path(api_path))
            .and(query_param_is_missing("page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", next.as_str())
                    .set_body_json(first),
            )
            .mount(&self.mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(api_path))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(second))
            .mount(&self.mock_server)
            .await;
    }

    /// Client authenticated as the GitHub App.
    pub fn client(&self) -> Octocrab {
        create_github_client(
            default_app_id().into(),
            self.mock_server.uri(),
            load_test_file("github-app-key.pem").into(),
        )
        .unwrap()
    }

    pub fn repository_client(&self) -> GithubRepositoryClient {
        installation_repository_client(&self.client(), default_installation_id(), default_repo_name())
    }

    pub fn created_comment_id(&self) -> CommentId {
        CommentId(CREATED_COMMENT_ID)
    }

    /// Pull request numbers and texts of all comments created so far.
    pub async fn posted_comments(&self) -> Vec<(u64, String)> {
        // /repos/{owner}/{name}/issues/{pr}/comments
        self.comment_requests(http::Method::POST, 5).await
    }

    /// Comment IDs and new texts of all comment updates so far.
    pub async fn updated_comments(&self) -> Vec<(u64, String)> {
        // /repos/{owner}/{name}/issues/comments/{id}
        self.comment_requests(http::Method::PATCH, 6).await
    }

    /// Returns the number of received GET requests for the given API path.
    pub async fn get_requests(&self, api_path: &str) -> usize {
        self.requests(http::Method::GET)
            .await
            .iter()
            .filter(|request| request.url.path() == api_path)
            .count()
    }

    async fn comment_requests(&self, method: http::Method, id_segment: usize) -> Vec<(u64, String)> {
        self.requests(method)
            .await
            .into_iter()
            .filter(|request| request.url.path().contains("/comments"))
            .map(|request| {
                let id = request
                    .url
                    .path()
                    .split('/')
                    .nth(id_segment)
                    .and_then(|segment| segment.parse::<u64>().ok())
                    .unwrap_or_else(|| panic!("Unexpected comment URL {}", request.url));
                let body: serde_json::Value = request.body_json().unwrap();
                (id, body["body"].as_str().unwrap().to_string())
            })
            .collect()
    }

    async fn requests(&self, method: http::Method) -> Vec<Request> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.method == method)
            .collect()
    }
}
