mod github;

pub use github::{ChangedFileMock, GitHubMockServer};
