//! This is the library of the changeset bot.
//!
//! The bot watches pull requests and keeps a single comment on each of them,
//! telling whether the pull request adds a changeset.
pub mod bot;
pub mod config;
pub mod github;
pub mod utils;

#[cfg(test)]
mod tests;
