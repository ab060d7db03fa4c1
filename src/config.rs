/// Logins of the GitHub Apps whose comments are treated as status comments of this bot.
/// The first one is the production app, the second one is the app used for testing.
pub const KNOWN_BOT_LOGINS: &[&str] = &["changeset-bot[bot]", "changesets-test-bot[bot]"];

/// Pull requests from branches starting with this prefix are ignored.
/// Release PRs are generated by automation and never need a changeset.
pub const RELEASE_BRANCH_PREFIX: &str = "release";

/// Process-wide configuration of the bot. It is created once on startup and
/// never modified afterwards.
#[derive(Clone, Debug)]
pub struct BotConfig {
    bot_logins: Vec<String>,
}

impl BotConfig {
    pub fn new<I, S>(bot_logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            bot_logins: bot_logins.into_iter().map(Into::into).collect(),
        }
    }

    /// Was a comment written by the given user posted by this bot?
    pub fn is_bot_login(&self, login: &str) -> bool {
        self.bot_logins.iter().any(|bot| bot == login)
    }

    /// Is the given head branch exempt from changeset checking?
    pub fn is_release_branch(&self, branch: &str) -> bool {
        branch.starts_with(RELEASE_BRANCH_PREFIX)
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::new(KNOWN_BOT_LOGINS.iter().copied())
    }
}
