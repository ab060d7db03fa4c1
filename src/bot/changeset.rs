use std::sync::LazyLock;

use regex::Regex;

/// Changeset files live in the `.changeset` directory and have a markdown extension.
static CHANGESET_FILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.changeset/.+\.md$").unwrap());

/// The README generated by `changeset init`, which is not a changeset.
const CHANGESET_README: &str = ".changeset/README.md";

/// Status of a file in the diff of a pull request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
    #[serde(other)]
    Other,
}

/// A single file changed by a pull request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    pub status: FileStatus,
}

impl ChangedFile {
    pub fn new(filename: &str, status: FileStatus) -> Self {
        Self {
            filename: filename.to_string(),
            status,
        }
    }

    fn is_added_changeset(&self) -> bool {
        self.status == FileStatus::Added
            && CHANGESET_FILE.is_match(&self.filename)
            && self.filename != CHANGESET_README
    }
}

/// Returns true if the pull request adds at least one changeset file.
///
/// Only newly added files count. Modified or removed changesets belong to some
/// earlier change, and removals never cancel out an addition.
pub fn has_changeset_been_added(files: &[ChangedFile]) -> bool {
    files.iter().any(ChangedFile::is_added_changeset)
}
