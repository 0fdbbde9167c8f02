use std::io;
use std::path::PathBuf;

/// Failure taxonomy for the check/install cycle.
///
/// `Updater::is_update_available` and `Updater::install_update` catch every
/// variant at their boundary and convert it to a logged `false`; nothing here
/// reaches the embedding host as a panic.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("no update path defined")]
    MissingSource,
    #[error("current version of plugin unknown")]
    MissingCurrentVersion,
    #[error("fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("payload has no @version marker")]
    MissingVersionMarker,
    #[error("malformed version {value:?}: {source}")]
    BadVersion {
        value: String,
        #[source]
        source: semver::Error,
    },
    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("no update staged, check for updates first")]
    NothingStaged,
}
