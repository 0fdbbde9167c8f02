use std::cmp::Ordering;

use semver::Version;

use crate::error::UpdateError;

/// True when `remote` sorts strictly after `current` under semver precedence:
/// numeric components compared numerically, pre-release tags below the same
/// numeric release, build metadata ignored.
pub fn is_newer(remote: &str, current: &str) -> Result<bool, UpdateError> {
    let remote = parse(remote)?;
    let current = parse(current)?;
    Ok(remote.cmp_precedence(&current) == Ordering::Greater)
}

/// A leading `v`/`V` is tolerated; anything else non-semver is an error.
fn parse(value: &str) -> Result<Version, UpdateError> {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
    Version::parse(trimmed).map_err(|source| UpdateError::BadVersion {
        value: value.to_string(),
        source,
    })
}
