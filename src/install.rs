use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::UpdateError;
use crate::remote::RemoteArtifact;

/// Capability for persisting plugin source to disk. Injected so tests and
/// embedding hosts can substitute the write primitive.
pub trait PluginWriter {
    fn write_plugin(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Writes through `std::fs`, creating the plugins directory when absent.
/// The write is a plain overwrite: no rename, no backup, no rollback.
#[derive(Debug, Default)]
pub struct DiskWriter;

impl PluginWriter for DiskWriter {
    fn write_plugin(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
    }
}

/// Replaces `<plugins_dir>/<file_name>` with the artifact's content and
/// returns the written path.
pub fn install(
    writer: &dyn PluginWriter,
    plugins_dir: &Path,
    artifact: &RemoteArtifact,
) -> Result<PathBuf, UpdateError> {
    let target = plugins_dir.join(&artifact.file_name);
    writer
        .write_plugin(&target, &artifact.content)
        .map_err(|source| UpdateError::Write {
            path: target.clone(),
            source,
        })?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(file_name: &str, content: &str) -> RemoteArtifact {
        RemoteArtifact {
            source_url: format!("https://example.com/{file_name}"),
            file_name: file_name.to_string(),
            name: None,
            version: "1.0.0".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn written_file_matches_payload_byte_for_byte() {
        let dir = tempfile::tempdir().expect("tempdir");
        let payload = "// @version 1.0.0\nconst greeting = \"héllo wörld こんにちは ü\";\n";

        let path = install(&DiskWriter, dir.path(), &artifact("p.js", payload))
            .expect("install succeeds");

        assert_eq!(path, dir.path().join("p.js"));
        assert_eq!(fs::read(&path).expect("read back"), payload.as_bytes());
    }

    #[test]
    fn overwrites_the_previous_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("p.js");
        fs::write(&path, "old contents").expect("seed file");

        install(&DiskWriter, dir.path(), &artifact("p.js", "new contents"))
            .expect("install succeeds");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "new contents");
    }

    #[test]
    fn creates_the_plugins_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("plugins");

        install(&DiskWriter, &nested, &artifact("p.js", "x")).expect("install succeeds");

        assert!(nested.join("p.js").is_file());
    }

    #[test]
    fn write_failure_carries_the_target_path() {
        struct FailingWriter;

        impl PluginWriter for FailingWriter {
            fn write_plugin(&self, _path: &Path, _content: &str) -> io::Result<()> {
                Err(io::Error::other("disk full"))
            }
        }

        let result = install(&FailingWriter, Path::new("/plugins"), &artifact("p.js", "x"));
        match result {
            Err(UpdateError::Write { path, .. }) => {
                assert_eq!(path, Path::new("/plugins").join("p.js"));
            }
            other => panic!("expected write failure, got {other:?}"),
        }
    }
}
