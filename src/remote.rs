use std::sync::LazyLock;

use regex::Regex;

use crate::error::UpdateError;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@name[ \t]+([^\r\n]+)").expect("valid name marker regex"));
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@version[ \t]+([^\r\n]+)").expect("valid version marker regex"));

/// Metadata markers extracted from a plugin source header. Absent markers
/// stay `None`; the caller decides which ones are fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginMeta {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl PluginMeta {
    /// Line-level scan for `@name <value>` and `@version <value>`. First
    /// match wins, values are trimmed.
    pub fn parse(text: &str) -> Self {
        Self {
            name: capture(&NAME_RE, text),
            version: capture(&VERSION_RE, text),
        }
    }
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

/// The downloaded plugin source plus the metadata extracted from it.
/// Rebuilt on every fetch; the orchestrator keeps at most one.
#[derive(Debug, Clone)]
pub struct RemoteArtifact {
    pub source_url: String,
    pub file_name: String,
    pub name: Option<String>,
    pub version: String,
    pub content: String,
}

impl RemoteArtifact {
    /// Parsed `@name` when present, else the file the URL points at.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.file_name)
    }
}

/// Capability for retrieving the remote source as text. Injected so tests
/// and embedding hosts can substitute the network.
pub trait Transport {
    fn fetch_text(&self, url: &str) -> Result<String, UpdateError>;
}

/// Blocking HTTP transport. One attempt per call, no retry, no caching;
/// non-2xx statuses are failures.
#[derive(Debug, Default)]
pub struct HttpTransport;

impl Transport for HttpTransport {
    fn fetch_text(&self, url: &str) -> Result<String, UpdateError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|err| fetch_error(url, &err))?;
        let response = client
            .get(url)
            .send()
            .map_err(|err| fetch_error(url, &err))?
            .error_for_status()
            .map_err(|err| fetch_error(url, &err))?;
        response.text().map_err(|err| fetch_error(url, &err))
    }
}

fn fetch_error(url: &str, err: &dyn std::fmt::Display) -> UpdateError {
    UpdateError::Fetch {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

/// Downloads the plugin source and extracts its metadata. A missing
/// `@version` marker is fatal to the check; a missing `@name` is not.
pub fn fetch(transport: &dyn Transport, url: &str) -> Result<RemoteArtifact, UpdateError> {
    if url.trim().is_empty() {
        return Err(UpdateError::MissingSource);
    }

    let file_name = file_name_from_url(url).ok_or_else(|| UpdateError::Fetch {
        url: url.to_string(),
        reason: "url names no file".to_string(),
    })?;

    let content = transport.fetch_text(url)?;
    let meta = PluginMeta::parse(&content);
    let version = meta.version.ok_or(UpdateError::MissingVersionMarker)?;

    Ok(RemoteArtifact {
        source_url: url.to_string(),
        file_name,
        name: meta.name,
        version,
        content,
    })
}

/// Last path segment of the source URL, query string and fragment stripped.
/// This is a naming convention, not a server-provided identifier.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let last_segment = url.split('/').next_back()?;
    let clean = last_segment.split('?').next()?.split('#').next()?.trim();
    if clean.is_empty() {
        None
    } else {
        Some(clean.to_string())
    }
}
