use crate::foundation::error::{QrylicError, QrylicResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_BYTES: usize = 8 * 1024 * 1024;

/// Retrieves logo bytes for the overlay stage.
///
/// Implementations make a single attempt per call; retry policy belongs to
/// the caller. Errors surface as stage-local diagnostics, never as pipeline
/// aborts.
pub trait LogoFetcher: Send + Sync {
    /// Fetch the bytes behind `source`.
    fn fetch(&self, source: &str) -> QrylicResult<Vec<u8>>;
}

/// Default fetcher: `http(s)` URLs over a blocking client with a request
/// timeout, anything else as a normalized relative path under the assets
/// root. Both transports enforce a response byte cap.
pub struct HttpLogoFetcher {
    http: reqwest::blocking::Client,
    assets_root: PathBuf,
    max_bytes: usize,
}

impl HttpLogoFetcher {
    /// Build a fetcher rooted at `assets_root` with the default timeout.
    pub fn new(assets_root: impl Into<PathBuf>) -> QrylicResult<Self> {
        Self::with_timeout(assets_root, DEFAULT_FETCH_TIMEOUT)
    }

    /// Build a fetcher with an explicit request timeout.
    pub fn with_timeout(assets_root: impl Into<PathBuf>, timeout: Duration) -> QrylicResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QrylicError::fetch(format!("build http client: {e}")))?;
        Ok(Self {
            http,
            assets_root: assets_root.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        })
    }

    /// Replace the response byte cap.
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    fn fetch_url(&self, url: &str) -> QrylicResult<Vec<u8>> {
        tracing::debug!(url, "fetching logo");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| QrylicError::fetch(format!("requesting {url}: {e}")))?
            .error_for_status()
            .map_err(|e| QrylicError::fetch(format!("logo request failed: {e}")))?;

        if let Some(len) = response.content_length()
            && len > self.max_bytes as u64
        {
            return Err(QrylicError::fetch(format!(
                "logo response of {len} bytes exceeds cap of {}",
                self.max_bytes
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| QrylicError::fetch(format!("reading logo body: {e}")))?;
        if bytes.len() > self.max_bytes {
            return Err(QrylicError::fetch(format!(
                "logo response of {} bytes exceeds cap of {}",
                bytes.len(),
                self.max_bytes
            )));
        }
        tracing::debug!(bytes = bytes.len(), "fetched logo");
        Ok(bytes.to_vec())
    }

    fn read_local(&self, source: &str) -> QrylicResult<Vec<u8>> {
        let norm = normalize_rel_path(source)?;
        let path = self.assets_root.join(Path::new(&norm));
        let bytes = std::fs::read(&path)
            .map_err(|e| QrylicError::fetch(format!("read logo '{}': {e}", path.display())))?;
        if bytes.len() > self.max_bytes {
            return Err(QrylicError::fetch(format!(
                "logo file of {} bytes exceeds cap of {}",
                bytes.len(),
                self.max_bytes
            )));
        }
        Ok(bytes)
    }
}

impl LogoFetcher for HttpLogoFetcher {
    fn fetch(&self, source: &str) -> QrylicResult<Vec<u8>> {
        if is_http_url(source) {
            self.fetch_url(source)
        } else {
            self.read_local(source)
        }
    }
}

/// In-memory fetcher for tests and embedding callers.
#[derive(Debug, Default)]
pub struct InMemoryLogoFetcher {
    entries: HashMap<String, Vec<u8>>,
}

impl InMemoryLogoFetcher {
    /// Create an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for a source reference.
    pub fn insert(&mut self, source: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(source.into(), bytes);
    }
}

impl LogoFetcher for InMemoryLogoFetcher {
    fn fetch(&self, source: &str) -> QrylicResult<Vec<u8>> {
        self.entries
            .get(source)
            .cloned()
            .ok_or_else(|| QrylicError::fetch(format!("unknown logo source '{source}'")))
    }
}

pub(crate) fn is_http_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Normalize a caller-supplied relative path for joining under a root.
///
/// Rejects absolute paths, parent traversal, and empty inputs; collapses `.`
/// segments and separator runs; uses `/` regardless of platform input.
pub(crate) fn normalize_rel_path(source: &str) -> QrylicResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(QrylicError::fetch("source paths must be relative"));
    }
    if s.is_empty() {
        return Err(QrylicError::fetch("source path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(QrylicError::fetch("source paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(QrylicError::fetch("source path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
