use std::path::{Path, PathBuf};

use crate::foundation::error::{PaleoError, PaleoResult};

/// Raw payload returned by an [`ImageFetcher`].
#[derive(Clone, Debug)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// The source opted in to anonymous cross-origin pixel access.
    pub cross_origin_readable: bool,
}

/// Retrieves encoded silhouette images.
///
/// Requests are always credential-less; implementations decide readability from
/// whatever opt-in signal their transport offers.
pub trait ImageFetcher {
    fn fetch(&mut self, url: &str) -> PaleoResult<FetchedImage>;
}

/// Append a `cb=<token>` query parameter so a reload never reuses a cached response.
pub fn cache_busted_url(url: &str, token: u64) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}cb={token}")
}

/// Milliseconds since the Unix epoch, used as the default cache-bust token.
pub fn cache_bust_token() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Reads images from the local filesystem.
///
/// Accepts plain paths and `file://` URLs. Query strings and fragments are ignored, so
/// cache-busted URLs resolve to the same file. Relative paths resolve against `root`.
#[derive(Clone, Debug)]
pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resolve(&self, url: &str) -> PathBuf {
        let without_scheme = url.strip_prefix("file://").unwrap_or(url);
        let end = without_scheme
            .find(['?', '#'])
            .unwrap_or(without_scheme.len());
        let path = Path::new(&without_scheme[..end]);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ImageFetcher for FileFetcher {
    fn fetch(&mut self, url: &str) -> PaleoResult<FetchedImage> {
        let path = self.resolve(url);
        let bytes = std::fs::read(&path)
            .map_err(|e| PaleoError::fetch(format!("read '{}': {e}", path.display())))?;
        Ok(FetchedImage {
            bytes,
            cross_origin_readable: true,
        })
    }
}

/// Fetches images over HTTP(S) without credentials.
///
/// An `Origin` header is sent with every request; the response is readable only when
/// `Access-Control-Allow-Origin` is `*` or echoes that origin.
#[cfg(feature = "http")]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    origin: String,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new(origin: impl Into<String>) -> PaleoResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("paleo-canvas/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PaleoError::fetch(format!("build http client: {e}")))?;
        Ok(Self {
            client,
            origin: origin.into(),
        })
    }
}

#[cfg(feature = "http")]
impl ImageFetcher for HttpFetcher {
    fn fetch(&mut self, url: &str) -> PaleoResult<FetchedImage> {
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::ORIGIN, self.origin.as_str())
            .send()
            .map_err(|e| PaleoError::fetch(format!("GET {url}: {e}")))?;

        if !resp.status().is_success() {
            return Err(PaleoError::fetch(format!(
                "GET {url}: HTTP {}",
                resp.status()
            )));
        }

        let cross_origin_readable = resp
            .headers()
            .get(reqwest::header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "*" || v == self.origin);

        let bytes = resp
            .bytes()
            .map_err(|e| PaleoError::fetch(format!("GET {url}: read body: {e}")))?;

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            cross_origin_readable,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fetch.rs"]
mod tests;
