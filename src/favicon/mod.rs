//! Favicon responder
//!
//! Serves a single icon at `/favicon.ico`. The response body and its
//! validator are prepared once and reused for every later request:
//!
//! - Buffer sources are prepared at construction time
//! - File sources are read on the first `GET`/`HEAD`; a failed read is
//!   reported for that request only and retried by the next one
//! - Once prepared, the icon is never re-read, even if the file changes

mod error;
mod max_age;
mod source;

pub use error::FaviconError;
pub use max_age::{normalize as normalize_max_age, parse_duration, MaxAge, ONE_YEAR_SECS};
pub use source::{FsReader, IconReader, IconSource};

use std::path::{Path, PathBuf};

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{CACHE_CONTROL, IF_NONE_MATCH};
use hyper::{HeaderMap, Method, Request, Response};
use tokio::sync::OnceCell;

use crate::http::{self, cache};
use crate::logger;

/// Path the icon is served from
pub const FAVICON_PATH: &str = "/favicon.ico";

/// Construction options
#[derive(Debug, Clone, Default)]
pub struct FaviconOptions {
    /// Cache lifetime; `None` means one year
    pub max_age: Option<MaxAge>,
}

/// Prepared icon response payload
#[derive(Debug)]
pub struct CachedIcon {
    pub body: Bytes,
    pub etag: String,
    pub cache_control: String,
}

impl CachedIcon {
    fn new(body: Bytes, max_age: u64) -> Self {
        Self {
            etag: cache::generate_etag(&body),
            cache_control: cache::public_max_age(max_age),
            body,
        }
    }
}

/// Request handler serving one icon
#[derive(Debug)]
pub struct Favicon<R = FsReader> {
    path: Option<PathBuf>,
    max_age: u64,
    icon: OnceCell<CachedIcon>,
    reader: R,
}

impl Favicon<FsReader> {
    /// Create a responder reading file sources from disk
    pub fn new(source: IconSource, options: &FaviconOptions) -> Result<Self, FaviconError> {
        Self::with_reader(source, options, FsReader)
    }
}

impl<R: IconReader> Favicon<R> {
    /// Create a responder with a custom byte source
    ///
    /// File paths are checked for existence here, but not read.
    pub fn with_reader(
        source: IconSource,
        options: &FaviconOptions,
        reader: R,
    ) -> Result<Self, FaviconError> {
        let max_age = max_age::normalize(options.max_age.as_ref())?;

        let (path, icon) = match source {
            IconSource::Path(path) => (Some(source::resolve_file(&path)?), OnceCell::new()),
            IconSource::Buffer(data) => {
                // Detach from whatever allocation the caller handed us
                let body = Bytes::copy_from_slice(&data);
                (None, OnceCell::new_with(Some(CachedIcon::new(body, max_age))))
            }
        };

        Ok(Self {
            path,
            max_age,
            icon,
            reader,
        })
    }

    /// Effective `max-age` in seconds
    pub const fn max_age(&self) -> u64 {
        self.max_age
    }

    /// Resolved icon file, if the icon is file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The prepared icon, if it has been loaded
    pub fn cached(&self) -> Option<&CachedIcon> {
        self.icon.get()
    }

    /// Handle a request
    ///
    /// Returns `Ok(None)` when the request is not for the icon, so the
    /// caller can dispatch it elsewhere.
    pub async fn handle<B>(
        &self,
        req: &Request<B>,
    ) -> Result<Option<Response<Full<Bytes>>>, FaviconError> {
        let path = req.uri().path();

        // Also covers targets without a path ("*", authority-form)
        if path != FAVICON_PATH {
            return Ok(None);
        }

        let method = req.method();
        match *method {
            Method::GET | Method::HEAD => {}
            Method::OPTIONS => return Ok(Some(http::build_options_response())),
            _ => {
                logger::log_warning(&format!("Method not allowed on {FAVICON_PATH}: {method}"));
                return Ok(Some(http::build_405_response()));
            }
        }

        let icon = self.icon().await?;

        let headers = req.headers();
        let no_cache = headers
            .get_all(CACHE_CONTROL)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(cache::has_no_cache);
        let if_none_match = if_none_match(headers);
        if !no_cache && cache::check_etag_match(if_none_match.as_deref(), &icon.etag) {
            return Ok(Some(http::build_304_response(
                &icon.etag,
                &icon.cache_control,
            )));
        }

        Ok(Some(http::build_icon_response(
            &icon.body,
            &icon.etag,
            &icon.cache_control,
            *method == Method::HEAD,
        )))
    }

    /// Get the prepared icon, reading the file if needed
    async fn icon(&self) -> Result<&CachedIcon, FaviconError> {
        self.icon.get_or_try_init(|| self.load()).await
    }

    async fn load(&self) -> Result<CachedIcon, FaviconError> {
        let Some(path) = self.path.as_deref() else {
            return Err(FaviconError::config("icon has neither a path nor a buffer"));
        };

        match self.reader.read(path).await {
            Ok(data) => {
                logger::log_icon_loaded(path, data.len());
                Ok(CachedIcon::new(Bytes::from(data), self.max_age))
            }
            Err(source) => {
                logger::log_icon_read_failed(path, &source);
                Err(FaviconError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }
}

/// Join every `If-None-Match` field into one list
fn if_none_match(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(IF_NONE_MATCH)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}
