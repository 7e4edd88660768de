use std::fmt;
use std::path::PathBuf;
use url::Url;

use super::fetcher::FetchError;

/// Where the feed document comes from.
///
/// Remote sources are re-fetched with a cache-busting query parameter on
/// every load. Local files (as written by the mail sync job) are read as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Http(Url),
    File(PathBuf),
}

impl FeedSource {
    /// Interpret a user-supplied location.
    ///
    /// `http://` and `https://` become [`FeedSource::Http`], `file://` URLs and
    /// bare paths become [`FeedSource::File`]. Other schemes are rejected.
    pub fn parse(location: &str) -> Result<Self, FetchError> {
        let trimmed = location.trim();
        if trimmed.is_empty() {
            return Err(FetchError::InvalidSource("feed location is empty".into()));
        }

        match Url::parse(trimmed) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(Self::Http(url)),
                "file" => url
                    .to_file_path()
                    .map(Self::File)
                    .map_err(|_| FetchError::InvalidSource(format!("bad file URL: {}", trimmed))),
                // A Windows drive letter parses as a one-letter scheme.
                scheme if scheme.len() == 1 => Ok(Self::File(PathBuf::from(trimmed))),
                scheme => Err(FetchError::InvalidSource(format!(
                    "unsupported scheme '{}'",
                    scheme
                ))),
            },
            Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Self::File(PathBuf::from(trimmed))),
            Err(e) => Err(FetchError::InvalidSource(format!("{}: {}", trimmed, e))),
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Append the `v=<token>` cache-busting parameter, keeping any existing query.
pub fn cache_busted_url(base: &Url, token: i64) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut().append_pair("v", &token.to_string());
    url
}
