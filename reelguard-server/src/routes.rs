//! Route parsing
//!
//! Two shapes matter: `GET /movie/{id}` and `GET /show/{id}` resolve a
//! single title; every other path (including `/`) is forwarded verbatim to
//! the upstream catalog and filtered as a listing.

use std::fmt;

/// Media kind of a single-item request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Show,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Show => "show",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed request route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Single-item request: forwarded only if the title passes the filter.
    Media { media_type: MediaType, id: String },
    /// Single-item path with no id segment.
    MediaMissingId { media_type: MediaType },
    /// Everything else: forwarded to the upstream base, response filtered
    /// as a catalog listing. Carries the full path+query verbatim.
    Catalog { path_and_query: String },
}

/// Parse a request URL (path plus optional query) into a route.
pub fn parse(url: &str) -> Route {
    let path = url.split('?').next().unwrap_or("");
    let mut segments = path.trim_start_matches('/').split('/');

    let media_type = match segments.next() {
        Some("movie") => Some(MediaType::Movie),
        Some("show") => Some(MediaType::Show),
        _ => None,
    };

    if let Some(media_type) = media_type {
        let id = segments.next().unwrap_or("");
        // Deeper paths under /movie or /show are not single-item requests.
        if segments.next().is_none() {
            if id.is_empty() {
                return Route::MediaMissingId { media_type };
            }
            return Route::Media {
                media_type,
                id: id.to_owned(),
            };
        }
    }

    Route::Catalog {
        path_and_query: url.to_owned(),
    }
}
