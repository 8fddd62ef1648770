// src/utils/url.rs

//! URL manipulation utilities.

use url::Url;

use crate::error::Result;

/// Join path segments into a single resource path.
///
/// Empty segments and surrounding slashes are dropped; segment contents are
/// otherwise kept verbatim.
///
/// # Examples
/// ```
/// use greyhound_predictor::utils::url::join_segments;
///
/// assert_eq!(join_segments(["race", "123"]), "race/123");
/// assert_eq!(join_segments(["/races/", "today"]), "races/today");
/// ```
pub fn join_segments<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().trim_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a relative resource path against an origin ending in `/`.
///
/// Unlike [`Url::join`], the path is appended as-is rather than resolved as a
/// relative reference, so a leading `/` cannot escape the origin's path prefix.
pub fn resource_url(origin: &Url, path: &str) -> Result<Url> {
    let base = origin.as_str();
    let separator = if base.ends_with('/') { "" } else { "/" };
    let url = Url::parse(&format!(
        "{base}{separator}{}",
        path.trim_start_matches('/')
    ))?;
    Ok(url)
}

/// Build an absolute public page URL from an origin and path segments.
///
/// With no segments this is the origin itself, without a trailing slash.
pub fn page_url(origin: &Url, segments: &[&str]) -> String {
    let home = origin.as_str().trim_end_matches('/').to_string();
    if segments.is_empty() {
        return home;
    }

    let mut url = origin.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty();
        for segment in segments {
            path.push(segment);
        }
    }
    url.to_string()
}
