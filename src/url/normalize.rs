use url::Url;

/// Normalizes a URL into the key used for crawl deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Remove fragment (everything after #)
/// 3. Remove the whole query string
/// 4. Remove trailing slashes from the serialized form
///
/// Returns `None` for anything that cannot be normalized; callers treat that
/// as "ignore this URL". The output is a fixed point: normalizing it again
/// returns it unchanged.
///
/// # Examples
///
/// ```
/// use job_scout::url::normalize_url;
///
/// let url = normalize_url("https://Acme.com/careers/?utm_source=x#top").unwrap();
/// assert_eq!(url, "https://acme.com/careers");
/// ```
pub fn normalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    if url.host_str().is_none() {
        return None;
    }

    url.set_fragment(None);
    url.set_query(None);

    // Trimming every trailing slash (not just one) keeps the result idempotent
    // for paths such as "/a//".
    let serialized = url.as_str().trim_end_matches('/');
    Some(serialized.to_string())
}
