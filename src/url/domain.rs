use url::Url;

/// Reduces user input to a bare host used for seed generation
///
/// Lower-cases the input and strips a leading `http://` / `https://` and
/// everything from the first `/` onwards. A port, if present, is kept.
///
/// # Examples
///
/// ```
/// use job_scout::url::normalize_domain;
///
/// assert_eq!(normalize_domain("  HTTPS://Acme.com/careers "), "acme.com");
/// assert_eq!(normalize_domain("acme.com"), "acme.com");
/// ```
pub fn normalize_domain(input: &str) -> String {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    let without_scheme = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);

    let host = match without_scheme.find('/') {
        Some(idx) => &without_scheme[..idx],
        None => without_scheme,
    };

    host.to_string()
}

/// Extracts the authority (host plus explicit port) of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use job_scout::url::extract_authority;
///
/// let url = Url::parse("https://Careers.Acme.com/jobs").unwrap();
/// assert_eq!(extract_authority(&url), Some("careers.acme.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/jobs").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
