use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Article has no link")]
    Missing,
    #[error("Invalid link: {0}")]
    Invalid(#[from] url::ParseError),
    #[error("Refusing to open {0} link (only http/https)")]
    UnsupportedScheme(String),
}

/// Turn an article link into an absolute URL safe to pass to `open::that`.
///
/// Site-relative links (`/economy/story`) resolve against `site_url`.
pub fn resolve_link(link: &str, site_url: &str) -> Result<Url, LinkError> {
    let link = link.trim();
    if link.is_empty() {
        return Err(LinkError::Missing);
    }

    let url = match Url::parse(link) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(site_url)?.join(link)?,
        Err(e) => return Err(e.into()),
    };

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LinkError::UnsupportedScheme(other.to_string())),
    }
}
