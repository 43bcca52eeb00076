use url::Url;

/// Host and account handle taken from a profile URL such as
/// `https://mastodon.social/@alice`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRef {
    /// Network authority, including a non-default port.
    pub host: String,
    /// Final path segment, verbatim (usually `@name`). May be empty; the
    /// server's lookup decides whether such an account exists.
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileUrlError {
    #[error("profile url is not a valid url: {0}")]
    Malformed(String),
    #[error("profile url has no host")]
    MissingHost,
}

pub fn parse_profile_url(profile_url: &str) -> Result<ProfileRef, ProfileUrlError> {
    let parsed = Url::parse(profile_url.trim())
        .map_err(|err| ProfileUrlError::Malformed(err.to_string()))?;
    let host = parsed.host_str().ok_or(ProfileUrlError::MissingHost)?;
    let host = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let username = parsed
        .path()
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(ProfileRef { host, username })
}
