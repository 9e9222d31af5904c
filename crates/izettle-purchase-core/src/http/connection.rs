use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

/// Pick the bearer token to send.
///
/// Precedence: explicit `access_token`, then the first non-empty line of
/// `token_file`, then no authentication.
pub(super) fn resolve_access_token(
    access_token: Option<&str>,
    token_file: Option<&Path>,
) -> Result<Option<String>, CoreError> {
    if let Some(token) = access_token {
        let token = token.trim();
        if token.is_empty() {
            return Err(CoreError::InvalidConfig(
                "access token must not be empty".to_owned(),
            ));
        }
        return Ok(Some(token.to_owned()));
    }

    let Some(token_file) = token_file else {
        return Ok(None);
    };

    let content = std::fs::read_to_string(token_file).map_err(|e| {
        CoreError::InvalidConfig(format!(
            "failed to read access token file {}: {e}",
            token_file.display()
        ))
    })?;
    let token = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| {
            CoreError::InvalidConfig(format!(
                "access token file {} is empty",
                token_file.display()
            ))
        })?;

    Ok(Some(token.to_owned()))
}

/// Validate a base URL and return it without a trailing slash, so endpoint
/// paths can be appended verbatim.
pub(crate) fn parse_base_url(base_url: &str) -> Result<String, CoreError> {
    let parsed = Url::parse(base_url).map_err(|e| {
        CoreError::InvalidConfig(format!(
            "invalid base URL `{base_url}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(base_url.trim_end_matches('/').to_owned()),
        other => Err(CoreError::InvalidConfig(format!(
            "unsupported base URL scheme `{other}`; expected http or https"
        ))),
    }
}
