//! HTTP fetch collaborator.

use std::time::Duration;

use crate::{Error, Result};

/// Build the blocking HTTP client used for all source fetches.
pub fn build_client() -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    Ok(client)
}

/// Fetch one rule list as a complete text blob.
///
/// A non-2xx response is a fetch error carrying the URL and status; the
/// transformation never sees a partial body.
pub fn fetch_text(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    Ok(response.text()?)
}
