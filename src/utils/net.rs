use log::debug;
use reqwest::Client;
use url::Url;

use crate::error::{FvError, FvResult};

/// Plain GET without retries; a non-2xx body becomes the error message.
pub async fn http_get(client: &Client, url: &Url) -> FvResult<Vec<u8>> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if status.is_success() {
        Ok(response.bytes().await?.to_vec())
    } else {
        let text = response.text().await.unwrap_or_default();
        debug!("[HTTP Status Error] {status} {}", redact_query(url));

        Err(FvError::Api {
            status: status.as_u16(),
            message: status_message(status.as_u16(), &text),
        })
    }
}

pub fn join_url(base_url: &str, extend_url: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;

    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(extend_url.split('/').filter(|s| !s.is_empty()));

    Ok(url)
}

fn status_message(status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("API error: {status}")
    } else {
        body.to_string()
    }
}

/// Drops the query string so API keys stay out of logs.
fn redact_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
