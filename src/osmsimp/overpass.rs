use crate::osmsimp::{config::OverpassConfig, error::Error};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

pub const DEFAULT_URL: &str = "http://overpass-api.de/api/interpreter";

static OUTPUT_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[\s*out\s*:\s*([a-z]+)").unwrap());

/// Makes sure the query asks Overpass for JSON.
pub fn prepare_query(query: &str) -> Result<String, Error> {
    let query = query.trim();
    if query.is_empty() {
        return Err(Error::EmptyQuery);
    }
    match OUTPUT_FORMAT.captures(query) {
        Some(caps) => {
            let format = caps[1].to_lowercase();
            if format == "json" {
                Ok(query.to_string())
            } else {
                Err(Error::UnsupportedOutputFormat(format))
            }
        }
        None => Ok(format!("[out:json];{}", query)),
    }
}

fn client(config: &OverpassConfig) -> Result<reqwest::Client, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("osmsimp/", env!("CARGO_PKG_VERSION"))),
    );
    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

pub fn fetch(config: &OverpassConfig, query: &str) -> Result<Value, Error> {
    let query = prepare_query(query)?;
    log::info!("POST {}", config.url);
    log::debug!("Overpass query: {}", query);

    let mut resp = client(config)?
        .post(&config.url)
        .form(&[("data", query.as_str())])
        .send()?;

    let status = resp.status();
    if !status.is_success() {
        eprintln!("Error: {}", status);
        eprintln!("{}", resp.text().unwrap_or_default());
        return Err(Error::OverpassStatus(status.as_u16()));
    }

    let body = resp.text()?;
    log::debug!("Received {} bytes from Overpass", body.len());
    Ok(serde_json::from_str(&body)?)
}
