//! External content fragment fetching
//!
//! A post may point at an externally hosted HTML file instead of carrying
//! its body inline. The fragment is fetched at render time and only the
//! `<body>` region's contents are kept; a fragment without a body wrapper
//! falls back to the raw fetched text. Failures surface to the viewer as
//! an inline message - there are no retries.

use anyhow::{bail, Context, Result};
use scraper::{Html, Selector};
use std::time::Duration;

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// Fetch an external HTML fragment and extract its body contents
pub async fn fetch_fragment(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent("Mozilla/5.0 (compatible; Midad/1.0)")
        .build()
        .context("Failed to build HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch content fragment from {}", url))?;

    if !response.status().is_success() {
        bail!(
            "Content fragment at {} returned status {}",
            url,
            response.status()
        );
    }

    let html = response
        .text()
        .await
        .context("Failed to read content fragment body")?;
    tracing::debug!(url, bytes = html.len(), "fetched content fragment");

    Ok(extract_body(&html))
}

/// Extract the `<body>` contents from an HTML document
///
/// The parser synthesizes a body element around bare fragments, so text
/// without a wrapper comes back unchanged; a full document is stripped to
/// its body region (head, doctype, and the rest are discarded).
fn extract_body(html: &str) -> String {
    let document = Html::parse_document(html);
    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            let inner = body.inner_html();
            let inner = inner.trim();
            if !inner.is_empty() {
                return inner.to_string();
            }
        }
    }
    html.trim().to_string()
}
