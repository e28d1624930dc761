//! Directory Fetcher.
//!
//! Downloads the autoindex page at the base URL and turns the anchors inside
//! its `<pre>` block into [`Folder`]s. IIS, Apache and Nginx listings all put
//! their entries there.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ServiceResult, StatusError};
use crate::models::Folder;
use crate::traits::HttpClient;

static PRE_BLOCK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>").expect("Invalid pre block regex"));

static ANCHOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("Invalid anchor regex"));

static HREF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("Invalid href regex")
});

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

/// Link texts servers use for the parent directory entry.
const PARENT_LINK_TEXTS: &[&str] = &["[To Parent Directory]", "Parent Directory", "../", ".."];

/// Fetch the listing and return its folders, or an empty list on any failure.
///
/// Failures are logged rather than returned so a broken listing degrades to
/// an empty report instead of an error response.
pub async fn fetch_folders(client: &dyn HttpClient, base_url: &str) -> Vec<Folder> {
    match try_fetch_folders(client, base_url).await {
        Ok(folders) => {
            tracing::debug!("Listing at {} has {} folders", base_url, folders.len());
            folders
        }
        Err(e) => {
            tracing::error!("Error fetching folders ({}): {}", e.error_code(), e);
            Vec::new()
        }
    }
}

/// Fetch the listing and return its folders, surfacing failures.
pub async fn try_fetch_folders(client: &dyn HttpClient, base_url: &str) -> ServiceResult<Vec<Folder>> {
    let response = client
        .get(base_url)
        .await
        .map_err(|source| StatusError::Listing {
            url: base_url.to_string(),
            source,
        })?;

    if !response.is_success() {
        return Err(StatusError::ListingStatus {
            url: base_url.to_string(),
            status: response.status,
        });
    }

    let html = String::from_utf8_lossy(&response.body);
    Ok(parse_listing(&html, base_url))
}

/// Extract folders from listing HTML, in document order.
///
/// Only anchors with an `href` inside `<pre>` blocks count. The parent
/// directory entry and query-only sort links are skipped and a trailing `/` is stripped from the link
/// text to form the folder name.
pub fn parse_listing(html: &str, base_url: &str) -> Vec<Folder> {
    let mut folders = Vec::new();

    for block in PRE_BLOCK_REGEX.captures_iter(html) {
        let Some(body) = block.get(1) else { continue };

        for anchor in ANCHOR_REGEX.captures_iter(body.as_str()) {
            let attrs = anchor.get(1).map_or("", |m| m.as_str());
            let Some(href) = extract_href(attrs) else { continue };
            // Column sort links (`?C=N;O=D`) point back at the listing itself
            if href.starts_with('?') {
                continue;
            }

            let inner = anchor.get(2).map_or("", |m| m.as_str());
            let text = decode_entities(TAG_REGEX.replace_all(inner, "").trim());

            if is_parent_link(&text, &href) {
                continue;
            }

            let name = text.strip_suffix('/').unwrap_or(text.as_str()).trim();
            if name.is_empty() {
                continue;
            }

            folders.push(Folder::under(base_url, name));
        }
    }

    folders
}

fn extract_href(attrs: &str) -> Option<String> {
    let caps = HREF_REGEX.captures(attrs)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str().to_string())
}

fn is_parent_link(text: &str, href: &str) -> bool {
    PARENT_LINK_TEXTS.iter().any(|p| text.eq_ignore_ascii_case(p)) || href == "../" || href == ".."
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
