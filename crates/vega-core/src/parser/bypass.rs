//! Parsers for link-locker bypass and HubDrive file pages
//!
//! Handles the obfuscated redirect target embedded in "unlock" pages
//! (a URL-encoded, base64-wrapped query parameter assigned to a script
//! variable) and the fixed-priority link lookups on the pages behind
//! them.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{Result, VegaError};
use crate::vocab::Vocabulary;

/// Path marker of URLs that already point at a direct-download page and
/// need no unlock step
pub const DIRECT_PATH_MARKER: &str = "/drive/";

/// Element id carrying the final link on resolved download pages
const FINAL_LINK_ID: &str = "vd";

/// Extracts the real redirect target from an unlock page body
///
/// Looks for `var reurl = "<literal>"`, reads the literal's `r=` query
/// parameter and base64-decodes it after padding to a multiple of 4.
///
/// # Returns
/// `Ok(None)` when the variable or parameter is absent — callers fall
/// back to the original URL unmodified (known quirk, kept as observed).
///
/// # Errors
/// `DecodeError` when a payload is present but is not valid base64 or
/// does not decode to UTF-8.
pub fn extract_locked_target(html: &str) -> Result<Option<String>> {
    let Ok(re) = Regex::new(r#"var\s+reurl\s*=\s*"([^"]+)""#) else {
        return Ok(None);
    };
    let Some(caps) = re.captures(html) else {
        return Ok(None);
    };
    let literal = caps.get(1).map(|m| m.as_str()).unwrap_or_default();

    let Some(payload) = query_param(literal, "r") else {
        return Ok(None);
    };

    decode_redirect_payload(&payload).map(Some)
}

/// Decodes a base64 redirect payload, tolerating missing '=' padding
pub fn decode_redirect_payload(payload: &str) -> Result<String> {
    let decoded_param = urlencoding::decode(payload)
        .map_err(|e| VegaError::DecodeError(e.to_string()))?
        .into_owned();

    let mut padded = decoded_param;
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| VegaError::DecodeError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| VegaError::DecodeError(e.to_string()))
}

/// Reads one query parameter from a URL by plain string splitting
fn query_param(url: &str, key: &str) -> Option<String> {
    let query = url.split('?').nth(1)?;
    for param in query.split('&') {
        if let Some(value) = param.strip_prefix(key)
            && let Some(value) = value.strip_prefix('=')
        {
            return Some(value.to_string());
        }
    }
    None
}

/// Resolves the final link on a target download page
///
/// Reads the href of the element with id "vd"; if absent, falls back to
/// a script-style `location.href = "…"` literal. Empty or
/// whitespace-only destinations never count as a match.
pub fn extract_final_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Ok(selector) = Selector::parse(&format!("#{FINAL_LINK_ID}")) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if !href.is_empty() {
                    return Some(href.to_string());
                }
            }
        }
    }

    extract_location_literal(html)
}

/// Extracts a location-assignment literal from inline script text
fn extract_location_literal(html: &str) -> Option<String> {
    let patterns = [
        r#"window\.location\.href\s*=\s*["']([^"']+)["']"#,
        r#"window\.location\.replace\(\s*["']([^"']+)["']\s*\)"#,
        r#"location\.href\s*=\s*["']([^"']+)["']"#,
    ];

    for pattern in patterns {
        if let Ok(re) = Regex::new(pattern)
            && let Some(caps) = re.captures(html)
            && let Some(url) = caps.get(1)
        {
            let url = url.as_str().trim();
            if !url.is_empty() {
                return Some(decode_html_entities(url));
            }
        }
    }

    None
}

/// Resolves the download link on a HubDrive file page
///
/// Three strategies in fixed priority order, first non-empty destination
/// wins:
/// 1. a styled success button pointing at the preferred downstream host;
/// 2. the element with id "download";
/// 3. the first anchor anywhere whose destination contains a known
///    downstream-host fragment (fast exit, not a collect-all).
pub fn extract_hubdrive_link(html: &str, vocab: &Vocabulary) -> Option<String> {
    let document = Html::parse_document(html);
    let preferred = vocab.hubdrive_hosts.first().copied().unwrap_or_default();

    if let Ok(selector) = Selector::parse("a.btn-success[href]") {
        for button in document.select(&selector) {
            if let Some(href) = button.value().attr("href") {
                let href = href.trim();
                if !href.is_empty() && href.contains(preferred) {
                    return Some(href.to_string());
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("#download") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if !href.is_empty() {
                    return Some(href.to_string());
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("a[href]") {
        for anchor in document.select(&selector) {
            if let Some(href) = anchor.value().attr("href") {
                let href = href.trim();
                if !href.is_empty()
                    && vocab
                        .hubdrive_hosts
                        .iter()
                        .any(|fragment| href.contains(fragment))
                {
                    return Some(href.to_string());
                }
            }
        }
    }

    None
}

/// Decodes common HTML entities in URLs lifted from raw markup
fn decode_html_entities(url: &str) -> String {
    url.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
