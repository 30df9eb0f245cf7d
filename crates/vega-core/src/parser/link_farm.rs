//! Link farm extractor for content pages
//!
//! Scans the article-body containers for all plausible download anchors
//! using domain allow-listing and label-text keyword matching, filters a
//! domain block-list, and deduplicates by destination. Scanning is
//! limited to the designated containers; walking the whole document is
//! avoided for cost reasons.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use crate::types::{Extraction, LinkCandidate, LinkFarm};
use crate::vocab::{Vocabulary, strip_glyphs, truncate_label};

/// Maximum length of a derived candidate name, in characters
const MAX_NAME_LEN: usize = 50;

/// Literal fallback when no usable label text exists near an anchor
const FALLBACK_NAME: &str = "Download Link";

/// Structural-drift diagnostic returned when zero candidates survive
const NO_LINKS_REASON: &str = "No links found. The page structure might have changed.";

/// Element names treated as block-level for ancestor lookup
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "td", "h1", "h2", "h3", "h4", "h5", "h6", "section", "center", "figure",
];

/// Extracts all candidate download links from a content page
///
/// Per-anchor filter pipeline, in order:
/// 1. reject empty or fragment-only ("#…") destinations;
/// 2. reject destinations containing a block-listed fragment — this runs
///    before allow-listing and overrides it;
/// 3. accept if the destination contains an allow-listed host fragment
///    OR the case-folded anchor text contains a download-intent keyword
///    (independent triggers; either suffices);
/// 4. deduplicate by exact destination string, first-seen name wins.
///
/// # Returns
/// `Success(LinkFarm)` with the surviving candidates, or a `Fail` naming
/// structural drift when none survive.
pub fn extract_links(html: &str, vocab: &Vocabulary) -> Extraction<LinkFarm> {
    let document = Html::parse_document(html);
    let scoped = vocab.scoped_selector("a[href]");
    let Ok(selector) = Selector::parse(&scoped) else {
        return Extraction::fail(NO_LINKS_REASON);
    };

    let mut seen: HashSet<String> = HashSet::new();
    let mut links: Vec<LinkCandidate> = Vec::new();

    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let href_folded = href.to_lowercase();
        if vocab
            .blocked_fragments
            .iter()
            .any(|fragment| href_folded.contains(fragment))
        {
            continue;
        }

        let by_host = vocab
            .allowed_hosts
            .iter()
            .any(|host| href_folded.contains(host));
        let by_text = {
            let label = anchor.text().collect::<String>().to_uppercase();
            vocab
                .download_keywords
                .iter()
                .any(|keyword| label.contains(keyword))
        };
        if !by_host && !by_text {
            continue;
        }

        // Nested containers can yield the same anchor twice; the dedup
        // also covers that.
        if !seen.insert(href.to_string()) {
            continue;
        }

        links.push(LinkCandidate {
            name: derive_name(&anchor),
            link: href.to_string(),
        });
    }

    if links.is_empty() {
        return Extraction::fail(NO_LINKS_REASON);
    }

    Extraction::Success(LinkFarm {
        total: links.len(),
        links,
    })
}

/// Derives a display name for an anchor
///
/// Uses the anchor's own trimmed, glyph-stripped text; if that is
/// shorter than 2 characters, falls back to the nearest preceding
/// heading/paragraph/strong sibling of the anchor's nearest block-level
/// ancestor, then to that ancestor's full text, then to the literal
/// fallback. Names are truncated to 50 characters.
fn derive_name(anchor: &ElementRef) -> String {
    let own = strip_glyphs(&anchor.text().collect::<String>());
    if own.chars().count() >= 2 {
        return truncate_label(&own, MAX_NAME_LEN);
    }

    if let Some(block) = nearest_block_ancestor(anchor) {
        if let Some(label) = preceding_label_text(&block) {
            return truncate_label(&label, MAX_NAME_LEN);
        }
        let full = strip_glyphs(&block.text().collect::<String>());
        if full.chars().count() >= 2 {
            return truncate_label(&full, MAX_NAME_LEN);
        }
    }

    FALLBACK_NAME.to_string()
}

/// Finds the closest block-level element enclosing `anchor`
pub(super) fn nearest_block_ancestor<'a>(anchor: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| BLOCK_TAGS.contains(&el.value().name()))
}

/// Text of the nearest preceding heading/paragraph/strong sibling of a
/// block, if it has usable text
fn preceding_label_text(block: &ElementRef) -> Option<String> {
    for node in block.prev_siblings() {
        if let Some(el) = ElementRef::wrap(node) {
            if matches!(
                el.value().name(),
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" | "strong"
            ) {
                let text = strip_glyphs(&el.text().collect::<String>());
                if text.chars().count() >= 2 {
                    return Some(text);
                }
            }
        }
    }
    None
}
