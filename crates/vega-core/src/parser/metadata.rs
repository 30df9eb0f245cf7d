//! Metadata classifier for content pages
//!
//! Derives quality/language/audio labels from two evidence sources: the
//! description paragraph carrying a field marker ("Language:" /
//! "Quality:") and the text neighborhood of allow-listed download
//! anchors. Collection and matching are separate steps so the matchers
//! stay unit-testable against literal strings.

use scraper::{ElementRef, Html, Selector};

use super::link_farm::nearest_block_ancestor;
use crate::types::PageMetadata;
use crate::vocab::{Vocabulary, has_whole_word};

/// Sentinel when no resolution tier is recognized
const UNKNOWN_QUALITY: &str = "Unknown Quality";

/// Sentinel when no language is recognized
const NOT_SPECIFIED: &str = "Not Specified";

/// Classifies quality, languages and audio labeling for a content page
///
/// Never fails: a missing content container simply yields the
/// all-sentinel defaults. The output is a pure function of the text
/// corpus assembled from the page.
pub fn classify_metadata(html: &str, vocab: &Vocabulary) -> PageMetadata {
    let document = Html::parse_document(html);

    let neighborhood = collect_link_neighborhood(&document, vocab);
    let language_corpus = format!(
        "{} {}",
        collect_marked_paragraph(&document, vocab, "Language:"),
        neighborhood
    );
    let quality_corpus = format!(
        "{} {}",
        collect_marked_paragraph(&document, vocab, "Quality:"),
        neighborhood
    );

    let languages = match_languages(&language_corpus, vocab);
    PageMetadata {
        quality: match_quality(&quality_corpus, vocab),
        audio: audio_label(&languages),
        languages: render_languages(&languages),
    }
}

// ---------------------------------------------------------------------------
// Evidence collection
// ---------------------------------------------------------------------------

/// Source A: full text of the container paragraph whose emphasis child
/// carries the given field marker
fn collect_marked_paragraph(document: &Html, vocab: &Vocabulary, marker: &str) -> String {
    let scoped = vocab.scoped_selector("p");
    let Ok(paragraphs) = Selector::parse(&scoped) else {
        return String::new();
    };
    let Ok(emphasis) = Selector::parse("strong, b, em, span") else {
        return String::new();
    };

    for paragraph in document.select(&paragraphs) {
        let marked = paragraph
            .select(&emphasis)
            .any(|el| el.text().collect::<String>().contains(marker));
        if marked {
            return paragraph.text().collect::<String>();
        }
    }

    String::new()
}

/// Source B: for every allow-listed anchor, the text of its nearest
/// block ancestor plus up to two heading/paragraph siblings immediately
/// preceding that ancestor, accumulated across all matching anchors
fn collect_link_neighborhood(document: &Html, vocab: &Vocabulary) -> String {
    let Ok(selector) = Selector::parse("a[href]") else {
        return String::new();
    };

    let mut corpus = String::new();
    for anchor in document.select(&selector) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href_folded = href.to_lowercase();
        if !vocab
            .allowed_hosts
            .iter()
            .any(|host| href_folded.contains(host))
        {
            continue;
        }

        let Some(block) = nearest_block_ancestor(&anchor) else {
            continue;
        };
        corpus.push(' ');
        corpus.push_str(&block.text().collect::<String>());

        let mut taken = 0;
        for node in block.prev_siblings() {
            if taken == 2 {
                break;
            }
            if let Some(el) = ElementRef::wrap(node) {
                if matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p") {
                    corpus.push(' ');
                    corpus.push_str(&el.text().collect::<String>());
                    taken += 1;
                }
            }
        }
    }

    corpus
}

// ---------------------------------------------------------------------------
// Pure matchers
// ---------------------------------------------------------------------------

/// Matches the language vocabulary against a text corpus
///
/// Whole-word, case-insensitive matching; the result preserves the
/// vocabulary's enumeration order, not document position.
pub fn match_languages<'v>(corpus: &str, vocab: &'v Vocabulary) -> Vec<&'v str> {
    let upper = corpus.to_uppercase();
    vocab
        .languages
        .iter()
        .copied()
        .filter(|language| has_whole_word(&upper, language))
        .collect()
}

/// Derives the quality label from a text corpus
///
/// Picks the highest-ranked resolution tier present, then appends the
/// distinct format tags present in vocabulary order. With no recognized
/// tier the sentinel is returned and tags are ignored even if present.
pub fn match_quality(corpus: &str, vocab: &Vocabulary) -> String {
    let upper = corpus.to_uppercase();

    let best_tier = vocab
        .resolution_tiers
        .iter()
        .filter(|(label, _)| has_whole_word(&upper, label))
        .max_by_key(|(_, rank)| *rank);

    let Some((tier, _)) = best_tier else {
        return UNKNOWN_QUALITY.to_string();
    };

    let mut quality = (*tier).to_string();
    for tag in &vocab.format_tags {
        if has_whole_word(&upper, tag) {
            quality.push(' ');
            quality.push_str(tag);
        }
    }

    quality.trim_end().to_string()
}

/// Audio-mix label as a pure function of the language count
///
/// 0 → "Unknown", 1 → the single language, 2 → "Dual Audio",
/// 3 or more → "Multi Audio"; which languages matched is irrelevant.
pub fn audio_label(languages: &[&str]) -> String {
    match languages.len() {
        0 => "Unknown".to_string(),
        1 => languages[0].to_string(),
        2 => "Dual Audio".to_string(),
        _ => "Multi Audio".to_string(),
    }
}

/// Renders the matched language set, comma-joined, or the sentinel
fn render_languages(languages: &[&str]) -> String {
    if languages.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        languages.join(", ")
    }
}
