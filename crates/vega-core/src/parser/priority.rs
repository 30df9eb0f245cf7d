//! Priority link solver for link-locker redirect pages
//!
//! Picks the single best onward link by trying a strict priority order
//! of known target-link domain markers. The order is fixed and total:
//! first match by priority class wins regardless of document position,
//! with no scoring.

use scraper::{Html, Selector};

use crate::types::{Extraction, PriorityLink};
use crate::vocab::Vocabulary;

/// Solves the best onward link from a locker redirect page
///
/// Evaluates `vocab.priority_markers` as an ordered (marker, tag) chain:
/// the first anchor whose destination contains the first marker wins and
/// is tagged with that class; only then is the next marker tried.
///
/// # Returns
/// `Success(PriorityLink)` with the winning destination and its priority
/// tag, or `Fail("Not Found")` when no marker matches any anchor.
pub fn solve_priority(html: &str, vocab: &Vocabulary) -> Extraction<PriorityLink> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Extraction::fail("Not Found");
    };

    for (marker, tag) in &vocab.priority_markers {
        for anchor in document.select(&selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let href = href.trim();
            if !href.is_empty() && href.contains(marker) {
                return Extraction::Success(PriorityLink {
                    link: href.to_string(),
                    source: (*tag).to_string(),
                });
            }
        }
    }

    Extraction::fail("Not Found")
}
