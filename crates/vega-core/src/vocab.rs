//! Fixed vocabularies and domain lists for the extraction heuristics
//!
//! Every list the parsers match against lives here as immutable
//! configuration passed into each procedure, so tests can run against
//! alternate vocabularies without touching control flow. `Default`
//! carries the production values observed on the target site family.

/// Immutable matching configuration shared by all extraction procedures
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Recognized language names; enumeration order is the output order
    pub languages: Vec<&'static str>,

    /// Resolution tiers as (label, rank); highest rank wins
    pub resolution_tiers: Vec<(&'static str, u32)>,

    /// Print/encode descriptors; enumeration order is the output order
    pub format_tags: Vec<&'static str>,

    /// Host/path fragments of known link-locker and download hosts
    pub allowed_hosts: Vec<&'static str>,

    /// Fragments indicating non-download content (images, social, assets)
    pub blocked_fragments: Vec<&'static str>,

    /// Upper-cased download-intent keywords matched against anchor text
    pub download_keywords: Vec<&'static str>,

    /// CSS selectors for the article-body / main-content containers
    pub content_containers: Vec<&'static str>,

    /// Onward-link domain markers in strict priority order, with the
    /// priority tag reported on success
    pub priority_markers: Vec<(&'static str, &'static str)>,

    /// Downstream-host fragments for the HubDrive strategy chain; the
    /// first entry is the preferred host
    pub hubdrive_hosts: Vec<&'static str>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            languages: vec![
                "English",
                "Hindi",
                "Tamil",
                "Telugu",
                "Malayalam",
                "Kannada",
                "Bengali",
                "Marathi",
                "Punjabi",
                "Gujarati",
                "Urdu",
                "Korean",
                "Japanese",
                "Chinese",
                "Spanish",
                "French",
                "German",
                "Russian",
            ],
            resolution_tiers: vec![
                ("4K", 5000),
                ("2160p", 4000),
                ("1080p", 3000),
                ("720p", 2000),
                ("480p", 1000),
            ],
            format_tags: vec![
                "WEB-DL", "HDRip", "Bluray", "HEVC", "10Bit", "UNCUT", "WEB-RIP", "DVDRIP",
            ],
            allowed_hosts: vec![
                "hubcloud",
                "hubdrive",
                "vcloud",
                "gdflix",
                "gdtot",
                "filepress",
                "fast-dl",
                "driveleech",
                "workers.dev",
            ],
            blocked_fragments: vec![
                "imdb.com",
                "imgur.com",
                "postimg",
                "imgbb",
                "gravatar",
                "facebook.com",
                "twitter.com",
                "t.me",
                "telegram",
                "whatsapp",
                "instagram",
                "youtube.com",
                "/wp-content/",
                "/author/",
                "/category/",
                "/tag/",
                ".png",
                ".jpg",
                ".jpeg",
                ".gif",
                ".webp",
            ],
            download_keywords: vec![
                "480P", "720P", "1080P", "2160P", "4K", "DOWNLOAD", "DIRECT", "GDRIVE", "G-DRIVE",
                "V-CLOUD", "BATCH", "ZIP", "EPISODE",
            ],
            content_containers: vec![
                ".entry-content",
                ".entry-inner",
                ".post-inner",
                ".single-content",
                "article",
            ],
            priority_markers: vec![("vcloud", "Priority 1"), ("fast-dl", "Priority 2")],
            hubdrive_hosts: vec!["hubcloud", "/drive/"],
        }
    }
}

impl Vocabulary {
    /// Builds a comma-joined selector scoping `suffix` to every content
    /// container, e.g. `".entry-content a[href], article a[href]"`
    pub fn scoped_selector(&self, suffix: &str) -> String {
        self.content_containers
            .iter()
            .map(|container| format!("{container} {suffix}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Case-sensitive whole-word search of `term` inside an already
/// upper-cased corpus
///
/// A match counts only when the characters adjacent to the hit are not
/// ASCII alphanumeric, so "HINDI" does not match inside a longer token.
/// Terms are upper-cased here; corpora are upper-cased once by callers.
pub fn has_whole_word(upper_corpus: &str, term: &str) -> bool {
    let needle = term.to_uppercase();
    if needle.is_empty() {
        return false;
    }

    for (start, _) in upper_corpus.match_indices(&needle) {
        let before_ok = start == 0
            || !upper_corpus.as_bytes()[start - 1].is_ascii_alphanumeric();
        let end = start + needle.len();
        let after_ok = end >= upper_corpus.len()
            || !upper_corpus.as_bytes()[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// Strips decorative glyphs (emoji, arrows, bullets) from label text and
/// collapses runs of whitespace
///
/// Keeps ASCII printable characters and non-ASCII letters/digits, so
/// titles in non-Latin scripts survive while "⚡➤✅" decorations do not.
pub fn strip_glyphs(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii() || c.is_alphanumeric())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates a derived name to at most `max` characters, trimming any
/// trailing whitespace left at the cut
pub fn truncate_label(text: &str, max: usize) -> String {
    text.chars().take(max).collect::<String>().trim_end().to_string()
}
