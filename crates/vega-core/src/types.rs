//! Core data types for the vega scraper
//!
//! Contains the tagged extraction outcome and the payload structures
//! returned by the four extraction procedures. All types implement
//! Serialize and Deserialize so results can cross a JSON boundary.

use serde::{Deserialize, Serialize};

/// Tagged outcome of an extraction procedure
///
/// Procedures return `Result<Extraction<T>, VegaError>`:
/// - `Ok(Extraction::Success(_))` — payload present
/// - `Ok(Extraction::Fail { .. })` — page reachable, target not found;
///   the reason distinguishes bad status, structural drift and missing
///   identifiers
/// - `Err(_)` — transport or parsing exception
///
/// Callers must branch on the tag and never assume payload presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum Extraction<T> {
    /// Target found; carries the procedure-specific payload
    Success(T),
    /// Page fetched and parsed, but the expected pattern is absent
    Fail {
        /// Human-readable diagnostic distinguishing the cause
        reason: String,
    },
}

impl<T> Extraction<T> {
    /// Shorthand constructor for the `Fail` tag
    pub fn fail(reason: impl Into<String>) -> Self {
        Extraction::Fail {
            reason: reason.into(),
        }
    }

    /// Returns true if the extraction carries a payload
    pub fn is_success(&self) -> bool {
        matches!(self, Extraction::Success(_))
    }

    /// Returns the payload, discarding a `Fail`
    pub fn success(self) -> Option<T> {
        match self {
            Extraction::Success(payload) => Some(payload),
            Extraction::Fail { .. } => None,
        }
    }
}

/// A single candidate download link
///
/// Uniqueness key is the exact `link` string; the first-seen name wins
/// on duplicates. `link` is never empty and never starts with "#".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidate {
    /// Derived display name, trimmed and truncated to 50 characters
    pub name: String,

    /// Destination URL, absolute or relative, treated as opaque
    pub link: String,
}

/// All candidate links collected from one content page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFarm {
    /// Number of deduplicated candidates
    pub total: usize,

    /// Candidates in document order
    pub links: Vec<LinkCandidate>,
}

/// The single best onward link picked from a link-locker page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityLink {
    /// Destination URL of the winning anchor
    pub link: String,

    /// Priority class that matched, e.g. "Priority 1"
    pub source: String,
}

/// Best-effort quality/language/audio classification of a content page
///
/// Sentinels: "Unknown Quality", "Not Specified" and "Unknown"
/// respectively when no evidence is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    /// Resolution tier plus matched format tags, e.g. "1080p WEB-DL HEVC"
    pub quality: String,

    /// Comma-joined recognized languages in vocabulary order
    pub languages: String,

    /// Audio-mix label derived from the language count
    pub audio: String,
}

/// Merged content-page response: link farm plus metadata
///
/// Produced when LinkFarmExtractor and MetadataClassifier run on the
/// same document and their outputs are combined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageExtract {
    /// Number of deduplicated candidates
    pub total: usize,

    /// Candidates in document order
    pub links: Vec<LinkCandidate>,

    /// Quality label for the page
    pub quality: String,

    /// Comma-joined recognized languages
    pub languages: String,

    /// Audio-mix label
    pub audio: String,
}

impl PageExtract {
    /// Merges a link farm and a metadata classification into one payload
    pub fn merge(farm: LinkFarm, metadata: PageMetadata) -> Self {
        Self {
            total: farm.total,
            links: farm.links,
            quality: metadata.quality,
            languages: metadata.languages,
            audio: metadata.audio,
        }
    }
}
