//! Vega Scraper Core Library
//!
//! Extracts download links and descriptive metadata (quality, language,
//! audio mix) from HTML pages of a movie-link aggregation site and its
//! redirect/bypass intermediaries.
//!
//! # Overview
//!
//! Four independent extraction procedures, all pure functions of fetched
//! HTML with no shared state:
//! - priority solving: pick the single best onward link from a
//!   link-locker redirect page
//! - link farming: collect every plausible download anchor from a
//!   content page, deduplicated and named
//! - metadata classification: derive quality/language/audio labels from
//!   a layered text-matching strategy
//! - bypass resolution: decode the obfuscated redirect target of an
//!   "unlock" page and resolve the final link behind it
//!
//! The [`VegaScraper`] facade owns the HTTP transport and routes fetched
//! pages to the right procedure; the parsers in [`parser`] are also
//! exposed directly for callers that already hold HTML.
//!
//! # Example
//!
//! ```no_run
//! use vega_core::{Extraction, Result, VegaScraper};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = VegaScraper::new()?;
//!
//!     match scraper.extract_page("https://example.site/movie-page").await? {
//!         Extraction::Success(page) => {
//!             println!("{} ({}, {})", page.quality, page.languages, page.audio);
//!             for candidate in &page.links {
//!                 println!("{}: {}", candidate.name, candidate.link);
//!             }
//!         }
//!         Extraction::Fail { reason } => eprintln!("no links: {reason}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Outcome taxonomy
//!
//! Every procedure returns `Result<Extraction<T>, VegaError>`: `Err` is a
//! transport or parsing exception, `Extraction::Fail` means the page was
//! reachable but the expected pattern was absent (with a diagnostic
//! distinguishing bad status codes from structural drift), and
//! `Extraction::Success` carries the payload. Callers own retry policy;
//! nothing is retried internally.

mod client;
mod error;
pub mod parser;
mod scraper;
mod types;
pub mod vocab;

// Re-export client types
pub use client::{ClientConfig, HeaderProfile, HttpClient, PageResponse};

// Re-export error types
pub use error::{Result, VegaError};

// Re-export parser functions
pub use parser::{
    classify_metadata, extract_final_link, extract_hubdrive_link, extract_links,
    extract_locked_target, solve_priority,
};

// Re-export main scraper API
pub use scraper::VegaScraper;

// Re-export data types
pub use types::{Extraction, LinkCandidate, LinkFarm, PageExtract, PageMetadata, PriorityLink};

// Re-export the matching configuration
pub use vocab::Vocabulary;
