//! HTML parsers for the vega scraper
//!
//! One module per page role: locker redirect pages, content pages
//! (links and metadata), and bypass/HubDrive pages.

pub mod bypass;
pub mod link_farm;
pub mod metadata;
pub mod priority;

pub use bypass::{extract_final_link, extract_hubdrive_link, extract_locked_target};
pub use link_farm::extract_links;
pub use metadata::classify_metadata;
pub use priority::solve_priority;
