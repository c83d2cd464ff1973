//! Sitemap data structures, mutation, and XML (de)serialization.
//!
//! The model mirrors the sitemaps.org wire format: a [`Sitemap`] owns
//! ordered [`UrlEntry`] values, each of which may carry localized
//! alternates and image references, and a [`SitemapIndex`] owns ordered
//! [`IndexEntry`] values pointing at child sitemap documents.

pub mod parser;
pub mod query;
pub mod types;
pub mod writer;

pub use types::*;
pub use writer::{SITEMAP_FILENAME, SITEMAP_INDEX_FILENAME};
