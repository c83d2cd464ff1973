//! Build, mutate, and serialize XML sitemaps and sitemap index documents.
//!
//! Implements the in-memory model of the sitemaps.org protocol: a
//! [`Sitemap`] is an ordered collection of [`UrlEntry`] values carrying
//! optional metadata (last-modified date, change frequency, priority),
//! localized `xhtml:link` alternates, and Google image extension
//! references; a [`SitemapIndex`] lists child sitemap documents.
//! Documents round-trip: anything written by [`Sitemap::write_to_file`]
//! parses back into the same model with [`Sitemap::from_file`].
//!
//! ```
//! use sitemap_kit::Sitemap;
//!
//! # fn main() -> sitemap_kit::Result<()> {
//! let mut sitemap = Sitemap::from_list(["https://example.com/"])?;
//! sitemap.add_url("https://example.com/about/")?;
//! let xml = sitemap.to_xml_string()?;
//! assert!(xml.contains("https://example.com/about/"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod sitemap;

pub use error::{Result, SitemapError};
pub use sitemap::{
    HreflangAlternate, ImageEntry, ImageInput, IndexEntry, IndexInput, Sitemap, SitemapIndex,
    UrlEntry, UrlInput,
};
