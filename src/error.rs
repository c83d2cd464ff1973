//! Error types shared across the crate.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Errors surfaced by sitemap construction, parsing, and serialization.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// A required field was empty at construction time.
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    /// An alternate link was given neither an `hreflang` nor an `href`.
    #[error("alternate link requires both `hreflang` and `href`")]
    AlternateIncomplete,

    /// The URL filter pattern did not compile.
    #[error("invalid URL pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The document was not well-formed XML.
    #[error("malformed sitemap document: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Reading or writing the underlying file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
