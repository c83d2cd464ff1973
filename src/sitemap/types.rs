//! Entity types of sitemap and sitemap index documents.

use crate::error::{Result, SitemapError};

/// Base namespace of the sitemaps.org protocol.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Namespace of `xhtml:link` localized-alternate elements.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Namespace of the Google image sitemap extension.
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// A localized-alternate link, serialized as
/// `<xhtml:link rel="alternate" hreflang="…" href="…"/>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HreflangAlternate {
    pub hreflang: String,
    pub href: String,
}

impl HreflangAlternate {
    /// The fixed `rel` attribute carried by every alternate link.
    pub const REL: &'static str = "alternate";

    /// Build an alternate link; both parts must be non-empty.
    pub fn new(hreflang: impl Into<String>, href: impl Into<String>) -> Result<Self> {
        let hreflang = hreflang.into();
        let href = href.into();
        match (hreflang.is_empty(), href.is_empty()) {
            (true, true) => Err(SitemapError::AlternateIncomplete),
            (true, false) => Err(SitemapError::MissingField { field: "hreflang" }),
            (false, true) => Err(SitemapError::MissingField { field: "href" }),
            (false, false) => Ok(Self { hreflang, href }),
        }
    }
}

/// An associated image reference, serialized as an `<image:image>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub loc: String,
}

impl ImageEntry {
    /// Build an image reference; the image URL must be non-empty.
    pub fn new(loc: impl Into<String>) -> Result<Self> {
        let loc = loc.into();
        if loc.is_empty() {
            return Err(SitemapError::MissingField { field: "loc" });
        }
        Ok(Self { loc })
    }
}

/// One `<url>` entry of a sitemap document.
///
/// `loc` is the only required field. The optional metadata fields are
/// true options — an absent `lastmod` is `None`, never an empty string —
/// and none of them appear in the serialized document unless set.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<f32>,
    pub alternates: Vec<HreflangAlternate>,
    pub images: Vec<ImageEntry>,
}

impl UrlEntry {
    /// Build an entry for the given page URL; `loc` must be non-empty.
    pub fn new(loc: impl Into<String>) -> Result<Self> {
        let loc = loc.into();
        if loc.is_empty() {
            return Err(SitemapError::MissingField { field: "loc" });
        }
        Ok(Self {
            loc,
            lastmod: None,
            changefreq: None,
            priority: None,
            alternates: Vec::new(),
            images: Vec::new(),
        })
    }

    /// Set the last-modified date (`YYYY-MM-DD`).
    pub fn lastmod(mut self, date: impl Into<String>) -> Self {
        self.lastmod = Some(date.into());
        self
    }

    /// Set the change frequency. The value is passed through verbatim;
    /// the protocol enumeration (`always` … `never`) is not enforced.
    pub fn changefreq(mut self, freq: impl Into<String>) -> Self {
        self.changefreq = Some(freq.into());
        self
    }

    /// Set the crawl priority, conventionally in `[0.0, 1.0]`.
    /// Not range-checked.
    pub fn priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Append a pre-built alternate link.
    pub fn add_alternate(&mut self, alternate: HreflangAlternate) -> &mut Self {
        self.alternates.push(alternate);
        self
    }

    /// Build and append an alternate link from its two parts.
    pub fn add_alternate_parts(&mut self, hreflang: &str, href: &str) -> Result<&mut Self> {
        self.alternates.push(HreflangAlternate::new(hreflang, href)?);
        Ok(self)
    }

    /// Append several alternate links from `(hreflang, href)` pairs.
    ///
    /// Every pair is validated before any is appended: an invalid pair
    /// fails the whole call and leaves the entry untouched.
    pub fn add_alternates<I, A, B>(&mut self, pairs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut built = Vec::new();
        for (hreflang, href) in pairs {
            built.push(HreflangAlternate::new(hreflang, href)?);
        }
        self.alternates.extend(built);
        Ok(self)
    }

    /// Append an image reference, either pre-built or as a raw URL string.
    pub fn add_image(&mut self, image: impl Into<ImageInput>) -> Result<&mut Self> {
        let image = match image.into() {
            ImageInput::Loc(loc) => ImageEntry::new(loc)?,
            ImageInput::Entry(entry) => entry,
        };
        self.images.push(image);
        Ok(self)
    }
}

/// One `<sitemap>` entry of a sitemap index document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub loc: String,
    pub lastmod: Option<String>,
}

impl IndexEntry {
    /// Build an entry pointing at a child sitemap; `loc` must be non-empty.
    pub fn new(loc: impl Into<String>) -> Result<Self> {
        let loc = loc.into();
        if loc.is_empty() {
            return Err(SitemapError::MissingField { field: "loc" });
        }
        Ok(Self { loc, lastmod: None })
    }

    /// Set the last-modified date of the child sitemap.
    pub fn lastmod(mut self, date: impl Into<String>) -> Self {
        self.lastmod = Some(date.into());
        self
    }
}

/// Either a raw page URL or a pre-built [`UrlEntry`].
///
/// Construction APIs accept both forms and dispatch once at ingestion,
/// so a mixed list of strings and entries is legal.
#[derive(Debug, Clone)]
pub enum UrlInput {
    Loc(String),
    Entry(UrlEntry),
}

impl UrlInput {
    pub(crate) fn into_entry(self) -> Result<UrlEntry> {
        match self {
            UrlInput::Loc(loc) => UrlEntry::new(loc),
            UrlInput::Entry(entry) => Ok(entry),
        }
    }
}

impl From<&str> for UrlInput {
    fn from(loc: &str) -> Self {
        UrlInput::Loc(loc.to_string())
    }
}

impl From<String> for UrlInput {
    fn from(loc: String) -> Self {
        UrlInput::Loc(loc)
    }
}

impl From<UrlEntry> for UrlInput {
    fn from(entry: UrlEntry) -> Self {
        UrlInput::Entry(entry)
    }
}

/// Either a raw child-sitemap URL or a pre-built [`IndexEntry`].
#[derive(Debug, Clone)]
pub enum IndexInput {
    Loc(String),
    Entry(IndexEntry),
}

impl IndexInput {
    pub(crate) fn into_entry(self) -> Result<IndexEntry> {
        match self {
            IndexInput::Loc(loc) => IndexEntry::new(loc),
            IndexInput::Entry(entry) => Ok(entry),
        }
    }
}

impl From<&str> for IndexInput {
    fn from(loc: &str) -> Self {
        IndexInput::Loc(loc.to_string())
    }
}

impl From<String> for IndexInput {
    fn from(loc: String) -> Self {
        IndexInput::Loc(loc)
    }
}

impl From<IndexEntry> for IndexInput {
    fn from(entry: IndexEntry) -> Self {
        IndexInput::Entry(entry)
    }
}

/// Either a raw image URL or a pre-built [`ImageEntry`].
#[derive(Debug, Clone)]
pub enum ImageInput {
    Loc(String),
    Entry(ImageEntry),
}

impl From<&str> for ImageInput {
    fn from(loc: &str) -> Self {
        ImageInput::Loc(loc.to_string())
    }
}

impl From<String> for ImageInput {
    fn from(loc: String) -> Self {
        ImageInput::Loc(loc)
    }
}

impl From<ImageEntry> for ImageInput {
    fn from(entry: ImageEntry) -> Self {
        ImageInput::Entry(entry)
    }
}

/// An ordered collection of [`UrlEntry`] values — one sitemap document.
///
/// Order reflects insertion / parse order and becomes document order on
/// write. Duplicate `loc` values are legal input and legal output unless
/// [`Sitemap::deduplicate`] is invoked explicitly.
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

/// An ordered collection of [`IndexEntry`] values — one sitemap index
/// document. Same ordering and uniqueness rules as [`Sitemap`].
#[derive(Debug, Clone, Default)]
pub struct SitemapIndex {
    pub entries: Vec<IndexEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_entry_requires_loc() {
        assert!(UrlEntry::new("https://example.com/").is_ok());
        assert!(matches!(
            UrlEntry::new(""),
            Err(SitemapError::MissingField { field: "loc" })
        ));
    }

    #[test]
    fn test_builder_setters() {
        let entry = UrlEntry::new("https://example.com/")
            .unwrap()
            .lastmod("2025-10-25")
            .changefreq("weekly")
            .priority(0.9);

        assert_eq!(entry.lastmod.as_deref(), Some("2025-10-25"));
        assert_eq!(entry.changefreq.as_deref(), Some("weekly"));
        assert_eq!(entry.priority, Some(0.9));
    }

    #[test]
    fn test_add_alternate_both_forms() {
        let mut entry = UrlEntry::new("https://www.example.com/").unwrap();
        entry
            .add_alternate_parts("de-de", "https://www.example.de/")
            .unwrap();
        assert_eq!(entry.alternates.len(), 1);

        let alt = HreflangAlternate::new("es-es", "https://www.example.es/").unwrap();
        entry.add_alternate(alt);
        assert_eq!(entry.alternates.len(), 2);
        assert_eq!(entry.alternates[0].hreflang, "de-de");
    }

    #[test]
    fn test_alternate_validation_names_missing_field() {
        assert!(matches!(
            HreflangAlternate::new("", "https://www.example.de/"),
            Err(SitemapError::MissingField { field: "hreflang" })
        ));
        assert!(matches!(
            HreflangAlternate::new("de-de", ""),
            Err(SitemapError::MissingField { field: "href" })
        ));
        assert!(matches!(
            HreflangAlternate::new("", ""),
            Err(SitemapError::AlternateIncomplete)
        ));
    }

    #[test]
    fn test_add_alternates_bulk() {
        let mut entry = UrlEntry::new("https://www.example.com/").unwrap();
        entry
            .add_alternates([
                ("de-de", "https://www.example.de/"),
                ("es-es", "https://www.example.es/"),
            ])
            .unwrap();
        assert_eq!(entry.alternates.len(), 2);
    }

    #[test]
    fn test_add_alternates_is_transactional() {
        let mut entry = UrlEntry::new("https://www.example.com/").unwrap();
        let result = entry.add_alternates([("de-de", "https://www.example.de/"), ("es-es", "")]);

        assert!(matches!(
            result,
            Err(SitemapError::MissingField { field: "href" })
        ));
        // The valid first pair must not have been applied.
        assert!(entry.alternates.is_empty());
    }

    #[test]
    fn test_add_image_both_forms() {
        let mut entry = UrlEntry::new("https://example.com/").unwrap();
        entry.add_image("https://example.com/hero.png").unwrap();
        entry
            .add_image(ImageEntry::new("https://example.com/logo.png").unwrap())
            .unwrap();

        assert_eq!(entry.images.len(), 2);
        assert_eq!(entry.images[0].loc, "https://example.com/hero.png");
    }

    #[test]
    fn test_empty_image_url_rejected() {
        let mut entry = UrlEntry::new("https://example.com/").unwrap();
        assert!(entry.add_image("").is_err());
        assert!(entry.images.is_empty());
    }

    #[test]
    fn test_index_entry() {
        let entry = IndexEntry::new("https://example.com/sitemap.xml")
            .unwrap()
            .lastmod("2025-12-01");
        assert_eq!(entry.lastmod.as_deref(), Some("2025-12-01"));
        assert!(IndexEntry::new("").is_err());
    }
}
