//! XML document -> model: namespace-resolving event loops over quick-xml.
//!
//! quick-xml performs no DTD processing and no external-entity
//! expansion, so hostile constructs (billion-laughs, XXE) cannot expand;
//! an undeclared entity reference simply fails the parse. Per-entry
//! omissions — a `<url>` block without a `<loc>` — are skipped rather
//! than failing the document, to tolerate partially malformed
//! real-world sitemaps.

use crate::error::Result;
use crate::sitemap::types::{
    HreflangAlternate, ImageEntry, IndexEntry, Sitemap, SitemapIndex, UrlEntry, IMAGE_NS,
    SITEMAP_NS, XHTML_NS,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Which element's text content the reader is currently inside.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    None,
    Loc,
    Lastmod,
    Changefreq,
    Priority,
    ImageLoc,
}

/// A `<url>` block being accumulated while its children stream past.
#[derive(Default)]
struct PendingUrl {
    loc: String,
    lastmod: Option<String>,
    changefreq: Option<String>,
    priority: Option<f32>,
    alternates: Vec<HreflangAlternate>,
    images: Vec<ImageEntry>,
    image_loc: String,
}

impl PendingUrl {
    fn assign(&mut self, field: Field, text: String) {
        match field {
            Field::Loc => self.loc = text,
            Field::Lastmod => self.lastmod = Some(text),
            Field::Changefreq => self.changefreq = Some(text),
            Field::Priority => match text.parse() {
                Ok(priority) => self.priority = Some(priority),
                Err(_) => debug!("ignoring non-numeric <priority>: {text}"),
            },
            Field::ImageLoc => self.image_loc = text,
            Field::None => {}
        }
    }

    /// Close out the block; entries without a `<loc>` are dropped.
    fn finish(&mut self) -> Option<UrlEntry> {
        let pending = std::mem::take(self);
        if pending.loc.is_empty() {
            warn!("skipping <url> block without <loc>");
            return None;
        }
        Some(UrlEntry {
            loc: pending.loc,
            lastmod: pending.lastmod,
            changefreq: pending.changefreq,
            priority: pending.priority,
            alternates: pending.alternates,
            images: pending.images,
        })
    }
}

/// Read an `<xhtml:link>` element's attributes into an alternate.
/// Links that are not `rel="alternate"` or are missing a part are
/// skipped like other per-entry omissions.
fn push_alternate(e: &BytesStart, pending: &mut PendingUrl) {
    let mut rel = String::new();
    let mut hreflang = String::new();
    let mut href = String::new();

    for attr in e.attributes().flatten() {
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => continue,
        };
        match attr.key.as_ref() {
            b"rel" => rel = value,
            b"hreflang" => hreflang = value,
            b"href" => href = value,
            _ => {}
        }
    }

    if !rel.is_empty() && rel != HreflangAlternate::REL {
        return;
    }
    if hreflang.is_empty() || href.is_empty() {
        debug!("skipping incomplete <xhtml:link> alternate");
        return;
    }
    pending.alternates.push(HreflangAlternate { hreflang, href });
}

impl Sitemap {
    /// Read a sitemap document from a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    /// Parse a sitemap document from an XML string.
    ///
    /// Walks every `<url>` element bound to the sitemaps.org namespace,
    /// in document order. A document that is not well-formed XML is an
    /// error; a `<url>` block without a `<loc>` is skipped.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut sitemap = Sitemap::new();
        let mut pending = PendingUrl::default();
        let mut in_url = false;
        let mut in_image = false;
        let mut field = Field::None;
        let mut buf = Vec::new();

        loop {
            match reader.read_resolved_event_into(&mut buf)? {
                (ResolveResult::Bound(Namespace(ns)), Event::Start(e)) => {
                    field = Field::None;
                    if ns == SITEMAP_NS.as_bytes() {
                        match e.local_name().as_ref() {
                            b"url" => {
                                pending = PendingUrl::default();
                                in_url = true;
                                in_image = false;
                            }
                            b"loc" if in_url && !in_image => field = Field::Loc,
                            b"lastmod" if in_url => field = Field::Lastmod,
                            b"changefreq" if in_url => field = Field::Changefreq,
                            b"priority" if in_url => field = Field::Priority,
                            _ => {}
                        }
                    } else if ns == IMAGE_NS.as_bytes() && in_url {
                        match e.local_name().as_ref() {
                            b"image" => {
                                in_image = true;
                                pending.image_loc.clear();
                            }
                            b"loc" if in_image => field = Field::ImageLoc,
                            _ => {}
                        }
                    } else if ns == XHTML_NS.as_bytes()
                        && in_url
                        && e.local_name().as_ref() == b"link"
                    {
                        push_alternate(&e, &mut pending);
                    }
                }
                (ResolveResult::Bound(Namespace(ns)), Event::Empty(e)) => {
                    if ns == XHTML_NS.as_bytes() && in_url && e.local_name().as_ref() == b"link" {
                        push_alternate(&e, &mut pending);
                    }
                }
                (ResolveResult::Bound(Namespace(ns)), Event::End(e)) => {
                    if ns == SITEMAP_NS.as_bytes() && e.local_name().as_ref() == b"url" {
                        if in_url {
                            if let Some(entry) = pending.finish() {
                                sitemap.urls.push(entry);
                            }
                            in_url = false;
                        }
                    } else if ns == IMAGE_NS.as_bytes() && e.local_name().as_ref() == b"image" {
                        if !pending.image_loc.is_empty() {
                            let loc = std::mem::take(&mut pending.image_loc);
                            pending.images.push(ImageEntry { loc });
                        }
                        in_image = false;
                    }
                    field = Field::None;
                }
                (_, Event::End(_)) => field = Field::None,
                (_, Event::Text(e)) => {
                    if in_url {
                        let text = e.unescape()?.to_string();
                        pending.assign(field, text);
                    }
                }
                (_, Event::CData(e)) => {
                    if in_url {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        pending.assign(field, text);
                    }
                }
                (_, Event::Eof) => break,
                _ => {}
            }
            buf.clear();
        }

        debug!("parsed sitemap with {} URLs", sitemap.urls.len());
        Ok(sitemap)
    }
}

impl SitemapIndex {
    /// Read a sitemap index document from a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let xml = fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }

    /// Parse a sitemap index document from an XML string.
    ///
    /// Walks every `<sitemap>` element bound to the sitemaps.org
    /// namespace; blocks without a `<loc>` are skipped.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut index = SitemapIndex::new();
        let mut in_entry = false;
        let mut loc = String::new();
        let mut lastmod: Option<String> = None;
        let mut field = Field::None;
        let mut buf = Vec::new();

        loop {
            match reader.read_resolved_event_into(&mut buf)? {
                (ResolveResult::Bound(Namespace(ns)), Event::Start(e))
                    if ns == SITEMAP_NS.as_bytes() =>
                {
                    field = Field::None;
                    match e.local_name().as_ref() {
                        b"sitemap" => {
                            in_entry = true;
                            loc.clear();
                            lastmod = None;
                        }
                        b"loc" if in_entry => field = Field::Loc,
                        b"lastmod" if in_entry => field = Field::Lastmod,
                        _ => {}
                    }
                }
                (ResolveResult::Bound(Namespace(ns)), Event::End(e))
                    if ns == SITEMAP_NS.as_bytes() && e.local_name().as_ref() == b"sitemap" =>
                {
                    if in_entry {
                        if loc.is_empty() {
                            warn!("skipping <sitemap> block without <loc>");
                        } else {
                            index.entries.push(IndexEntry {
                                loc: std::mem::take(&mut loc),
                                lastmod: lastmod.take(),
                            });
                        }
                        in_entry = false;
                    }
                    field = Field::None;
                }
                (_, Event::End(_)) => field = Field::None,
                (_, Event::Text(e)) => {
                    if in_entry {
                        let text = e.unescape()?.to_string();
                        match field {
                            Field::Loc => loc = text,
                            Field::Lastmod => lastmod = Some(text),
                            _ => {}
                        }
                    }
                }
                (_, Event::CData(e)) => {
                    if in_entry && field == Field::Loc {
                        loc = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    }
                }
                (_, Event::Eof) => break,
                _ => {}
            }
            buf.clear();
        }

        debug!("parsed sitemap index with {} entries", index.entries.len());
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
   <url>
      <loc>https://example.com/</loc>
      <lastmod>2025-10-25</lastmod>
      <changefreq>weekly</changefreq>
      <priority>0.9</priority>
   </url>
   <url>
      <loc>https://example.com/about/</loc>
   </url>
</urlset>"#;

    #[test]
    fn test_parse_basic_document() {
        let sitemap = Sitemap::from_xml(BASIC).unwrap();
        assert_eq!(sitemap.len(), 2);

        let first = &sitemap.urls[0];
        assert_eq!(first.loc, "https://example.com/");
        assert_eq!(first.lastmod.as_deref(), Some("2025-10-25"));
        assert_eq!(first.changefreq.as_deref(), Some("weekly"));
        assert_eq!(first.priority, Some(0.9));

        let second = &sitemap.urls[1];
        assert_eq!(second.loc, "https://example.com/about/");
        assert!(second.lastmod.is_none());
        assert!(second.priority.is_none());
    }

    #[test]
    fn test_url_without_loc_is_skipped() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
   <url>
      <lastmod>2025-10-25</lastmod>
   </url>
   <url>
      <loc>https://example.com/</loc>
   </url>
</urlset>"#;

        let sitemap = Sitemap::from_xml(xml).unwrap();
        assert_eq!(sitemap.len(), 1);
        assert_eq!(sitemap.urls[0].loc, "https://example.com/");
    }

    #[test]
    fn test_escaped_and_cdata_locs() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
   <url>
      <loc>https://example.com/?a=1&amp;b=2</loc>
   </url>
   <url>
      <loc><![CDATA[https://example.com/cdata/]]></loc>
   </url>
</urlset>"#;

        let sitemap = Sitemap::from_xml(xml).unwrap();
        assert_eq!(sitemap.urls[0].loc, "https://example.com/?a=1&b=2");
        assert_eq!(sitemap.urls[1].loc, "https://example.com/cdata/");
    }

    #[test]
    fn test_parse_alternates_and_images() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:xhtml="http://www.w3.org/1999/xhtml"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
   <url>
      <loc>https://www.example.com/</loc>
      <xhtml:link rel="alternate" hreflang="de-de" href="https://www.example.de/"/>
      <xhtml:link rel="alternate" hreflang="es-es" href="https://www.example.es/"/>
      <xhtml:link rel="alternate" href="https://missing-hreflang.example/"/>
      <image:image>
         <image:loc>https://example.com/hero.png</image:loc>
      </image:image>
   </url>
</urlset>"#;

        let sitemap = Sitemap::from_xml(xml).unwrap();
        let entry = &sitemap.urls[0];

        assert_eq!(entry.loc, "https://www.example.com/");
        assert_eq!(entry.alternates.len(), 2);
        assert_eq!(entry.alternates[0].hreflang, "de-de");
        assert_eq!(entry.alternates[1].href, "https://www.example.es/");
        assert_eq!(entry.images.len(), 1);
        assert_eq!(entry.images[0].loc, "https://example.com/hero.png");
    }

    #[test]
    fn test_image_loc_does_not_clobber_url_loc() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"
        xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
   <url>
      <loc>https://example.com/page/</loc>
      <image:image>
         <image:loc>https://example.com/img.png</image:loc>
      </image:image>
   </url>
</urlset>"#;

        let sitemap = Sitemap::from_xml(xml).unwrap();
        assert_eq!(sitemap.urls[0].loc, "https://example.com/page/");
        assert_eq!(sitemap.urls[0].images[0].loc, "https://example.com/img.png");
    }

    #[test]
    fn test_malformed_document_is_fatal() {
        assert!(Sitemap::from_xml("<urlset><url></urlset>").is_err());
    }

    #[test]
    fn test_undeclared_entity_is_fatal() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
   <url><loc>https://example.com/&xxe;</loc></url>
</urlset>"#;
        assert!(Sitemap::from_xml(xml).is_err());
    }

    #[test]
    fn test_doctype_is_ignored_not_expanded() {
        // A DTD may be present, but it is never fetched or expanded.
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE urlset SYSTEM "http://attacker.example/evil.dtd">
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
   <url><loc>https://example.com/</loc></url>
</urlset>"#;

        let sitemap = Sitemap::from_xml(xml).unwrap();
        assert_eq!(sitemap.len(), 1);
        assert_eq!(sitemap.urls[0].loc, "https://example.com/");
    }

    #[test]
    fn test_foreign_namespace_urls_are_not_walked() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<urlset xmlns="https://not-the-sitemap-namespace.example/">
   <url><loc>https://example.com/</loc></url>
</urlset>"#;

        let sitemap = Sitemap::from_xml(xml).unwrap();
        assert!(sitemap.is_empty());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitemap.xml");
        std::fs::write(&path, BASIC).unwrap();

        let sitemap = Sitemap::from_file(&path).unwrap();
        assert_eq!(sitemap.len(), 2);
        assert_eq!(sitemap.urls[0].loc, "https://example.com/");
    }

    #[test]
    fn test_from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Sitemap::from_file(dir.path().join("nope.xml"));
        assert!(matches!(result, Err(crate::SitemapError::Io(_))));
    }

    #[test]
    fn test_parse_index_document() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
   <sitemap>
      <loc>https://example.com/sitemap.xml</loc>
      <lastmod>2025-12-01</lastmod>
   </sitemap>
   <sitemap>
      <loc>https://example.com/posts-sitemap.xml</loc>
   </sitemap>
   <sitemap>
      <lastmod>2025-12-01</lastmod>
   </sitemap>
</sitemapindex>"#;

        let index = SitemapIndex::from_xml(xml).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.entries[0].loc, "https://example.com/sitemap.xml");
        assert_eq!(index.entries[0].lastmod.as_deref(), Some("2025-12-01"));
        assert!(index.entries[1].lastmod.is_none());
    }
}
