//! Model -> XML document: quick-xml writer with a 3-space indent.
//!
//! Documents are rendered fully in memory and written with a single
//! filesystem call, so a write either fully succeeds or surfaces the
//! I/O error; partial output is never reported as success.

use crate::error::Result;
use crate::sitemap::types::{
    HreflangAlternate, Sitemap, SitemapIndex, IMAGE_NS, SITEMAP_NS, XHTML_NS,
};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Default output filename for sitemap documents.
pub const SITEMAP_FILENAME: &str = "sitemap.xml";

/// Default output filename for sitemap index documents.
pub const SITEMAP_INDEX_FILENAME: &str = "sitemap-index.xml";

/// Write `<name>text</name>`, escaping the text content.
fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn indented_writer() -> Writer<Vec<u8>> {
    Writer::new_with_indent(Vec::new(), b' ', 3)
}

impl Sitemap {
    /// Render the sitemap as a complete XML document.
    ///
    /// The root `<urlset>` declares the sitemaps.org namespace; the
    /// `xhtml` and `image` prefixes are declared only when at least one
    /// entry actually carries alternates or images.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = indented_writer();
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut urlset = BytesStart::new("urlset");
        urlset.push_attribute(("xmlns", SITEMAP_NS));
        if self.urls.iter().any(|u| !u.alternates.is_empty()) {
            urlset.push_attribute(("xmlns:xhtml", XHTML_NS));
        }
        if self.urls.iter().any(|u| !u.images.is_empty()) {
            urlset.push_attribute(("xmlns:image", IMAGE_NS));
        }
        writer.write_event(Event::Start(urlset))?;

        for entry in &self.urls {
            writer.write_event(Event::Start(BytesStart::new("url")))?;

            write_text_element(&mut writer, "loc", &entry.loc)?;
            if let Some(lastmod) = &entry.lastmod {
                write_text_element(&mut writer, "lastmod", lastmod)?;
            }
            if let Some(changefreq) = &entry.changefreq {
                write_text_element(&mut writer, "changefreq", changefreq)?;
            }
            if let Some(priority) = entry.priority {
                write_text_element(&mut writer, "priority", &priority.to_string())?;
            }

            for alternate in &entry.alternates {
                let mut link = BytesStart::new("xhtml:link");
                link.push_attribute(("rel", HreflangAlternate::REL));
                link.push_attribute(("hreflang", alternate.hreflang.as_str()));
                link.push_attribute(("href", alternate.href.as_str()));
                writer.write_event(Event::Empty(link))?;
            }

            for image in &entry.images {
                writer.write_event(Event::Start(BytesStart::new("image:image")))?;
                write_text_element(&mut writer, "image:loc", &image.loc)?;
                writer.write_event(Event::End(BytesEnd::new("image:image")))?;
            }

            writer.write_event(Event::End(BytesEnd::new("url")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("urlset")))?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    /// Write the document to `path`, failing with an I/O error rather
    /// than reporting partial output as success.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let xml = self.to_xml_string()?;
        fs::write(&path, xml)?;
        debug!(
            "wrote sitemap with {} URLs to {}",
            self.urls.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Write to `sitemap.xml` in the current working directory.
    pub fn write_to_default_file(&self) -> Result<()> {
        self.write_to_file(SITEMAP_FILENAME)
    }
}

impl SitemapIndex {
    /// Render the index as a complete XML document with a
    /// `<sitemapindex>` root.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut writer = indented_writer();
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut root = BytesStart::new("sitemapindex");
        root.push_attribute(("xmlns", SITEMAP_NS));
        writer.write_event(Event::Start(root))?;

        for entry in &self.entries {
            writer.write_event(Event::Start(BytesStart::new("sitemap")))?;
            write_text_element(&mut writer, "loc", &entry.loc)?;
            if let Some(lastmod) = &entry.lastmod {
                write_text_element(&mut writer, "lastmod", lastmod)?;
            }
            writer.write_event(Event::End(BytesEnd::new("sitemap")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("sitemapindex")))?;
        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }

    /// Write the document to `path`, failing with an I/O error rather
    /// than reporting partial output as success.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let xml = self.to_xml_string()?;
        fs::write(&path, xml)?;
        debug!(
            "wrote sitemap index with {} entries to {}",
            self.entries.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Write to `sitemap-index.xml` in the current working directory.
    pub fn write_to_default_file(&self) -> Result<()> {
        self.write_to_file(SITEMAP_INDEX_FILENAME)
    }
}
