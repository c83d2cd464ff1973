//! Construction, mutation, and query operations on sitemap collections.

use crate::error::Result;
use crate::sitemap::types::{IndexEntry, IndexInput, Sitemap, SitemapIndex, UrlEntry, UrlInput};
use regex::Regex;
use std::collections::HashSet;

impl Sitemap {
    /// Create an empty sitemap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sitemap from raw URL strings, pre-built entries, or a mix.
    ///
    /// An empty iterator yields an empty sitemap.
    pub fn from_list<I, T>(urls: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<UrlInput>,
    {
        let mut sitemap = Self::new();
        for url in urls {
            sitemap.add_url(url)?;
        }
        Ok(sitemap)
    }

    /// Append a page URL or pre-built entry; returns the sitemap for
    /// chaining.
    pub fn add_url(&mut self, url: impl Into<UrlInput>) -> Result<&mut Self> {
        self.urls.push(url.into().into_entry()?);
        Ok(self)
    }

    /// Remove every entry whose `loc` equals `loc` exactly. No-op when
    /// nothing matches.
    pub fn remove_url(&mut self, loc: &str) -> &mut Self {
        self.urls.retain(|entry| entry.loc != loc);
        self
    }

    /// Return the entries whose `loc` contains a match for the regular
    /// expression `pattern`, in current order. Does not mutate the
    /// sitemap; a malformed pattern is an error.
    pub fn urls_by_pattern(&self, pattern: &str) -> Result<Vec<&UrlEntry>> {
        let re = Regex::new(pattern)?;
        Ok(self.urls.iter().filter(|e| re.is_match(&e.loc)).collect())
    }

    /// Keep only the first occurrence of each distinct `loc`, preserving
    /// the relative order of retained entries.
    pub fn deduplicate(&mut self) -> &mut Self {
        let mut seen = HashSet::new();
        self.urls.retain(|entry| seen.insert(entry.loc.clone()));
        self
    }

    /// Overwrite `lastmod` on every entry with the given date string.
    pub fn set_all_lastmod(&mut self, date: impl Into<String>) -> &mut Self {
        let date = date.into();
        for entry in &mut self.urls {
            entry.lastmod = Some(date.clone());
        }
        self
    }

    /// Overwrite `lastmod` on every entry with today's local calendar
    /// date. The date is resolved once and applied identically to all
    /// entries.
    pub fn set_all_lastmod_to_today(&mut self) -> &mut Self {
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        self.set_all_lastmod(today)
    }

    /// Number of contained entries.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Iterate over entries in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, UrlEntry> {
        self.urls.iter()
    }
}

impl<'a> IntoIterator for &'a Sitemap {
    type Item = &'a UrlEntry;
    type IntoIter = std::slice::Iter<'a, UrlEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.urls.iter()
    }
}

impl SitemapIndex {
    /// Create an empty sitemap index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from child-sitemap URLs, pre-built entries, or a
    /// mix. An empty iterator yields an empty index.
    pub fn from_list<I, T>(sitemaps: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<IndexInput>,
    {
        let mut index = Self::new();
        for sitemap in sitemaps {
            index.add_sitemap(sitemap)?;
        }
        Ok(index)
    }

    /// Append a child sitemap reference; returns the index for chaining.
    pub fn add_sitemap(&mut self, sitemap: impl Into<IndexInput>) -> Result<&mut Self> {
        self.entries.push(sitemap.into().into_entry()?);
        Ok(self)
    }

    /// Remove every entry whose `loc` equals `loc` exactly. No-op when
    /// nothing matches.
    pub fn remove_sitemap(&mut self, loc: &str) -> &mut Self {
        self.entries.retain(|entry| entry.loc != loc);
        self
    }

    /// Number of contained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, IndexEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a SitemapIndex {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
