//! Site index (sitemap) data structures.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Crawler revisit hint for an index entry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Hourly,
    Daily,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
        }
    }
}

/// What an index entry points at.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Home,
    Track,
    Race,
}

impl EntryKind {
    pub fn change_frequency(&self) -> ChangeFrequency {
        match self {
            EntryKind::Home | EntryKind::Race => ChangeFrequency::Daily,
            EntryKind::Track => ChangeFrequency::Hourly,
        }
    }

    pub fn priority(&self) -> f32 {
        match self {
            EntryKind::Home => 1.0,
            EntryKind::Track => 0.8,
            EntryKind::Race => 0.9,
        }
    }
}

/// One absolute URL published in the site index.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IndexEntry {
    pub kind: EntryKind,
    pub loc: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

impl IndexEntry {
    pub fn new(kind: EntryKind, loc: String, last_modified: DateTime<Utc>) -> Self {
        Self {
            kind,
            loc,
            last_modified,
            change_frequency: kind.change_frequency(),
            priority: kind.priority(),
        }
    }
}

/// The published site index.
#[derive(Debug, Clone, Serialize, Default)]
pub struct SiteIndex {
    pub entries: Vec<IndexEntry>,
    /// Tracks whose schedule could not be fetched
    pub skipped_tracks: Vec<String>,
}

impl SiteIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    /// Render as a sitemaps.org `urlset` document.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in &self.entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry
                    .last_modified
                    .to_rfc3339_opts(SecondsFormat::Millis, true)
            ));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.change_frequency.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
