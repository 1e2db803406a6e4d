use crate::fetch::Fetcher;
use crate::xml::{XmlElement, parse_document};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type ProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// What a sitemap document declares itself to be, from its root element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    Index,
    UrlSet,
    Unknown,
}

impl SitemapKind {
    pub fn of(root: &XmlElement) -> Self {
        match root.name.to_lowercase().as_str() {
            "sitemapindex" => SitemapKind::Index,
            "urlset" => SitemapKind::UrlSet,
            _ => SitemapKind::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapEntry {
    /// Another sitemap document to fetch
    Sitemap(String),
    /// A page to audit
    Page(String),
}

/// Pull every usable `loc` out of a parsed sitemap, in document order.
///
/// Documents with an unrecognised root are scanned for `loc` anywhere in the
/// tree; anything ending in `.xml` is assumed to be another sitemap.
pub fn discover_entries(root: &XmlElement) -> Vec<SitemapEntry> {
    match SitemapKind::of(root) {
        SitemapKind::Index => child_locs(root, "sitemap")
            .map(SitemapEntry::Sitemap)
            .collect(),
        SitemapKind::UrlSet => child_locs(root, "url").map(SitemapEntry::Page).collect(),
        SitemapKind::Unknown => root
            .descendants_named("loc")
            .into_iter()
            .filter_map(loc_text)
            .map(|loc| {
                if loc.ends_with(".xml") {
                    SitemapEntry::Sitemap(loc)
                } else {
                    SitemapEntry::Page(loc)
                }
            })
            .collect(),
    }
}

fn child_locs<'a>(root: &'a XmlElement, entry_name: &'a str) -> impl Iterator<Item = String> + 'a {
    root.children_named(entry_name)
        .filter_map(|entry| entry.child("loc"))
        .filter_map(loc_text)
}

fn loc_text(loc: &XmlElement) -> Option<String> {
    let text = loc.text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Page URLs in first-seen order with duplicates dropped.
#[derive(Default)]
struct PageSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl PageSet {
    fn insert(&mut self, url: String) {
        if self.seen.insert(url.clone()) {
            self.ordered.push(url);
        }
    }
}

/// Flattens a tree of sitemap indexes and url sets into page URLs.
///
/// Work is a FIFO queue plus a visited set, so nesting depth is irrelevant and
/// a cycle of sitemaps referencing each other is fetched once per URL.
pub struct SitemapResolver {
    fetcher: Arc<dyn Fetcher>,
    progress_callback: Option<ProgressCallback>,
}

impl SitemapResolver {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Resolve `root_url` into a deduplicated list of page URLs.
    ///
    /// Unreachable or malformed sitemaps are reported and skipped; the result
    /// is whatever could be collected from the rest of the tree.
    pub async fn resolve(&self, root_url: &str) -> Vec<String> {
        info!("Resolving sitemap tree from {}", root_url);

        let mut queue = VecDeque::from([root_url.to_string()]);
        let mut visited: HashSet<String> = HashSet::new();
        let mut pages = PageSet::default();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }

            self.report(format!("Reading sitemap: {}...", current));
            let response = self.fetcher.fetch(&current).await;
            if !response.is_ok() {
                warn!(url = %current, status = response.status, "skipping sitemap, fetch failed");
                self.report(format!(
                    "  [!] Failed to fetch {} (Status: {})",
                    current, response.status
                ));
                continue;
            }

            let document = match parse_document(&response.body) {
                Ok(document) => document,
                Err(e) => {
                    warn!(url = %current, error = %e, "skipping sitemap, not valid XML");
                    self.report(format!("  [!] Invalid XML in {}", current));
                    continue;
                }
            };

            let entries = discover_entries(&document);
            debug!(
                url = %current,
                kind = ?SitemapKind::of(&document),
                entries = entries.len(),
                "sitemap parsed"
            );

            for entry in entries {
                match entry {
                    SitemapEntry::Sitemap(nested) => {
                        if !visited.contains(&nested) {
                            queue.push_back(nested);
                        }
                    }
                    SitemapEntry::Page(page) => pages.insert(page),
                }
            }
        }

        info!(
            "Sitemap resolution complete. {} sitemaps read, {} pages found",
            visited.len(),
            pages.ordered.len()
        );
        pages.ordered
    }

    fn report(&self, message: String) {
        if let Some(ref callback) = self.progress_callback {
            callback(message);
        }
    }
}
