use crate::markup::{Markup, attr, text_of};
use crate::model::{CanonicalStatus, LengthStatus, PageRecord, PageSignals};
use crate::rules;
use seoaudit_scanner::FetchResponse;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

pub const THIN_CONTENT_THRESHOLD: usize = 300;
pub const TITLE_MIN_LEN: usize = 30;
pub const TITLE_MAX_LEN: usize = 60;
pub const DESC_MIN_LEN: usize = 50;
pub const DESC_MAX_LEN: usize = 160;

/// hrefs that are not navigation and are left out of every link count
const NON_LINK_PREFIXES: &[&str] = &["mailto:", "tel:", "javascript:"];

/// Audit one fetched page. Error statuses and empty bodies are not parsed and
/// get the all-missing record instead.
pub fn audit_page(url: &str, response: &FetchResponse, root_domain: &str) -> PageRecord {
    if response.is_error_page() {
        debug!(url, status = response.status, "page not auditable, using empty record");
        return PageRecord::unreachable(url.to_string(), response.status);
    }

    let signals = audit_html(url, &response.body, root_domain);
    if let Some(rule) = rules::first_match(response.status, &signals) {
        debug!(url, rule = rule.name, severity = %rule.severity, "page flagged");
    }

    PageRecord::new(url.to_string(), response.status, signals)
}

/// Extract every SEO signal from a page's markup.
pub fn audit_html(url: &str, html: &str, root_domain: &str) -> PageSignals {
    let markup = Markup::parse(html);

    let word_count = count_words(&markup.visible_text());

    let title = markup
        .find_first("title")
        .map(|title| text_of(&title))
        .unwrap_or_default();
    let title_len = title.chars().count();

    let meta_desc = markup
        .find_first_where("meta", |el| attr(el, "name") == Some("description"))
        .and_then(|el| attr(&el, "content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();
    let meta_desc_len = meta_desc.chars().count();

    let canonical_link = markup
        .find_first_where("link", |el| {
            attr(el, "rel")
                .is_some_and(|rel| rel.split_ascii_whitespace().any(|v| v == "canonical"))
        })
        .and_then(|el| attr(&el, "href"))
        .map(|href| href.trim().to_string())
        .unwrap_or_default();
    let canonical_status = canonical_status(&canonical_link, url);

    let links = LinkStats::collect(&markup, root_domain);

    PageSignals {
        word_count,
        is_thin_content: word_count < THIN_CONTENT_THRESHOLD,
        title_status: LengthStatus::classify(title_len, TITLE_MIN_LEN, TITLE_MAX_LEN),
        title,
        title_len,
        meta_desc_status: LengthStatus::classify(meta_desc_len, DESC_MIN_LEN, DESC_MAX_LEN),
        meta_desc,
        meta_desc_len,
        h1_count: markup.find_all("h1").count(),
        canonical_link,
        canonical_status,
        internal_links: links.internal,
        external_links: links.external,
        broken_anchors: links.broken_anchors,
        img_missing_alt: markup
            .find_all("img")
            .filter(|img| attr(img, "alt").is_none_or(str::is_empty))
            .count(),
    }
}

/// Tokens made of ASCII letters, digits and apostrophes.
pub fn count_words(text: &str) -> usize {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '\''))
        .filter(|token| !token.is_empty())
        .count()
}

pub fn strip_trailing_slashes(url: &str) -> &str {
    url.trim_end_matches('/')
}

pub fn canonical_status(canonical: &str, page_url: &str) -> CanonicalStatus {
    if canonical.is_empty() {
        CanonicalStatus::Missing
    } else if strip_trailing_slashes(canonical) == strip_trailing_slashes(page_url) {
        CanonicalStatus::SelfReferencing
    } else {
        CanonicalStatus::Other
    }
}

/// Lower-cased host of an href without a leading `www.`; empty for relative
/// links and anything else without a host.
pub fn link_host(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("http:{}", href)
    } else {
        href.to_string()
    };

    let host = match Url::parse(&absolute) {
        Ok(url) => url.host_str().map(str::to_lowercase).unwrap_or_default(),
        Err(_) => raw_authority_host(&absolute).unwrap_or_default(),
    };

    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// Host read straight out of `scheme://authority...` for absolute hrefs that
/// `Url` rejects (bad port, illegal characters). Userinfo and port are dropped.
fn raw_authority_host(href: &str) -> Option<String> {
    let (scheme, rest) = href.split_once("://")?;
    let valid_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return None;
    }

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    let host = match host_port.find(']') {
        Some(end) if host_port.starts_with('[') => &host_port[..=end],
        _ => host_port.split(':').next().unwrap_or_default(),
    };

    Some(host.to_lowercase())
}

pub fn is_internal_host(host: &str, root_domain: &str) -> bool {
    host.is_empty() || host == root_domain || host.ends_with(&format!(".{}", root_domain))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Empty, mailto:, tel: or javascript:
    Ignored,
    /// In-page `#fragment`
    Anchor { broken: bool },
    Internal,
    External,
}

pub fn classify_href(href: &str, ids: &HashSet<&str>, root_domain: &str) -> LinkKind {
    if href.is_empty() || NON_LINK_PREFIXES.iter().any(|prefix| href.starts_with(prefix)) {
        return LinkKind::Ignored;
    }

    if let Some(fragment) = href.strip_prefix('#') {
        return LinkKind::Anchor {
            broken: !fragment.is_empty() && !ids.contains(fragment),
        };
    }

    if is_internal_host(&link_host(href), root_domain) {
        LinkKind::Internal
    } else {
        LinkKind::External
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    pub internal: usize,
    pub external: usize,
    pub broken_anchors: usize,
}

impl LinkStats {
    pub fn collect(markup: &Markup, root_domain: &str) -> Self {
        let ids = markup.element_ids();
        let mut stats = Self::default();

        for anchor in markup.find_all("a") {
            let href = attr(&anchor, "href").unwrap_or_default();
            match classify_href(href, &ids, root_domain) {
                LinkKind::Internal => stats.internal += 1,
                LinkKind::External => stats.external += 1,
                LinkKind::Anchor { broken: true } => stats.broken_anchors += 1,
                LinkKind::Anchor { broken: false } | LinkKind::Ignored => {}
            }
        }

        stats
    }
}
