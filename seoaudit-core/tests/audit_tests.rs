// Tests for page signal extraction and severity

use seoaudit_core::audit::{audit_html, audit_page};
use seoaudit_core::model::{CanonicalStatus, LengthStatus, PageRecord, Severity};
use seoaudit_scanner::FetchResponse;

const URL: &str = "https://example.com/guide/";
const DOMAIN: &str = "example.com";
const GOOD_TITLE: &str = "The Complete Guide to Technical SEO Audits";

fn filler(words: usize) -> String {
    (0..words)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn good_description() -> String {
    "A practical walkthrough of every check a technical SEO audit should run on a page.".to_string()
}

/// A page that passes every rule unless a caller swaps a piece out.
struct PageBuilder {
    title: Option<String>,
    description: Option<String>,
    canonical: Option<String>,
    h1: bool,
    words: usize,
    extra_body: String,
}

impl PageBuilder {
    fn clean() -> Self {
        Self {
            title: Some(GOOD_TITLE.to_string()),
            description: Some(good_description()),
            canonical: Some(URL.to_string()),
            h1: true,
            words: 350,
            extra_body: String::new(),
        }
    }

    fn build(&self) -> String {
        let mut head = String::new();
        if let Some(ref title) = self.title {
            head.push_str(&format!("<title>{}</title>", title));
        }
        if let Some(ref description) = self.description {
            head.push_str(&format!(r#"<meta name="description" content="{}">"#, description));
        }
        if let Some(ref canonical) = self.canonical {
            head.push_str(&format!(r#"<link rel="canonical" href="{}">"#, canonical));
        }

        let mut body = String::new();
        if self.h1 {
            body.push_str("<h1>Guide</h1>");
        }
        body.push_str(&format!("<p>{}</p>", filler(self.words)));
        body.push_str(&self.extra_body);

        format!(
            "<!DOCTYPE html><html><head>{}</head><body>{}</body></html>",
            head, body
        )
    }

    fn record(&self) -> PageRecord {
        audit_page(URL, &FetchResponse::new(200, self.build()), DOMAIN)
    }
}

// ============================================================================
// Clean page
// ============================================================================

#[test]
fn test_clean_page_is_ok() {
    let record = PageBuilder::clean().record();
    let s = record.signals();

    assert_eq!(record.http_status(), 200);
    assert_eq!(s.title, GOOD_TITLE);
    assert_eq!(s.title_len, 42);
    assert_eq!(s.title_status, LengthStatus::Ok);
    assert_eq!(s.meta_desc_status, LengthStatus::Ok);
    assert_eq!(s.canonical_status, CanonicalStatus::SelfReferencing);
    assert_eq!(s.h1_count, 1);
    assert!(!s.is_thin_content);
    assert_eq!(record.severity(), Severity::Ok);
}

// ============================================================================
// Title
// ============================================================================

#[test]
fn test_title_29_chars_is_too_short() {
    let mut page = PageBuilder::clean();
    page.title = Some("A Great Guide to Blue Widgets".to_string());

    let record = page.record();
    assert_eq!(record.signals().title_len, 29);
    assert_eq!(record.signals().title_status, LengthStatus::TooShort);
    assert_eq!(record.severity(), Severity::Warn);
}

#[test]
fn test_title_30_chars_is_ok() {
    let mut page = PageBuilder::clean();
    page.title = Some("A Great Guide to Blue Widgets!".to_string());

    let record = page.record();
    assert_eq!(record.signals().title_len, 30);
    assert_eq!(record.signals().title_status, LengthStatus::Ok);
    assert_eq!(record.severity(), Severity::Ok);
}

#[test]
fn test_title_boundaries_60_and_61() {
    let mut page = PageBuilder::clean();

    page.title = Some("t".repeat(60));
    assert_eq!(page.record().signals().title_status, LengthStatus::Ok);

    page.title = Some("t".repeat(61));
    let record = page.record();
    assert_eq!(record.signals().title_status, LengthStatus::TooLong);
    assert_eq!(record.severity(), Severity::Warn);
}

#[test]
fn test_title_is_trimmed_and_counted_in_characters() {
    let mut page = PageBuilder::clean();
    page.title = Some(format!("   {}   ", "é".repeat(30)));

    let record = page.record();
    assert_eq!(record.signals().title, "é".repeat(30));
    assert_eq!(record.signals().title_len, 30);
    assert_eq!(record.signals().title_status, LengthStatus::Ok);
}

#[test]
fn test_missing_title_is_error() {
    let mut page = PageBuilder::clean();
    page.title = None;

    let record = page.record();
    assert_eq!(record.signals().title, "");
    assert_eq!(record.signals().title_status, LengthStatus::Missing);
    assert_eq!(record.severity(), Severity::Error);
}

// ============================================================================
// Meta description
// ============================================================================

#[test]
fn test_description_boundaries() {
    let mut page = PageBuilder::clean();

    for (len, expected) in [
        (49, LengthStatus::TooShort),
        (50, LengthStatus::Ok),
        (160, LengthStatus::Ok),
        (161, LengthStatus::TooLong),
    ] {
        page.description = Some("d".repeat(len));
        let record = page.record();
        assert_eq!(record.signals().meta_desc_len, len);
        assert_eq!(record.signals().meta_desc_status, expected, "length {}", len);
    }
}

#[test]
fn test_description_content_is_trimmed() {
    let mut page = PageBuilder::clean();
    page.description = Some(format!("  {}  ", good_description()));

    let record = page.record();
    assert_eq!(record.signals().meta_desc, good_description());
}

#[test]
fn test_description_name_match_is_case_sensitive() {
    let mut page = PageBuilder::clean();
    page.description = None;
    page.extra_body = String::new();
    let html = page.build().replace(
        "<head>",
        &format!(r#"<head><meta name="Description" content="{}">"#, good_description()),
    );

    let record = audit_page(URL, &FetchResponse::new(200, html), DOMAIN);
    assert_eq!(record.signals().meta_desc, "");
    assert_eq!(record.signals().meta_desc_status, LengthStatus::Missing);
    assert_eq!(record.severity(), Severity::Warn);
}

// ============================================================================
// Canonical
// ============================================================================

#[test]
fn test_canonical_without_trailing_slash_is_self() {
    let mut page = PageBuilder::clean();
    page.canonical = Some("https://example.com/guide".to_string());

    assert_eq!(
        page.record().signals().canonical_status,
        CanonicalStatus::SelfReferencing
    );
}

#[test]
fn test_canonical_pointing_elsewhere_is_other() {
    let mut page = PageBuilder::clean();
    page.canonical = Some("https://example.com/guides/seo".to_string());

    let record = page.record();
    assert_eq!(record.signals().canonical_link, "https://example.com/guides/seo");
    assert_eq!(record.signals().canonical_status, CanonicalStatus::Other);
    assert_eq!(record.severity(), Severity::Ok);
}

#[test]
fn test_missing_canonical_is_error() {
    let mut page = PageBuilder::clean();
    page.canonical = None;

    let record = page.record();
    assert_eq!(record.signals().canonical_status, CanonicalStatus::Missing);
    assert_eq!(record.severity(), Severity::Error);
}

#[test]
fn test_empty_canonical_href_is_missing() {
    let mut page = PageBuilder::clean();
    page.canonical = Some("   ".to_string());

    assert_eq!(
        page.record().signals().canonical_status,
        CanonicalStatus::Missing
    );
}

// ============================================================================
// Headings and content
// ============================================================================

#[test]
fn test_missing_h1_is_error_even_with_other_issues() {
    let mut page = PageBuilder::clean();
    page.h1 = false;
    page.words = 10;
    page.extra_body = r##"<img src="a.png"><a href="#gone">x</a>"##.to_string();

    let record = page.record();
    assert_eq!(record.signals().h1_count, 0);
    assert_eq!(record.severity(), Severity::Error);
}

#[test]
fn test_multiple_h1_are_counted() {
    let mut page = PageBuilder::clean();
    page.extra_body = "<section><h1>Second</h1></section><h1>Third</h1>".to_string();

    assert_eq!(page.record().signals().h1_count, 3);
}

#[test]
fn test_thin_content_threshold() {
    let body = |words| format!("<html><body><p>{}</p></body></html>", filler(words));

    let signals = audit_html(URL, &body(299), DOMAIN);
    assert_eq!(signals.word_count, 299);
    assert!(signals.is_thin_content);

    let signals = audit_html(URL, &body(300), DOMAIN);
    assert_eq!(signals.word_count, 300);
    assert!(!signals.is_thin_content);
}

#[test]
fn test_thin_content_is_warn() {
    let mut page = PageBuilder::clean();
    page.words = 50;

    let record = page.record();
    assert!(record.signals().is_thin_content);
    assert_eq!(record.severity(), Severity::Warn);
}

#[test]
fn test_script_text_is_not_counted() {
    let html = format!(
        "<html><head><script>{}</script></head><body><p>one two three</p></body></html>",
        filler(500)
    );
    assert_eq!(audit_html(URL, &html, DOMAIN).word_count, 3);
}

#[test]
fn test_noscript_markup_is_not_counted_as_words() {
    let html = concat!(
        "<html><body><p>one two</p>",
        r#"<noscript><img src="pixel.gif" alt="tracking pixel"></noscript>"#,
        "</body></html>"
    );
    let signals = audit_html(URL, html, DOMAIN);

    assert_eq!(signals.word_count, 2);
    // The pixel is markup, not an image element on the page
    assert_eq!(signals.img_missing_alt, 0);
}

// ============================================================================
// Links, anchors and images
// ============================================================================

#[test]
fn test_broken_anchor_counted_once() {
    let mut page = PageBuilder::clean();
    page.extra_body = r##"<a href="#section1">Jump</a><a href="#">Top</a>"##.to_string();

    let record = page.record();
    assert_eq!(record.signals().broken_anchors, 1);
    assert_eq!(record.severity(), Severity::Warn);
}

#[test]
fn test_anchor_to_existing_id_is_not_broken() {
    let mut page = PageBuilder::clean();
    page.extra_body = r##"<a href="#section1">Jump</a><div id="section1">here</div>"##.to_string();

    assert_eq!(page.record().signals().broken_anchors, 0);
}

#[test]
fn test_link_classification() {
    let mut page = PageBuilder::clean();
    page.extra_body = r#"
        <a href="/pricing">relative</a>
        <a href="https://example.com/about">same</a>
        <a href="https://www.example.com/team">www</a>
        <a href="https://blog.example.com/post">subdomain</a>
        <a href="https://other.org/">external</a>
        <a href="//cdn.thirdparty.net/file">protocol relative</a>
        <a href="mailto:hi@example.com">mail</a>
        <a href="tel:+15555550100">call</a>
        <a href="javascript:void(0)">js</a>
        <a href="">empty</a>
        <a>no href</a>
    "#
    .to_string();

    let record = page.record();
    assert_eq!(record.signals().internal_links, 4);
    assert_eq!(record.signals().external_links, 2);
    assert_eq!(record.signals().broken_anchors, 0);
}

#[test]
fn test_absolute_links_with_unparseable_authority_are_external() {
    let mut page = PageBuilder::clean();
    page.extra_body = r#"
        <a href="https://other.org:99999/x">bad port</a>
        <a href="https://other org/x">space in host</a>
        <a href="https://example.com:99999/x">own host, bad port</a>
    "#
    .to_string();

    let record = page.record();
    assert_eq!(record.signals().internal_links, 1);
    assert_eq!(record.signals().external_links, 2);
}

#[test]
fn test_images_missing_alt_only_issue_is_warn() {
    let mut page = PageBuilder::clean();
    page.extra_body = r#"
        <img src="a.png">
        <img src="b.png" alt="">
        <img src="c.png">
        <img src="d.png" alt="A diagram">
    "#
    .to_string();

    let record = page.record();
    assert_eq!(record.signals().img_missing_alt, 3);
    assert_eq!(record.severity(), Severity::Warn);
}

// ============================================================================
// Fetch outcomes
// ============================================================================

#[test]
fn test_404_gives_empty_error_record() {
    let record = audit_page(URL, &FetchResponse::new(404, "Not Found".to_string()), DOMAIN);
    let s = record.signals();

    assert_eq!(record.http_status(), 404);
    assert_eq!(record.url(), URL);
    assert_eq!(s.title, "");
    assert_eq!(s.meta_desc, "");
    assert_eq!(s.canonical_link, "");
    assert_eq!(s.title_status, LengthStatus::Missing);
    assert_eq!(s.meta_desc_status, LengthStatus::Missing);
    assert_eq!(s.canonical_status, CanonicalStatus::Missing);
    assert_eq!(s.word_count, 0);
    assert!(!s.is_thin_content);
    assert_eq!(record.severity(), Severity::Error);
}

#[test]
fn test_server_error_with_perfect_html_is_error() {
    let page = PageBuilder::clean();
    let signals = audit_html(URL, &page.build(), DOMAIN);

    let record = PageRecord::new(URL.to_string(), 500, signals);
    assert_eq!(record.severity(), Severity::Error);
}

#[test]
fn test_transport_failure_is_error() {
    let record = audit_page(URL, &FetchResponse::failed(), DOMAIN);
    assert_eq!(record.http_status(), 0);
    assert_eq!(record.severity(), Severity::Error);
}
