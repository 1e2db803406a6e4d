// Thin query layer over scraper's HTML tree.
//
// The auditor only ever needs "elements with this tag name", attribute lookup
// and text, so everything goes through tag-name filtering rather than CSS
// selectors. Tag names from html5ever are already lower-case.

use scraper::{ElementRef, Html};
use std::collections::HashSet;

/// Elements whose text content never renders.
const HIDDEN_TEXT_PARENTS: &[&str] = &["script", "style"];

pub struct Markup {
    document: Html,
}

impl Markup {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.elements().filter(move |element| element.value().name() == tag)
    }

    pub fn find_first<'a>(&'a self, tag: &'a str) -> Option<ElementRef<'a>> {
        self.find_all(tag).next()
    }

    pub fn find_first_where<'a, P>(
        &'a self,
        tag: &'a str,
        mut predicate: P,
    ) -> Option<ElementRef<'a>>
    where
        P: FnMut(&ElementRef<'a>) -> bool,
    {
        self.find_all(tag).find(|element| predicate(element))
    }

    /// Every non-empty `id` in the document.
    pub fn element_ids(&self) -> HashSet<&str> {
        self.elements()
            .filter_map(|element| element.value().id())
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// All rendered text nodes joined with single spaces, whitespace collapsed.
    pub fn visible_text(&self) -> String {
        let mut pieces = Vec::new();
        collect_visible_text(&self.document, &mut pieces);
        normalize_space(&pieces.join(" "))
    }

    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
    }
}

/// The parser runs with scripting enabled, so `<noscript>` content is a single
/// raw text node holding markup. That markup is parsed again and only its text kept.
fn collect_visible_text(document: &Html, pieces: &mut Vec<String>) {
    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let text: &str = text;
        let parent = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()));

        match parent {
            Some(name) if HIDDEN_TEXT_PARENTS.contains(&name) => {}
            Some("noscript") => collect_visible_text(&Html::parse_fragment(text), pieces),
            _ => pieces.push(text.to_string()),
        }
    }
}

pub fn attr<'a>(element: &ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

/// Text of an element with each text node trimmed and glued together.
pub fn text_of(element: &ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
        <html>
          <head>
            <title> Widgets </title>
            <meta name="Description" content="wrong case">
            <meta name="description" content="right one">
            <style>body { color: red; }</style>
            <script>var hidden = "do not count";</script>
          </head>
          <body>
            <h1 id="top">Hello   there</h1>
            <div id="">empty id</div>
            <section id="details"><p>Some <b>bold</b> text</p></section>
          </body>
        </html>"#;

    #[test]
    fn test_find_first_and_all() {
        let markup = Markup::parse(PAGE);
        assert_eq!(markup.find_all("meta").count(), 2);
        assert_eq!(markup.find_first("title").map(|t| text_of(&t)), Some("Widgets".to_string()));
        assert!(markup.find_first("h2").is_none());
    }

    #[test]
    fn test_find_first_where_matches_attribute_exactly() {
        let markup = Markup::parse(PAGE);
        let meta = markup
            .find_first_where("meta", |el| attr(el, "name") == Some("description"))
            .unwrap();
        assert_eq!(attr(&meta, "content"), Some("right one"));
    }

    #[test]
    fn test_element_ids_skip_empty() {
        let markup = Markup::parse(PAGE);
        let ids = markup.element_ids();
        assert!(ids.contains("top"));
        assert!(ids.contains("details"));
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_visible_text_skips_script_and_style() {
        let markup = Markup::parse(PAGE);
        let text = markup.visible_text();
        assert!(text.contains("Hello there"));
        assert!(text.contains("Some bold text"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("color"));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_visible_text_reads_noscript_as_markup() {
        let markup = Markup::parse(
            r#"<html><body><p>one two</p>
            <noscript><img src="pixel.gif" alt="tracking pixel"></noscript>
            <noscript><p>Please <b>enable</b> JavaScript</p></noscript>
            </body></html>"#,
        );
        let text = markup.visible_text();
        assert_eq!(text, "one two Please enable JavaScript");
    }

    #[test]
    fn test_normalize_space() {
        assert_eq!(normalize_space("  a \n\t b  c "), "a b c");
        assert_eq!(normalize_space("   "), "");
    }
}
