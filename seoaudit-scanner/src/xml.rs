// Minimal element tree for sitemap documents.
//
// Only element names, text and nesting are kept. Names are stored without any
// namespace prefix so `<sm:loc>`, `<loc xmlns="...">` and `<loc>` all look the
// same to the sitemap logic.

use crate::error::{Result, ScanError};
use quick_xml::Reader;
use quick_xml::events::Event;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// First direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Every element below this one with the given name, in document order.
    /// The element itself is never included.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        let mut stack: Vec<&XmlElement> = self.children.iter().rev().collect();

        while let Some(element) = stack.pop() {
            if element.name == name {
                found.push(element);
            }
            stack.extend(element.children.iter().rev());
        }

        found
    }
}

/// Parse a whole document into its root element.
pub fn parse_document(xml: &str) -> Result<XmlElement> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut open: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                ensure_no_root(&root, &open)?;
                open.push(XmlElement::new(local_name(e.local_name().as_ref())));
            }
            Event::Empty(e) => {
                ensure_no_root(&root, &open)?;
                let element = XmlElement::new(local_name(e.local_name().as_ref()));
                close_element(&mut open, &mut root, element);
            }
            Event::End(_) => {
                let element = open.pop().ok_or_else(|| {
                    ScanError::MalformedXml("closing tag without opening tag".into())
                })?;
                close_element(&mut open, &mut root, element);
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                append_text(&mut open, &text)?;
            }
            Event::CData(e) => {
                let raw = e.into_inner();
                append_text(&mut open, &String::from_utf8_lossy(&raw))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(ScanError::MalformedXml(format!(
            "unclosed element <{}>",
            unclosed.name
        )));
    }

    root.ok_or_else(|| ScanError::MalformedXml("document has no root element".into()))
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn ensure_no_root(root: &Option<XmlElement>, open: &[XmlElement]) -> Result<()> {
    if open.is_empty() && root.is_some() {
        return Err(ScanError::MalformedXml("junk after document element".into()));
    }
    Ok(())
}

fn close_element(open: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn append_text(open: &mut [XmlElement], text: &str) -> Result<()> {
    match open.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ScanError::MalformedXml("text outside of the root element".into())),
    }
}
