// Severity cascade.
//
// Rules are checked top to bottom and the first one that matches decides the
// severity. Indexability problems come before content-quality problems, which
// come before a clean page.

use crate::model::{CanonicalStatus, LengthStatus, PageSignals, Severity};

pub struct Rule {
    pub name: &'static str,
    pub severity: Severity,
    matches: fn(u16, &PageSignals) -> bool,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "http_error",
        severity: Severity::Error,
        matches: |status, _| status >= 400,
    },
    Rule {
        name: "missing_h1",
        severity: Severity::Error,
        matches: |_, s| s.h1_count == 0,
    },
    Rule {
        name: "missing_canonical",
        severity: Severity::Error,
        matches: |_, s| s.canonical_status == CanonicalStatus::Missing,
    },
    Rule {
        name: "missing_title",
        severity: Severity::Error,
        matches: |_, s| s.title_status == LengthStatus::Missing,
    },
    Rule {
        name: "thin_content",
        severity: Severity::Warn,
        matches: |_, s| s.is_thin_content,
    },
    Rule {
        name: "meta_description_length",
        severity: Severity::Warn,
        matches: |_, s| s.meta_desc_status != LengthStatus::Ok,
    },
    Rule {
        name: "title_length",
        severity: Severity::Warn,
        matches: |_, s| s.title_status != LengthStatus::Ok,
    },
    Rule {
        name: "broken_anchors",
        severity: Severity::Warn,
        matches: |_, s| s.broken_anchors > 0,
    },
    Rule {
        name: "images_missing_alt",
        severity: Severity::Warn,
        matches: |_, s| s.img_missing_alt > 0,
    },
];

/// The first rule that fires, if any.
pub fn first_match(http_status: u16, signals: &PageSignals) -> Option<&'static Rule> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(http_status, signals))
}

pub fn classify(http_status: u16, signals: &PageSignals) -> Severity {
    first_match(http_status, signals)
        .map(|rule| rule.severity)
        .unwrap_or(Severity::Ok)
}
