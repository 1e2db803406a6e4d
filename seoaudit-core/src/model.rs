use crate::rules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length bucket shared by the title and the meta description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LengthStatus {
    #[default]
    Missing,
    TooShort,
    Ok,
    TooLong,
}

impl LengthStatus {
    /// Bucket a length against an inclusive `[min, max]` window. Zero is always `Missing`.
    pub fn classify(len: usize, min: usize, max: usize) -> Self {
        if len == 0 {
            LengthStatus::Missing
        } else if len < min {
            LengthStatus::TooShort
        } else if len > max {
            LengthStatus::TooLong
        } else {
            LengthStatus::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LengthStatus::Missing => "MISSING",
            LengthStatus::TooShort => "TOO_SHORT",
            LengthStatus::Ok => "OK",
            LengthStatus::TooLong => "TOO_LONG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CanonicalStatus {
    #[default]
    #[serde(rename = "MISSING")]
    Missing,
    /// Canonical points back at the audited URL
    #[serde(rename = "SELF")]
    SelfReferencing,
    #[serde(rename = "OTHER")]
    Other,
}

impl CanonicalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalStatus::Missing => "MISSING",
            CanonicalStatus::SelfReferencing => "SELF",
            CanonicalStatus::Other => "OTHER",
        }
    }
}

/// Ordered worst-first so that sorting ascending puts errors at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warn,
    Ok,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Ok => "OK",
        }
    }
}

impl fmt::Display for LengthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything extracted from one page's markup.
///
/// `Default` is the record used when a page could not be fetched: every
/// string empty, every status missing, every count zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageSignals {
    // Content
    pub word_count: usize,
    pub is_thin_content: bool,

    // Metadata
    pub title: String,
    pub title_len: usize,
    pub title_status: LengthStatus,
    pub meta_desc: String,
    pub meta_desc_len: usize,
    pub meta_desc_status: LengthStatus,

    // Technical
    pub h1_count: usize,
    pub canonical_link: String,
    pub canonical_status: CanonicalStatus,

    // Links
    pub internal_links: usize,
    pub external_links: usize,
    pub broken_anchors: usize,
    pub img_missing_alt: usize,
}

/// One audited page. Severity is derived on construction and cannot be set
/// on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    url: String,
    http_status: u16,
    signals: PageSignals,
    severity: Severity,
}

impl PageRecord {
    pub fn new(url: String, http_status: u16, signals: PageSignals) -> Self {
        let severity = rules::classify(http_status, &signals);
        Self {
            url,
            http_status,
            signals,
            severity,
        }
    }

    /// Record for a page whose fetch failed or returned an error status.
    pub fn unreachable(url: String, http_status: u16) -> Self {
        Self::new(url, http_status, PageSignals::default())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    pub fn signals(&self) -> &PageSignals {
        &self.signals
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_status_title_boundaries() {
        assert_eq!(LengthStatus::classify(0, 30, 60), LengthStatus::Missing);
        assert_eq!(LengthStatus::classify(1, 30, 60), LengthStatus::TooShort);
        assert_eq!(LengthStatus::classify(29, 30, 60), LengthStatus::TooShort);
        assert_eq!(LengthStatus::classify(30, 30, 60), LengthStatus::Ok);
        assert_eq!(LengthStatus::classify(60, 30, 60), LengthStatus::Ok);
        assert_eq!(LengthStatus::classify(61, 30, 60), LengthStatus::TooLong);
    }

    #[test]
    fn test_length_status_description_boundaries() {
        assert_eq!(LengthStatus::classify(49, 50, 160), LengthStatus::TooShort);
        assert_eq!(LengthStatus::classify(50, 50, 160), LengthStatus::Ok);
        assert_eq!(LengthStatus::classify(160, 50, 160), LengthStatus::Ok);
        assert_eq!(LengthStatus::classify(161, 50, 160), LengthStatus::TooLong);
    }

    #[test]
    fn test_severity_orders_worst_first() {
        let mut severities = vec![Severity::Ok, Severity::Error, Severity::Warn];
        severities.sort();
        assert_eq!(severities, vec![Severity::Error, Severity::Warn, Severity::Ok]);
    }

    #[test]
    fn test_display_matches_report_labels() {
        assert_eq!(LengthStatus::TooShort.to_string(), "TOO_SHORT");
        assert_eq!(CanonicalStatus::SelfReferencing.to_string(), "SELF");
        assert_eq!(Severity::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_unreachable_record_is_zeroed_error() {
        let record = PageRecord::unreachable("https://example.com/gone".to_string(), 404);

        assert_eq!(record.http_status(), 404);
        assert_eq!(record.signals(), &PageSignals::default());
        assert_eq!(record.signals().title_status, LengthStatus::Missing);
        assert_eq!(record.signals().canonical_status, CanonicalStatus::Missing);
        assert!(!record.signals().is_thin_content);
        assert_eq!(record.severity(), Severity::Error);
    }
}
