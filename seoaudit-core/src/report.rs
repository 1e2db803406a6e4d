// Report generation for audited pages

use crate::error::Result;
use crate::model::{CanonicalStatus, LengthStatus, PageRecord, Severity};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const DEFAULT_REPORT_PATH: &str = "technical_audit.csv";

pub const CSV_HEADERS: [&str; 18] = [
    "severity",
    "http_status",
    "url",
    "title_status",
    "title_len",
    "title",
    "meta_desc_status",
    "meta_desc_len",
    "meta_desc",
    "canonical_status",
    "canonical_link",
    "h1_count",
    "word_count",
    "is_thin_content",
    "internal_links",
    "external_links",
    "broken_anchors",
    "img_missing_alt",
];

/// One CSV line. Field order is the column order.
#[derive(Serialize)]
struct CsvRow<'a> {
    severity: Severity,
    http_status: u16,
    url: &'a str,
    title_status: LengthStatus,
    title_len: usize,
    title: &'a str,
    meta_desc_status: LengthStatus,
    meta_desc_len: usize,
    meta_desc: &'a str,
    canonical_status: CanonicalStatus,
    canonical_link: &'a str,
    h1_count: usize,
    word_count: usize,
    is_thin_content: u8,
    internal_links: usize,
    external_links: usize,
    broken_anchors: usize,
    img_missing_alt: usize,
}

impl<'a> From<&'a PageRecord> for CsvRow<'a> {
    fn from(record: &'a PageRecord) -> Self {
        let s = record.signals();
        Self {
            severity: record.severity(),
            http_status: record.http_status(),
            url: record.url(),
            title_status: s.title_status,
            title_len: s.title_len,
            title: &s.title,
            meta_desc_status: s.meta_desc_status,
            meta_desc_len: s.meta_desc_len,
            meta_desc: &s.meta_desc,
            canonical_status: s.canonical_status,
            canonical_link: &s.canonical_link,
            h1_count: s.h1_count,
            word_count: s.word_count,
            is_thin_content: u8::from(s.is_thin_content),
            internal_links: s.internal_links,
            external_links: s.external_links,
            broken_anchors: s.broken_anchors,
            img_missing_alt: s.img_missing_alt,
        }
    }
}

/// ERROR first, then WARN, then OK. Stable, so ties keep discovery order.
pub fn sort_by_severity(records: &mut [PageRecord]) {
    records.sort_by_key(|record| record.severity());
}

pub fn write_csv<W: Write>(records: &[PageRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for record in records {
        csv_writer.serialize(CsvRow::from(record))?;
    }
    csv_writer.flush()?;

    Ok(())
}

pub fn save_csv_report(records: &[PageRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(records, file)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub error: usize,
    pub warn: usize,
    pub ok: usize,
}

impl SeverityCounts {
    pub fn from_records(records: &[PageRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut counts, record| {
                match record.severity() {
                    Severity::Error => counts.error += 1,
                    Severity::Warn => counts.warn += 1,
                    Severity::Ok => counts.ok += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.error + self.warn + self.ok
    }
}

/// Terminal summary printed after the CSV is written.
pub fn generate_summary(records: &[PageRecord], output_path: &Path) -> String {
    let counts = SeverityCounts::from_records(records);
    let thin = records.iter().filter(|r| r.signals().is_thin_content).count();
    let fetch_failures = records.iter().filter(|r| r.http_status() == 0).count();
    let broken_anchors: usize = records.iter().map(|r| r.signals().broken_anchors).sum();
    let img_missing_alt: usize = records.iter().map(|r| r.signals().img_missing_alt).sum();

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages audited: {}\n", counts.total()));
    report.push_str(&format!("  {}  {}\n", "ERROR".red().bold(), counts.error));
    report.push_str(&format!("  {}   {}\n", "WARN".yellow().bold(), counts.warn));
    report.push_str(&format!("  {}     {}\n", "OK".green().bold(), counts.ok));
    report.push('\n');
    report.push_str(&format!("  Thin content pages: {}\n", thin));
    report.push_str(&format!("  Fetch failures: {}\n", fetch_failures));
    report.push_str(&format!("  Broken anchors: {}\n", broken_anchors));
    report.push_str(&format!("  Images missing alt: {}\n", img_missing_alt));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str(&format!("\nDone! Report saved to {}\n", output_path.display()));

    report
}
