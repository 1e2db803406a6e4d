use anyhow::Context;
use seoaudit_core::model::PageRecord;
use seoaudit_core::print_banner;
use seoaudit_core::report::{generate_summary, save_csv_report, sort_by_severity};
use seoaudit_core::run::{AuditOptions, default_fetcher, execute_audit, root_domain_of};
use seoaudit_scanner::{ProgressCallback, SitemapResolver};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

/// What a finished run produced.
#[derive(Debug)]
pub enum AuditOutcome {
    /// The sitemap tree yielded no page URLs, nothing was written
    NoPages,
    Written {
        records: Vec<PageRecord>,
        summary: String,
    },
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Domain that page links are compared against to count internal links.
pub fn root_domain(sitemap: &Url) -> String {
    root_domain_of(sitemap.as_str())
}

fn stdout_progress() -> ProgressCallback {
    Arc::new(|message: String| println!("{}", message))
}

/// Resolve the sitemap, audit every page and write the CSV report.
///
/// Progress goes to stdout as it happens. Only the report write (or failing to
/// build the HTTP client) is an error; unreachable sitemaps and pages are not.
pub async fn run_audit(
    sitemap: &Url,
    output: &Path,
    show_progress_bars: bool,
) -> anyhow::Result<AuditOutcome> {
    let domain = root_domain(sitemap);
    print_banner(&domain);

    let fetcher = default_fetcher().context("Failed to build HTTP client")?;

    let resolver =
        SitemapResolver::new(fetcher.clone()).with_progress_callback(stdout_progress());
    let urls = resolver.resolve(sitemap.as_str()).await;

    if urls.is_empty() {
        println!("No page URLs found. Check your sitemap format.");
        return Ok(AuditOutcome::NoPages);
    }

    println!("Found {} pages to audit.", urls.len());

    let mut options = AuditOptions::new(domain);
    options.show_progress_bars = show_progress_bars;
    let progress = (!show_progress_bars).then(stdout_progress);

    let mut records = execute_audit(&urls, fetcher, options, progress).await;
    sort_by_severity(&mut records);

    save_csv_report(&records, output)
        .with_context(|| format!("Failed to write report to {}", output.display()))?;
    info!("Report written to {}", output.display());

    let summary = generate_summary(&records, output);
    Ok(AuditOutcome::Written { records, summary })
}
