use crate::audit::{audit_page, link_host};
use crate::error::Result;
use crate::model::PageRecord;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use seoaudit_scanner::{FetchConfig, Fetcher, HttpFetcher};
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Options for configuring an audit run
pub struct AuditOptions {
    /// Domain that counts as internal (see [`root_domain_of`])
    pub root_domain: String,
    /// Number of pages fetched and audited at the same time
    pub concurrency: usize,
    pub show_progress_bars: bool,
}

impl AuditOptions {
    pub fn new(root_domain: impl Into<String>) -> Self {
        Self {
            root_domain: root_domain.into(),
            concurrency: DEFAULT_CONCURRENCY,
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting audit progress
pub type AuditProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Host of the sitemap URL, lower-cased, without `www.`.
pub fn root_domain_of(sitemap_url: &str) -> String {
    link_host(sitemap_url)
}

/// Shared HTTP fetcher with the default timeout and browser user agent.
pub fn default_fetcher() -> Result<Arc<dyn Fetcher>> {
    Ok(Arc::new(HttpFetcher::new(FetchConfig::default())?))
}

/// Fetch and audit every URL.
///
/// Pages are independent, so up to `concurrency` are in flight at once. The
/// returned records are in the same order as `urls`.
pub async fn execute_audit(
    urls: &[String],
    fetcher: Arc<dyn Fetcher>,
    options: AuditOptions,
    progress_callback: Option<AuditProgressCallback>,
) -> Vec<PageRecord> {
    let AuditOptions {
        root_domain,
        concurrency,
        show_progress_bars,
    } = options;

    let total = urls.len();
    info!("Auditing {} pages with {} workers", total, concurrency);

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    } else {
        None
    };

    let root_domain = root_domain.as_str();
    let progress_bar_ref = progress_bar.as_ref();
    let progress_callback_ref = progress_callback.as_ref();

    let records: Vec<PageRecord> = stream::iter(urls.iter().enumerate())
        .map(|(idx, url)| {
            let fetcher = fetcher.clone();
            async move {
                let message = format!("[{}/{}] Auditing: {}", idx + 1, total, url);
                match progress_bar_ref {
                    // Keep the line-per-page output on stdout even with a bar drawn
                    Some(pb) => pb.suspend(|| println!("{}", message)),
                    None => {
                        if let Some(callback) = progress_callback_ref {
                            callback(message);
                        }
                    }
                }

                let response = fetcher.fetch(url).await;
                let record = audit_page(url, &response, root_domain);

                if let Some(pb) = progress_bar_ref {
                    pb.inc(1);
                }
                record
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    info!("Audit complete. {} pages audited", records.len());
    records
}
