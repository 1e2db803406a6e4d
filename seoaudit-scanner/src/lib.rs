pub mod error;
pub mod fetch;
pub mod result;
pub mod sitemap;
pub mod xml;

pub use error::ScanError;
pub use fetch::{FetchConfig, Fetcher, HttpFetcher};
pub use result::FetchResponse;
pub use sitemap::{ProgressCallback, SitemapEntry, SitemapKind, SitemapResolver};
