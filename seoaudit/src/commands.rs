use crate::CLAP_STYLING;
use clap::arg;
use seoaudit_core::report::DEFAULT_REPORT_PATH;
use std::path::PathBuf;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("seoaudit")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("seoaudit")
        .about("Audit every page listed in a sitemap for common technical SEO problems")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-s --"sitemap" <URL>)
                .required(true)
                .help("URL of the root sitemap or sitemap index")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-o --"out" <PATH>)
                .required(false)
                .help("Where to write the CSV report")
                .default_value(DEFAULT_REPORT_PATH)
                .value_parser(clap::value_parser!(PathBuf)),
        )
}
