use colored::Colorize;
use commands::command_argument_builder;
use seoaudit::{AuditOutcome, init_tracing, run_audit};
use std::io::IsTerminal;
use std::path::PathBuf;
use url::Url;

mod commands;

#[tokio::main]
async fn main() {
    init_tracing();

    let matches = command_argument_builder().get_matches();
    // Both are guaranteed by clap: one is required, the other has a default
    let (Some(sitemap), Some(output)) = (
        matches.get_one::<Url>("sitemap"),
        matches.get_one::<PathBuf>("out"),
    ) else {
        return;
    };

    let show_progress_bars = std::io::stdout().is_terminal();

    match run_audit(sitemap, output, show_progress_bars).await {
        Ok(AuditOutcome::NoPages) => {}
        Ok(AuditOutcome::Written { summary, .. }) => {
            println!();
            print!("{}", summary);
        }
        Err(e) => {
            eprintln!("{} {:#}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
