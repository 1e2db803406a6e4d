pub mod audit;
pub mod error;
pub mod markup;
pub mod model;
pub mod report;
pub mod rules;
pub mod run;

use colored::Colorize;

pub use error::AuditError;
pub use model::{CanonicalStatus, LengthStatus, PageRecord, PageSignals, Severity};

pub fn print_banner(root_domain: &str) {
    println!(
        "{}",
        format!("--- Starting Audit for: {} ---", root_domain)
            .bright_white()
            .bold()
    );
}
