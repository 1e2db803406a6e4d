use seoaudit_scanner::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scanner error: {0}")]
    Scan(#[from] ScanError),
}

pub type Result<T> = std::result::Result<T, AuditError>;
