pub mod handlers;

pub use handlers::{AuditOutcome, init_tracing, root_domain, run_audit};
