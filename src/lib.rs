// Statement Extractor - Core Library
// Parses a defined-contribution retirement statement into a structured
// record and renders it as a CSV table and a prose summary.

pub mod export;
pub mod extract;
pub mod pdf;
pub mod record;
pub mod summary;

// Re-export commonly used types
pub use export::{save_csv, save_summary, to_rows, DEFAULT_CSV_PATH, DEFAULT_SUMMARY_PATH};
pub use extract::{extract, extract_from_text};
pub use record::{sample_record, PlanEntry, StatementRecord};
pub use summary::generate_summary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
