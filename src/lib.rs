//! Reporting engine for tree-planting and adoption pledges.
//!
//! Raw submissions are decoded into structured pledges, derived into
//! per-submission metrics, folded per contributor and summarized. Results can
//! be exported as quoted CSV or rendered into an XLSX workbook.

pub mod aggregate;
pub mod derive;
pub mod error;
pub mod export;
pub mod init;
pub mod model;
pub mod options;
pub mod pledge;
pub mod report;
pub mod snapshot;
pub mod store;
pub mod summary;

pub use aggregate::aggregate;
pub use derive::derive;
pub use error::{Error, Result};
pub use export::{ExportOptions, HEADER, to_row};
pub use model::{
    AggregatedPerson, ContributionFrequency, DerivedMetrics, DesignationTier, Status, Submission,
};
pub use snapshot::Snapshot;
pub use store::{CsvStore, MemoryStore, SubmissionStore};
pub use summary::{StatusFilter, SummaryTotals, summarize, summarize_with};
