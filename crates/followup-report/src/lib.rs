//! Output sink for follow-up results.
//!
//! Outcome records are flattened into a fixed column layout and written as:
//!
//! - **CSV**: the full outcome table, one row per subject
//! - **JSON**: the same rows as an array of objects
//! - **Survival CSV**: the reduced dataset used for time-to-event models

mod columns;
mod flat;
mod writer;

pub use columns::{OUTCOME_COLUMNS, SURVIVAL_COLUMNS};
pub use flat::{FlatRecord, ReportValue, flatten_outcome};
pub use writer::{
    OutputFormat, OutputPaths, detect_patient_group, write_outcomes_csv, write_outcomes_json, write_survival_csv,
};
