//! Longitudinal follow-up engine.
//!
//! Snapshot tables are merged into one [`Timeline`](followup_model::Timeline)
//! per subject, events are extracted per time point and folded into
//! first-occurrence maps, and every subject gets an
//! [`OutcomeRecord`](followup_model::OutcomeRecord) for the selected endpoint.

pub mod assemble;
pub mod batch;
pub mod endpoint;
pub mod extract;
pub mod fields;
pub mod normalize;
pub mod processor;
pub mod resolve;
pub mod status;
pub mod summary;
pub mod time_point;

pub use assemble::{AssembledCohort, ResolvedTables, assemble_cohort, assemble_timeline, resolve_tables};
pub use batch::{BatchOutcome, process_tables, process_timelines};
pub use endpoint::{constituents, evaluate_endpoint};
pub use extract::extract_events;
pub use processor::{EvaluationContext, evaluate_timeline};
pub use resolve::{resolve_occurrences, resolve_procedures};
pub use status::classify_status;
pub use summary::{
    EndpointSummary, EventDistribution, category_breakdown, first_event_distribution,
    summarize_endpoints,
};
pub use time_point::parse_month_offset;
