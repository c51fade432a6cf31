//! CLI library components for the follow-up engine.

pub mod logging;
pub mod pipeline;
