use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown endpoint '{value}' (expected one of: {expected})")]
    InvalidEndpoint { value: String, expected: String },
    #[error("unknown event category '{value}'")]
    InvalidCategory { value: String },
    #[error("unknown follow-up status '{value}'")]
    InvalidStatus { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Reasons a single subject is left out of a batch.
///
/// These never abort the batch; they are collected into the batch report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SubjectError {
    #[error("subject {subject_id} has no enrollment date")]
    MissingEnrollmentDate { subject_id: String },
}

impl SubjectError {
    pub fn subject_id(&self) -> &str {
        match self {
            SubjectError::MissingEnrollmentDate { subject_id } => subject_id,
        }
    }
}
