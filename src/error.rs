//! Error taxonomy for the normalization engine.

/// Errors returned by the registry, the normalizer and the analyzer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A scale is already registered under this school id.
    #[error("school '{0}' already has a registered grading scale")]
    DuplicateSchool(String),

    /// No scale is registered under this school id.
    #[error("no grading scale registered for school '{0}'")]
    UnknownSchool(String),

    /// The scale definition is internally inconsistent.
    #[error("invalid grading scale '{scale}': {reason}")]
    InvalidScale { scale: String, reason: String },

    /// A term grade falls outside the scale's domain.
    #[error("grade '{grade}' for {course} ({term}) does not resolve under the grading scale")]
    UnresolvedGrade {
        course: String,
        term: String,
        grade: String,
    },

    /// A year or the whole transcript has nothing to average.
    #[error("{scope} has no credit-bearing graded courses; GPA is undefined")]
    NoCreditBearingCourses { scope: String },

    /// A course record breaks the data model.
    #[error("invalid course '{course}': {reason}")]
    InvalidCourse { course: String, reason: String },

    /// The anomaly threshold is negative or not a number.
    #[error("anomaly threshold must be a finite number >= 0, got {0}")]
    InvalidThreshold(f64),

    /// The normalized transcript was not produced from the supplied transcript.
    #[error("normalized transcript does not match the transcript: {0}")]
    TranscriptMismatch(String),

    /// The transcript document could not be decoded.
    #[error("failed to parse transcript: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Error {
    /// Registry misuse and bad settings are setup bugs; everything else is
    /// bad input data.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::DuplicateSchool(_)
                | Error::UnknownSchool(_)
                | Error::InvalidScale { .. }
                | Error::InvalidThreshold(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
