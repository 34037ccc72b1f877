//! Transcript analytics.
//!
//! Consumes a transcript together with its normalized values and derives
//! rigor progression, term-over-term grade anomalies, a subject × year
//! curriculum grid, course counts, the GPA trajectory, subject strengths and
//! academic concerns.

pub mod analyzer;
pub mod anomaly;
pub mod concerns;
pub mod curriculum;
pub mod grade;
pub mod patterns;
pub mod rigor;
pub mod types;

pub use analyzer::{TranscriptAnalyzer, analyze};
pub use curriculum::{SubjectClassifier, SubjectTag};
pub use types::AnalysisResult;
