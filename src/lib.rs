//! GPA normalization engine for transcript evaluation.
//!
//! Register each school's [`GradingScale`] in a [`GradingScaleRegistry`],
//! run [`normalize`] over a transcript's academic years, then hand the
//! transcript and its [`NormalizedTranscript`] to [`analyze`] for
//! presentation-ready analytics.

pub mod analyzers;
pub mod error;
pub mod normalizer;
pub mod output;
pub mod parser;
pub mod report;
pub mod scale;
pub mod transcript;
pub mod utility;

pub use analyzers::{AnalysisResult, SubjectClassifier, SubjectTag, TranscriptAnalyzer, analyze};
pub use error::{Error, Result};
pub use normalizer::{GpaNormalizer, NormalizedTranscript, normalize};
pub use scale::{GradeMapping, GradingScale, GradingScaleRegistry, NumericBand, NumericScale};
pub use transcript::{AcademicYear, Course, Rigor, Transcript};
