//! Report bundles handed to the presentation layer.

use crate::analyzers::{AnalysisResult, SubjectClassifier, TranscriptAnalyzer};
use crate::error::Result;
use crate::normalizer::{NormalizedTranscript, normalize};
use crate::scale::GradingScale;
use crate::transcript::{SchoolInfo, StudentInfo, Transcript};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SCHEMA_VERSION: u8 = 1;
pub const ALGORITHM_VERSION: u8 = 1;

/// Everything the dashboard shows for one transcript.
#[derive(Debug, Serialize)]
pub struct TranscriptReport {
    pub schema_version: u8,
    pub algorithm_version: u8,
    pub generated_at: DateTime<Utc>,
    pub school_id: String,
    pub student_info: Option<StudentInfo>,
    pub school_info: Option<SchoolInfo>,
    pub normalized: NormalizedTranscript,
    pub analysis: AnalysisResult,
}

impl TranscriptReport {
    /// Normalizes and analyzes `transcript` under `scale`.
    pub fn build<C>(
        transcript: &Transcript,
        school_id: &str,
        scale: &GradingScale,
        analyzer: &TranscriptAnalyzer,
        classifier: &C,
    ) -> Result<Self>
    where
        C: SubjectClassifier + ?Sized,
    {
        let normalized = normalize(&transcript.academic_years, scale)?;
        let analysis = analyzer.analyze(&transcript.academic_years, &normalized, classifier)?;

        Ok(TranscriptReport {
            schema_version: SCHEMA_VERSION,
            algorithm_version: ALGORITHM_VERSION,
            generated_at: Utc::now(),
            school_id: school_id.to_string(),
            student_info: transcript.student_info.clone(),
            school_info: transcript.school_info.clone(),
            normalized,
            analysis,
        })
    }
}

/// One row of the transcript index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptIndexEntry {
    pub student: Option<String>,
    pub school_id: String,
    pub weighted_gpa: f64,
    pub unweighted_gpa: f64,
    pub normalized_gpa: f64,
    pub credits: f64,
}

impl TranscriptIndexEntry {
    pub fn new(transcript: &Transcript, school_id: &str, normalized: &NormalizedTranscript) -> Self {
        TranscriptIndexEntry {
            student: transcript.student_name().map(str::to_string),
            school_id: school_id.to_string(),
            weighted_gpa: normalized.cumulative.weighted,
            unweighted_gpa: normalized.cumulative.unweighted,
            normalized_gpa: normalized.normalized_gpa,
            credits: normalized.cumulative.credits,
        }
    }
}

/// Several transcripts ranked by normalized GPA, highest first.
#[derive(Debug, Serialize)]
pub struct TranscriptIndex {
    pub generated_at: DateTime<Utc>,
    pub transcripts: Vec<TranscriptIndexEntry>,
}

impl TranscriptIndex {
    pub fn new(mut entries: Vec<TranscriptIndexEntry>) -> Self {
        entries.sort_by(|a, b| b.normalized_gpa.total_cmp(&a.normalized_gpa));
        TranscriptIndex {
            generated_at: Utc::now(),
            transcripts: entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::SubjectTag;
    use crate::scale::{GradeMapping, NumericScale, plus_minus_letters};
    use crate::transcript::{AcademicYear, Course, Rigor};

    fn transcript(grade: &str) -> Transcript {
        Transcript {
            school_id: None,
            student_info: None,
            school_info: None,
            academic_years: vec![AcademicYear::new("9th Grade").with_course(
                Course::new("Biology", Rigor::Standard)
                    .with_term("Final", grade)
                    .with_credits(1.0),
            )],
        }
    }

    fn letter_scale() -> GradingScale {
        GradingScale::new("Letters", GradeMapping::Letter(plus_minus_letters()), []).unwrap()
    }

    fn subject(_: &Course) -> SubjectTag {
        "Science".into()
    }

    #[test]
    fn test_report_carries_versions_and_results() {
        let report = TranscriptReport::build(
            &transcript("A"),
            "flint-hill",
            &letter_scale(),
            &TranscriptAnalyzer::default(),
            &subject,
        )
        .unwrap();

        assert_eq!(report.schema_version, SCHEMA_VERSION);
        assert_eq!(report.school_id, "flint-hill");
        assert_eq!(report.normalized.normalized_gpa, 4.0);
        assert_eq!(report.analysis.curriculum[0].subject_name, "Science");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("generated_at").is_some());
        assert_eq!(json["analysis"]["course_counts"]["total_courses"], 1);
    }

    #[test]
    fn test_report_surfaces_engine_errors() {
        let result = TranscriptReport::build(
            &transcript("Z"),
            "flint-hill",
            &letter_scale(),
            &TranscriptAnalyzer::default(),
            &subject,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_index_sorted_by_normalized_gpa() {
        let letters = letter_scale();
        let numeric =
            GradingScale::new("Raw", GradeMapping::Numeric(NumericScale::standard()), []).unwrap();

        let b = transcript("B");
        let a = transcript("A");
        let raw = transcript("85");
        let entries = vec![
            TranscriptIndexEntry::new(&b, "letters", &normalize(&b.academic_years, &letters).unwrap()),
            TranscriptIndexEntry::new(&raw, "raw", &normalize(&raw.academic_years, &numeric).unwrap()),
            TranscriptIndexEntry::new(&a, "letters", &normalize(&a.academic_years, &letters).unwrap()),
        ];

        let index = TranscriptIndex::new(entries);
        let gpas: Vec<f64> = index.transcripts.iter().map(|e| e.normalized_gpa).collect();
        assert_eq!(gpas, vec![4.0, 3.0, 3.0]);
        assert_eq!(index.transcripts[0].school_id, "letters");
        // Native weighted GPA of the raw-score school stays on its own scale.
        assert!(index.transcripts.iter().any(|e| e.weighted_gpa == 85.0));
    }
}
