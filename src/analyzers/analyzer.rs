use crate::analyzers::anomaly::{DEFAULT_ANOMALY_THRESHOLD, detect_anomalies};
use crate::analyzers::concerns::detect_concerns;
use crate::analyzers::curriculum::{SubjectClassifier, classify_all, group_by_subject};
use crate::analyzers::patterns::{course_counts, subject_strengths, trajectory};
use crate::analyzers::rigor::rigor_progression;
use crate::analyzers::types::AnalysisResult;
use crate::error::{Error, Result};
use crate::normalizer::NormalizedTranscript;
use crate::transcript::AcademicYear;

/// Derives presentation analytics from a transcript and its normalized values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranscriptAnalyzer {
    anomaly_threshold: f64,
}

impl Default for TranscriptAnalyzer {
    fn default() -> Self {
        TranscriptAnalyzer {
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
        }
    }
}

impl TranscriptAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum point change between adjacent terms that counts as an anomaly.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidThreshold`] for a negative or non-finite threshold.
    pub fn with_anomaly_threshold(mut self, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(Error::InvalidThreshold(threshold));
        }
        self.anomaly_threshold = threshold;
        Ok(self)
    }

    pub fn anomaly_threshold(&self) -> f64 {
        self.anomaly_threshold
    }

    /// Runs every analysis pass.
    ///
    /// # Errors
    ///
    /// [`Error::TranscriptMismatch`] if `normalized` was not computed from `years`.
    pub fn analyze<C>(
        &self,
        years: &[AcademicYear],
        normalized: &NormalizedTranscript,
        classifier: &C,
    ) -> Result<AnalysisResult>
    where
        C: SubjectClassifier + ?Sized,
    {
        check_alignment(years, normalized)?;

        let subjects = classify_all(years, classifier);

        Ok(AnalysisResult {
            rigor_progression: rigor_progression(years),
            grade_anomalies: detect_anomalies(normalized, self.anomaly_threshold),
            curriculum: group_by_subject(years, &subjects),
            course_counts: course_counts(years),
            trajectory: trajectory(normalized),
            subject_strengths: subject_strengths(years, normalized, &subjects),
            concerns: detect_concerns(normalized),
        })
    }
}

/// Analyzes with the default one-tier anomaly threshold.
pub fn analyze<C>(
    years: &[AcademicYear],
    normalized: &NormalizedTranscript,
    classifier: &C,
) -> Result<AnalysisResult>
where
    C: SubjectClassifier + ?Sized,
{
    TranscriptAnalyzer::default().analyze(years, normalized, classifier)
}

fn check_alignment(years: &[AcademicYear], normalized: &NormalizedTranscript) -> Result<()> {
    if years.len() != normalized.years.len() {
        return Err(Error::TranscriptMismatch(format!(
            "{} years supplied, {} normalized",
            years.len(),
            normalized.years.len()
        )));
    }

    for (year, normalized_year) in years.iter().zip(&normalized.years) {
        if year.year_label != normalized_year.year_label
            || year.courses.len() != normalized_year.courses.len()
        {
            return Err(Error::TranscriptMismatch(format!(
                "year '{}' differs from normalized year '{}'",
                year.year_label, normalized_year.year_label
            )));
        }
        let renamed = year
            .courses
            .iter()
            .zip(&normalized_year.courses)
            .find(|(c, v)| c.course_name != v.course_name);
        if let Some((course, _)) = renamed {
            return Err(Error::TranscriptMismatch(format!(
                "course '{}' in '{}' has no normalized counterpart",
                course.course_name, year.year_label
            )));
        }
    }

    Ok(())
}
