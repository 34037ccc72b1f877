//! Output of the normalizer.

use crate::transcript::Rigor;
use serde::Serialize;

/// One term grade with its 4.0-scale value. `points` is `None` for pass marks
/// and for every term of a `Pass/Fail` course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermValue {
    pub term: String,
    pub grade: String,
    pub points: Option<f64>,
}

/// Grade-point values of a graded course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseValues {
    /// Mean term points on the 4.0 reference scale, no bonus.
    pub unweighted: f64,
    /// Mean term value on the school's own scale (raw score for numeric schools).
    pub native_unweighted: f64,
    /// `native_unweighted` plus the school's rigor bonus.
    pub weighted: f64,
    /// `unweighted` plus the reference-scale bonus, capped at 4.3.
    pub normalized: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseValue {
    pub course_name: String,
    pub rigor: Rigor,
    pub credits: Option<f64>,
    pub terms: Vec<TermValue>,
    /// `None` for `Pass/Fail` courses and courses with only pass-marked terms.
    pub values: Option<CourseValues>,
}

impl CourseValue {
    pub fn is_graded(&self) -> bool {
        self.values.is_some()
    }

    /// Graded and carrying a positive credit weight.
    pub fn counts_toward_gpa(&self) -> bool {
        self.is_graded() && self.credits.is_some_and(|c| c > 0.0)
    }

    /// Term values that carry points, in declared order.
    pub fn graded_terms(&self) -> impl Iterator<Item = (&TermValue, f64)> {
        self.terms
            .iter()
            .filter_map(|t| t.points.map(|p| (t, p)))
    }
}

/// Credit-weighted averages over a set of courses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpaSummary {
    /// Native scale, no bonus.
    pub unweighted: f64,
    /// Native scale, with bonus.
    pub weighted: f64,
    /// Common reference scale.
    pub normalized: f64,
    /// Credits that went into the averages.
    pub credits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedYear {
    pub year_label: String,
    /// GPA printed on the transcript, kept for side-by-side display.
    pub reported_gpa: Option<f64>,
    pub courses: Vec<CourseValue>,
    pub gpa: GpaSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTranscript {
    /// Name of the grading scale the values were computed under.
    pub scale: String,
    pub years: Vec<NormalizedYear>,
    pub cumulative: GpaSummary,
    /// Cumulative GPA on the common 0.0–4.3 scale, comparable across schools.
    pub normalized_gpa: f64,
}

impl NormalizedTranscript {
    /// Every course value with the year it belongs to, in transcript order.
    pub fn courses(&self) -> impl Iterator<Item = (&NormalizedYear, &CourseValue)> {
        self.years
            .iter()
            .flat_map(|y| y.courses.iter().map(move |c| (y, c)))
    }
}
