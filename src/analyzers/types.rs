//! Data types produced by the transcript analyzer.

use crate::transcript::Rigor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RigorCount {
    pub rigor: Rigor,
    pub count: usize,
}

/// Course count per rigor tier for one year. Tiers with no courses are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRigor {
    pub year: String,
    pub courses: Vec<RigorCount>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Improved,
    Declined,
}

/// A jump of at least one letter tier between adjacent graded terms of a course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeAnomaly {
    pub year: String,
    pub course: String,
    pub from_term: String,
    pub to_term: String,
    pub from_grade: String,
    pub to_grade: String,
    /// Letter equivalents on the 4.0 scale, useful for numeric schools.
    pub from_letter: &'static str,
    pub to_letter: &'static str,
    /// Signed change in 4.0-scale points.
    pub delta: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurriculumEntry {
    pub course_name: String,
    pub rigor: Rigor,
}

/// One subject's courses laid out by year; `courses_by_year[i]` belongs to year `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectCurriculum {
    pub subject_name: String,
    pub courses_by_year: Vec<Vec<CurriculumEntry>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CourseCounts {
    pub total_courses: usize,
    pub total_ap_courses: usize,
    pub total_honors_courses: usize,
    pub total_ib_courses: usize,
    pub post_ap_or_advanced_courses: usize,
    pub dual_enrollment_courses: usize,
    /// Pass/Fail courses as "Name (Grade)".
    pub notable_pass_fail: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Declining,
    Steady,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearDelta {
    pub from_year: String,
    pub to_year: String,
    /// Change in normalized GPA.
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    pub direction: Trend,
    pub year_over_year: Vec<YearDelta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStrength {
    pub subject: String,
    pub mean_normalized: f64,
    /// Population standard deviation of the normalized course values.
    pub spread: f64,
    pub graded_courses: usize,
    /// Courses above `Standard` rigor, graded or not.
    pub accelerated_courses: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcernKind {
    /// Graded course averaging below a D.
    LowGrade,
    /// A Pass/Fail outcome that was not a pass.
    Failed,
    Withdrawal,
    /// The same course name in more than one year.
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concern {
    pub kind: ConcernKind,
    pub course: String,
    pub years: Vec<String>,
    pub detail: String,
}

/// Presentation-ready analytics for one transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub rigor_progression: Vec<YearRigor>,
    pub grade_anomalies: Vec<GradeAnomaly>,
    pub curriculum: Vec<SubjectCurriculum>,
    pub course_counts: CourseCounts,
    pub trajectory: Trajectory,
    /// Strongest subject first.
    pub subject_strengths: Vec<SubjectStrength>,
    pub concerns: Vec<Concern>,
}
