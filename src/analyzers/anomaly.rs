use crate::analyzers::grade::letter_for;
use crate::analyzers::types::{Direction, GradeAnomaly};
use crate::normalizer::NormalizedTranscript;

/// One letter tier on the plus/minus scale.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 0.3;

// Tier steps like 4.0 -> 3.7 come out a hair under 0.3 in binary.
const TOLERANCE: f64 = 1e-9;

/// Flags adjacent graded terms of the same course whose points differ by at
/// least `threshold`. Pass-marked terms are skipped, so the comparison is
/// between consecutive graded terms in declared order.
pub fn detect_anomalies(normalized: &NormalizedTranscript, threshold: f64) -> Vec<GradeAnomaly> {
    let mut anomalies = Vec::new();

    for (year, course) in normalized.courses() {
        let graded: Vec<_> = course.graded_terms().collect();

        for pair in graded.windows(2) {
            let ((from, from_points), (to, to_points)) = (pair[0], pair[1]);
            let delta = to_points - from_points;
            if delta == 0.0 || delta.abs() + TOLERANCE < threshold {
                continue;
            }

            anomalies.push(GradeAnomaly {
                year: year.year_label.clone(),
                course: course.course_name.clone(),
                from_term: from.term.clone(),
                to_term: to.term.clone(),
                from_grade: from.grade.clone(),
                to_grade: to.grade.clone(),
                from_letter: letter_for(from_points),
                to_letter: letter_for(to_points),
                delta,
                direction: if delta > 0.0 {
                    Direction::Improved
                } else {
                    Direction::Declined
                },
            });
        }
    }

    anomalies
}
