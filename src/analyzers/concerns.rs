//! Academic concerns: failing grades, withdrawals and repeated courses.

use crate::analyzers::grade::letter_for;
use crate::analyzers::types::{Concern, ConcernKind};
use crate::normalizer::NormalizedTranscript;
use indexmap::IndexMap;

/// Marks recording a withdrawal instead of a grade.
pub const WITHDRAWAL_MARKS: &[&str] = &["W", "WP", "WF", "Withdrawn"];

/// Pass/Fail outcomes that mean the course was not passed.
pub const FAILED_MARKS: &[&str] = &["Fail", "NP", "NC"];

fn is_one_of(marks: &[&str], grade: &str) -> bool {
    let grade = grade.trim();
    marks.iter().any(|m| m.eq_ignore_ascii_case(grade))
}

/// Flags graded courses averaging below a D, failed or withdrawn marks, and
/// course names taken in more than one year. Course concerns come in
/// transcript order, repeats last.
pub fn detect_concerns(normalized: &NormalizedTranscript) -> Vec<Concern> {
    let mut concerns = Vec::new();
    let mut seen: IndexMap<String, (String, Vec<String>)> = IndexMap::new();

    for (year, course) in normalized.courses() {
        let concern = |kind, detail: String| Concern {
            kind,
            course: course.course_name.clone(),
            years: vec![year.year_label.clone()],
            detail,
        };

        if let Some(values) = course.values {
            let letter = letter_for(values.unweighted);
            if matches!(letter, "D-" | "F") {
                concerns.push(concern(
                    ConcernKind::LowGrade,
                    format!("{letter} average ({:.2} points)", values.unweighted),
                ));
            }
        }

        for term in &course.terms {
            if is_one_of(WITHDRAWAL_MARKS, &term.grade) {
                concerns.push(concern(
                    ConcernKind::Withdrawal,
                    format!("{} recorded for {}", term.grade.trim(), term.term),
                ));
            } else if is_one_of(FAILED_MARKS, &term.grade) {
                concerns.push(concern(
                    ConcernKind::Failed,
                    format!("{} recorded for {}", term.grade.trim(), term.term),
                ));
            }
        }

        let (_, years) = seen
            .entry(course.course_name.trim().to_lowercase())
            .or_insert_with(|| (course.course_name.clone(), Vec::new()));
        if !years.contains(&year.year_label) {
            years.push(year.year_label.clone());
        }
    }

    for (_, (course, years)) in seen {
        if years.len() > 1 {
            concerns.push(Concern {
                kind: ConcernKind::Repeated,
                detail: format!("taken in {} years", years.len()),
                course,
                years,
            });
        }
    }

    concerns
}
