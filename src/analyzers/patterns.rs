//! Transcript-wide heuristics: course counts, GPA trajectory, subject strengths.

use crate::analyzers::curriculum::SubjectTag;
use crate::analyzers::types::{CourseCounts, SubjectStrength, Trajectory, Trend, YearDelta};
use crate::normalizer::NormalizedTranscript;
use crate::transcript::{AcademicYear, Rigor};
use crate::utility::{mean, stddev};
use indexmap::IndexMap;

/// Year-over-year changes smaller than this count as flat.
pub const TREND_TOLERANCE: f64 = 0.01;

pub fn course_counts(years: &[AcademicYear]) -> CourseCounts {
    let mut counts = CourseCounts::default();

    for course in years.iter().flat_map(|y| &y.courses) {
        counts.total_courses += 1;
        match course.rigor {
            Rigor::Ap => counts.total_ap_courses += 1,
            Rigor::Honors => counts.total_honors_courses += 1,
            Rigor::Ib => counts.total_ib_courses += 1,
            Rigor::PostAp | Rigor::Advanced => counts.post_ap_or_advanced_courses += 1,
            Rigor::DualEnrollment => counts.dual_enrollment_courses += 1,
            Rigor::PassFail => {
                let entry = match course.term_grades.values().last() {
                    Some(grade) => format!("{} ({})", course.course_name, grade),
                    None => course.course_name.clone(),
                };
                counts.notable_pass_fail.push(entry);
            }
            Rigor::Standard => {}
        }
    }

    counts
}

/// Direction of the normalized GPA across consecutive years.
pub fn trajectory(normalized: &NormalizedTranscript) -> Trajectory {
    let year_over_year: Vec<YearDelta> = normalized
        .years
        .windows(2)
        .map(|pair| YearDelta {
            from_year: pair[0].year_label.clone(),
            to_year: pair[1].year_label.clone(),
            delta: pair[1].gpa.normalized - pair[0].gpa.normalized,
        })
        .collect();

    let rising = year_over_year.iter().any(|d| d.delta > TREND_TOLERANCE);
    let falling = year_over_year.iter().any(|d| d.delta < -TREND_TOLERANCE);

    let direction = match (rising, falling) {
        (false, false) => Trend::Steady,
        (true, false) => Trend::Rising,
        (false, true) => Trend::Declining,
        (true, true) => Trend::Mixed,
    };

    Trajectory {
        direction,
        year_over_year,
    }
}

/// Mean normalized value per subject, strongest first. Subjects without a
/// graded course are left out.
pub(crate) fn subject_strengths(
    years: &[AcademicYear],
    normalized: &NormalizedTranscript,
    subjects: &[Vec<SubjectTag>],
) -> Vec<SubjectStrength> {
    #[derive(Default)]
    struct Tally {
        values: Vec<f64>,
        accelerated: usize,
    }

    let mut tallies: IndexMap<&str, Tally> = IndexMap::new();

    for ((year, normalized_year), tags) in years.iter().zip(&normalized.years).zip(subjects) {
        for ((course, value), tag) in year.courses.iter().zip(&normalized_year.courses).zip(tags) {
            let tally = tallies.entry(tag.as_str()).or_default();
            if course.rigor.is_accelerated() {
                tally.accelerated += 1;
            }
            if let Some(values) = value.values {
                tally.values.push(values.normalized);
            }
        }
    }

    let mut strengths: Vec<SubjectStrength> = tallies
        .into_iter()
        .filter(|(_, t)| !t.values.is_empty())
        .map(|(subject, t)| {
            let avg = mean(&t.values);
            SubjectStrength {
                subject: subject.to_string(),
                mean_normalized: avg,
                spread: stddev(&t.values, avg),
                graded_courses: t.values.len(),
                accelerated_courses: t.accelerated,
            }
        })
        .collect();

    strengths.sort_by(|a, b| {
        b.mean_normalized
            .total_cmp(&a.mean_normalized)
            .then_with(|| a.subject.cmp(&b.subject))
    });
    strengths
}
