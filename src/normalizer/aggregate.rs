use crate::normalizer::types::{CourseValue, GpaSummary};
use crate::utility::weighted_mean;

/// Credit-weighted GPA over the courses that count toward it.
///
/// Ungraded courses and courses without positive credits are left out of
/// both numerator and denominator. Returns `None` when nothing counts.
pub(crate) fn summarize<'a, I>(courses: I) -> Option<GpaSummary>
where
    I: IntoIterator<Item = &'a CourseValue>,
{
    let mut unweighted = Vec::new();
    let mut weighted = Vec::new();
    let mut normalized = Vec::new();
    let mut credits = 0.0;

    for course in courses {
        if !course.counts_toward_gpa() {
            continue;
        }
        let (Some(values), Some(weight)) = (course.values, course.credits) else {
            continue;
        };

        unweighted.push((values.native_unweighted, weight));
        weighted.push((values.weighted, weight));
        normalized.push((values.normalized, weight));
        credits += weight;
    }

    Some(GpaSummary {
        unweighted: weighted_mean(&unweighted)?,
        weighted: weighted_mean(&weighted)?,
        normalized: weighted_mean(&normalized)?,
        credits,
    })
}
