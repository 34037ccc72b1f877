use crate::error::{Error, Result};
use crate::normalizer::types::{CourseValue, CourseValues, TermValue};
use crate::scale::{GradingScale, NORMALIZED_CEILING, ResolvedGrade};
use crate::transcript::{Course, Rigor};
use crate::utility::mean;

fn validate(course: &Course) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidCourse {
        course: course.course_name.clone(),
        reason: reason.to_string(),
    };

    if course.course_name.trim().is_empty() {
        return Err(invalid("course name is empty"));
    }
    if course.term_grades.is_empty() {
        return Err(invalid("no term grades"));
    }
    if let Some(credits) = course.credits_earned {
        if !credits.is_finite() || credits < 0.0 {
            return Err(invalid("credits must be a non-negative number"));
        }
    }
    Ok(())
}

/// Resolves one course's term grades and derives its grade-point values.
pub(crate) fn normalize_course(course: &Course, scale: &GradingScale) -> Result<CourseValue> {
    validate(course)?;

    let mut terms = Vec::with_capacity(course.term_grades.len());
    let mut native = Vec::new();
    let mut points = Vec::new();

    for (term, grade) in &course.term_grades {
        let resolved = if course.rigor == Rigor::PassFail {
            ResolvedGrade::PassMark
        } else {
            scale.resolve(grade).ok_or_else(|| Error::UnresolvedGrade {
                course: course.course_name.clone(),
                term: term.clone(),
                grade: grade.clone(),
            })?
        };

        let term_points = match resolved {
            ResolvedGrade::Graded {
                native: n,
                points: p,
            } => {
                native.push(n);
                points.push(p);
                Some(p)
            }
            ResolvedGrade::PassMark => None,
        };

        terms.push(TermValue {
            term: term.clone(),
            grade: grade.clone(),
            points: term_points,
        });
    }

    let values = (!points.is_empty()).then(|| {
        let unweighted = mean(&points);
        let native_unweighted = mean(&native);
        let weighted = native_unweighted + scale.bonus(course.rigor);
        CourseValues {
            unweighted,
            native_unweighted,
            weighted,
            normalized: scale.to_reference(weighted).min(NORMALIZED_CEILING),
        }
    });

    Ok(CourseValue {
        course_name: course.course_name.clone(),
        rigor: course.rigor,
        credits: course.credits_earned,
        terms,
        values,
    })
}
