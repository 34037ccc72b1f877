//! GPA normalization.
//!
//! Turns a transcript's raw term grades into per-course grade-point values,
//! credit-weighted year and cumulative GPAs on the school's own scale, and a
//! normalized GPA on the common reference scale. Pure and deterministic:
//! no I/O, no logging, no state between calls.

mod aggregate;
mod course;
pub mod types;

pub use types::{CourseValue, CourseValues, GpaSummary, NormalizedTranscript, NormalizedYear, TermValue};

use crate::error::{Error, Result};
use crate::scale::{GradingScale, GradingScaleRegistry};
use crate::transcript::AcademicYear;
use aggregate::summarize;
use course::normalize_course;

/// Normalizes a transcript's years under `scale`.
///
/// # Errors
///
/// [`Error::UnresolvedGrade`] if a term grade is outside the scale,
/// [`Error::InvalidCourse`] for malformed course records, and
/// [`Error::NoCreditBearingCourses`] if a year, or the transcript as a
/// whole, has no graded course with positive credits.
pub fn normalize(years: &[AcademicYear], scale: &GradingScale) -> Result<NormalizedTranscript> {
    let mut normalized_years = Vec::with_capacity(years.len());

    for year in years {
        let courses = year
            .courses
            .iter()
            .map(|c| normalize_course(c, scale))
            .collect::<Result<Vec<_>>>()?;

        let gpa = summarize(&courses).ok_or_else(|| Error::NoCreditBearingCourses {
            scope: year.year_label.clone(),
        })?;

        normalized_years.push(NormalizedYear {
            year_label: year.year_label.clone(),
            reported_gpa: year.reported_gpa(),
            courses,
            gpa,
        });
    }

    let cumulative = summarize(normalized_years.iter().flat_map(|y| &y.courses)).ok_or_else(|| {
        Error::NoCreditBearingCourses {
            scope: "transcript".to_string(),
        }
    })?;

    Ok(NormalizedTranscript {
        scale: scale.name().to_string(),
        years: normalized_years,
        normalized_gpa: cumulative.normalized,
        cumulative,
    })
}

/// Normalizer bound to a registry, for callers that hold school ids.
#[derive(Debug, Clone, Copy)]
pub struct GpaNormalizer<'r> {
    registry: &'r GradingScaleRegistry,
}

impl<'r> GpaNormalizer<'r> {
    pub fn new(registry: &'r GradingScaleRegistry) -> Self {
        GpaNormalizer { registry }
    }

    /// Looks up the school's scale and normalizes under it.
    pub fn normalize(&self, school_id: &str, years: &[AcademicYear]) -> Result<NormalizedTranscript> {
        let scale = self.registry.lookup(school_id)?;
        normalize(years, scale)
    }
}
