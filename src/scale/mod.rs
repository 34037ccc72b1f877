//! Per-school grading scales.
//!
//! A [`GradingScale`] turns the grade text on a transcript into grade points
//! and knows how much each rigor tier is worth at that school. Scales are
//! validated once at construction and never change afterwards; the
//! [`GradingScaleRegistry`] keys them by school id.

pub mod numeric;
pub mod registry;

pub use numeric::{NumericBand, NumericScale};
pub use registry::GradingScaleRegistry;

use crate::error::{Error, Result};
use crate::transcript::Rigor;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Plus/minus letters, with `A+` worth 4.3.
static PLUS_MINUS_LETTERS: &[(&str, f64)] = &[
    ("A+", 4.3),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("D-", 0.7),
    ("F", 0.0),
];

static PLAIN_LETTERS: &[(&str, f64)] = &[
    ("A", 4.0),
    ("B", 3.0),
    ("C", 2.0),
    ("D", 1.0),
    ("F", 0.0),
];

/// Upper bound of the common reference scale.
pub const NORMALIZED_CEILING: f64 = 4.3;

/// Marks that carry no grade points: pass/fail outcomes and withdrawals.
static DEFAULT_PASS_MARKS: &[&str] = &[
    "P", "Pass", "Fail", "NP", "CR", "NC", "W", "WP", "WF", "Withdrawn",
];

/// Letter table with plus/minus steps of a third of a point.
pub fn plus_minus_letters() -> IndexMap<String, f64> {
    PLUS_MINUS_LETTERS
        .iter()
        .map(|&(k, v)| (k.to_string(), v))
        .collect()
}

/// Letter table without plus/minus.
pub fn plain_letters() -> IndexMap<String, f64> {
    PLAIN_LETTERS
        .iter()
        .map(|&(k, v)| (k.to_string(), v))
        .collect()
}

/// How a school writes its grades.
#[derive(Debug, Clone, PartialEq)]
pub enum GradeMapping {
    /// Letter symbol to unweighted 4.0-scale points.
    Letter(IndexMap<String, f64>),
    /// Raw scores interpolated between band corners.
    Numeric(NumericScale),
}

/// A term grade after resolution against a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedGrade {
    /// `native` is the value on the school's own scale (points for letter
    /// schools, the raw score for numeric ones); `points` is on the 4.0 scale.
    Graded { native: f64, points: f64 },
    /// Completed without grade points.
    PassMark,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradingScale {
    name: String,
    grades: GradeMapping,
    rigor_bonus: BTreeMap<Rigor, f64>,
    pass_marks: Vec<String>,
}

impl GradingScale {
    /// Validates and builds a scale. Rigor tiers missing from `rigor_bonus` get 0.
    pub fn new<I>(name: &str, grades: GradeMapping, rigor_bonus: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Rigor, f64)>,
    {
        let invalid = |reason: String| Error::InvalidScale {
            scale: name.to_string(),
            reason,
        };

        match &grades {
            GradeMapping::Letter(letters) => {
                if letters.is_empty() {
                    return Err(invalid("letter mapping is empty".into()));
                }
                for (letter, points) in letters {
                    if !(0.0..=NORMALIZED_CEILING).contains(points) {
                        return Err(invalid(format!(
                            "letter '{letter}' maps to {points}, outside 0..={NORMALIZED_CEILING}"
                        )));
                    }
                }
            }
            GradeMapping::Numeric(numeric) => numeric.validate().map_err(invalid)?,
        }

        let rigor_bonus: BTreeMap<Rigor, f64> = rigor_bonus.into_iter().collect();
        for (rigor, bonus) in &rigor_bonus {
            if !bonus.is_finite() || *bonus < 0.0 {
                return Err(invalid(format!("{rigor} bonus {bonus} is negative")));
            }
            if matches!(rigor, Rigor::Standard | Rigor::PassFail) && *bonus != 0.0 {
                return Err(invalid(format!("{rigor} bonus must be 0, got {bonus}")));
            }
        }

        Ok(GradingScale {
            name: name.to_string(),
            grades,
            rigor_bonus,
            pass_marks: DEFAULT_PASS_MARKS.iter().map(|m| m.to_string()).collect(),
        })
    }

    /// Replaces the default pass marks.
    pub fn with_pass_marks<I, S>(mut self, marks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pass_marks = marks.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grades(&self) -> &GradeMapping {
        &self.grades
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.grades, GradeMapping::Numeric(_))
    }

    pub fn pass_marks(&self) -> &[String] {
        &self.pass_marks
    }

    /// Native bonus for a tier. `Pass/Fail` is always 0.
    pub fn bonus(&self, rigor: Rigor) -> f64 {
        if rigor == Rigor::PassFail {
            return 0.0;
        }
        self.rigor_bonus.get(&rigor).copied().unwrap_or(0.0)
    }

    /// Maps a value on the school's native scale, bonus included, onto the
    /// reference scale. Letter schools already grade in 4.0 points, so the
    /// map is the identity; raw-score schools go through their bands.
    /// Strictly increasing either way.
    pub fn to_reference(&self, native: f64) -> f64 {
        match &self.grades {
            GradeMapping::Letter(_) => native,
            GradeMapping::Numeric(numeric) => numeric.to_reference(native),
        }
    }

    pub fn is_pass_mark(&self, grade: &str) -> bool {
        let grade = grade.trim();
        self.pass_marks.iter().any(|m| m.eq_ignore_ascii_case(grade))
    }

    /// Resolves one term grade, or `None` if it lies outside the scale.
    pub fn resolve(&self, grade: &str) -> Option<ResolvedGrade> {
        let grade = grade.trim();
        let graded = match &self.grades {
            GradeMapping::Letter(letters) => letters
                .get(grade)
                .map(|&points| ResolvedGrade::Graded { native: points, points }),
            GradeMapping::Numeric(numeric) => grade
                .parse::<f64>()
                .ok()
                .or_else(|| numeric.letter_score(grade))
                .and_then(|score| {
                    numeric
                        .points(score)
                        .map(|points| ResolvedGrade::Graded { native: score, points })
                }),
        };
        graded.or_else(|| self.is_pass_mark(grade).then_some(ResolvedGrade::PassMark))
    }
}
