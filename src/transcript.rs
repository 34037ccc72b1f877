//! Transcript records as supplied by the ingestion layer.
//!
//! Field names follow the transcript JSON documents (`course_name`,
//! `term_grades`, `credits_earned`, ...), so a document deserializes
//! straight into these types.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Course difficulty tier.
///
/// Variant order is the display order used by rigor tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rigor {
    #[serde(alias = "Regular")]
    Standard,
    Honors,
    #[serde(rename = "AP")]
    Ap,
    #[serde(rename = "IB")]
    Ib,
    #[serde(rename = "Post-AP")]
    PostAp,
    #[serde(alias = "Advanced / Elective")]
    Advanced,
    #[serde(rename = "Dual Enrollment")]
    DualEnrollment,
    #[serde(rename = "Pass/Fail")]
    PassFail,
}

impl Rigor {
    pub const ALL: [Rigor; 8] = [
        Rigor::Standard,
        Rigor::Honors,
        Rigor::Ap,
        Rigor::Ib,
        Rigor::PostAp,
        Rigor::Advanced,
        Rigor::DualEnrollment,
        Rigor::PassFail,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Rigor::Standard => "Standard",
            Rigor::Honors => "Honors",
            Rigor::Ap => "AP",
            Rigor::Ib => "IB",
            Rigor::PostAp => "Post-AP",
            Rigor::Advanced => "Advanced",
            Rigor::DualEnrollment => "Dual Enrollment",
            Rigor::PassFail => "Pass/Fail",
        }
    }

    /// True for every tier above `Standard` that carries a grade.
    pub fn is_accelerated(self) -> bool {
        !matches!(self, Rigor::Standard | Rigor::PassFail)
    }
}

impl fmt::Display for Rigor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One course as it appears on a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub course_name: String,
    pub rigor: Rigor,
    /// Term label to grade text, in the order the transcript lists them.
    #[serde(deserialize_with = "term_grades")]
    pub term_grades: IndexMap<String, String>,
    #[serde(default)]
    pub credits_earned: Option<f64>,
}

/// Accepts bare JSON numbers (`95`, `92.5`) alongside grade text.
fn term_grades<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Grade {
        Text(String),
        Number(serde_json::Number),
    }

    let grades = IndexMap::<String, Grade>::deserialize(deserializer)?;
    Ok(grades
        .into_iter()
        .map(|(term, grade)| {
            let text = match grade {
                Grade::Text(text) => text,
                Grade::Number(number) => number.to_string(),
            };
            (term, text)
        })
        .collect())
}

impl Course {
    pub fn new(name: &str, rigor: Rigor) -> Self {
        Course {
            course_name: name.to_string(),
            rigor,
            term_grades: IndexMap::new(),
            credits_earned: None,
        }
    }

    pub fn with_term(mut self, term: &str, grade: &str) -> Self {
        self.term_grades.insert(term.to_string(), grade.to_string());
        self
    }

    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits_earned = Some(credits);
        self
    }
}

/// An ordered block of courses, typically one school year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcademicYear {
    pub year_label: String,
    /// GPA printed on the transcript. Display only; never used in computation.
    #[serde(default)]
    pub weighted_gpa: Option<f64>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

impl AcademicYear {
    pub fn new(label: &str) -> Self {
        AcademicYear {
            year_label: label.to_string(),
            weighted_gpa: None,
            courses: Vec::new(),
        }
    }

    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    pub fn with_reported_gpa(mut self, gpa: f64) -> Self {
        self.weighted_gpa = Some(gpa);
        self
    }

    /// The school-reported GPA, treating 0 as "not supplied".
    pub fn reported_gpa(&self) -> Option<f64> {
        self.weighted_gpa.filter(|g| *g > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub full_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub graduation_date: Option<NaiveDate>,
    #[serde(default)]
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolInfo {
    pub school_name: String,
    #[serde(default)]
    pub school_address: Option<String>,
    #[serde(default)]
    pub ceeb_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub school_type: Option<String>,
}

/// A full transcript document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    /// Registry key of the issuing school's grading scale, if the document names one.
    #[serde(default)]
    pub school_id: Option<String>,
    #[serde(default)]
    pub student_info: Option<StudentInfo>,
    #[serde(default)]
    pub school_info: Option<SchoolInfo>,
    pub academic_years: Vec<AcademicYear>,
}

impl Transcript {
    pub fn student_name(&self) -> Option<&str> {
        self.student_info.as_ref().map(|s| s.full_name.as_str())
    }

    pub fn course_count(&self) -> usize {
        self.academic_years.iter().map(|y| y.courses.len()).sum()
    }
}
