use crate::analyzers::types::{CurriculumEntry, SubjectCurriculum};
use crate::transcript::{AcademicYear, Course};
use indexmap::IndexMap;

pub type SubjectTag = String;

/// Assigns a course to a subject ("AP Calculus BC" -> "Mathematics").
///
/// Subject inference from free-text course names is left to the caller;
/// any `Fn(&Course) -> SubjectTag` works.
pub trait SubjectClassifier {
    fn classify(&self, course: &Course) -> SubjectTag;
}

impl<F> SubjectClassifier for F
where
    F: Fn(&Course) -> SubjectTag,
{
    fn classify(&self, course: &Course) -> SubjectTag {
        self(course)
    }
}

/// Subject of every course, indexed like `years[i].courses[j]`.
pub(crate) fn classify_all<C>(years: &[AcademicYear], classifier: &C) -> Vec<Vec<SubjectTag>>
where
    C: SubjectClassifier + ?Sized,
{
    years
        .iter()
        .map(|y| y.courses.iter().map(|c| classifier.classify(c)).collect())
        .collect()
}

/// Buckets courses by subject and year. Subjects appear in first-seen order.
pub(crate) fn group_by_subject(
    years: &[AcademicYear],
    subjects: &[Vec<SubjectTag>],
) -> Vec<SubjectCurriculum> {
    let mut grid: IndexMap<&str, Vec<Vec<CurriculumEntry>>> = IndexMap::new();

    for (index, (year, tags)) in years.iter().zip(subjects).enumerate() {
        for (course, tag) in year.courses.iter().zip(tags) {
            let row = grid
                .entry(tag.as_str())
                .or_insert_with(|| vec![Vec::new(); years.len()]);
            row[index].push(CurriculumEntry {
                course_name: course.course_name.clone(),
                rigor: course.rigor,
            });
        }
    }

    grid.into_iter()
        .map(|(subject, courses_by_year)| SubjectCurriculum {
            subject_name: subject.to_string(),
            courses_by_year,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Rigor;

    fn by_keyword(course: &Course) -> SubjectTag {
        let name = course.course_name.to_lowercase();
        if name.contains("calculus") || name.contains("geometry") {
            "Mathematics".to_string()
        } else if name.contains("english") {
            "English".to_string()
        } else {
            "Other".to_string()
        }
    }

    fn years() -> Vec<AcademicYear> {
        vec![
            AcademicYear::new("9th Grade")
                .with_course(Course::new("English 9", Rigor::Standard).with_term("Final", "A"))
                .with_course(Course::new("Honors Geometry", Rigor::Honors).with_term("Final", "B+")),
            AcademicYear::new("10th Grade")
                .with_course(Course::new("Ceramics", Rigor::Standard).with_term("Final", "A")),
            AcademicYear::new("11th Grade")
                .with_course(Course::new("AP Calculus AB", Rigor::Ap).with_term("Final", "A"))
                .with_course(Course::new("AP English Literature", Rigor::Ap).with_term("Final", "A")),
        ]
    }

    #[test]
    fn test_closure_is_a_classifier() {
        let course = Course::new("AP Calculus BC", Rigor::Ap);
        assert_eq!(by_keyword.classify(&course), "Mathematics");
    }

    #[test]
    fn test_grid_has_one_column_per_year() {
        let years = years();
        let subjects = classify_all(&years, &by_keyword);
        let grid = group_by_subject(&years, &subjects);

        let names: Vec<&str> = grid.iter().map(|s| s.subject_name.as_str()).collect();
        assert_eq!(names, vec!["English", "Mathematics", "Other"]);

        let math = &grid[1];
        assert_eq!(math.courses_by_year.len(), 3);
        assert_eq!(math.courses_by_year[0][0].course_name, "Honors Geometry");
        assert!(math.courses_by_year[1].is_empty());
        assert_eq!(math.courses_by_year[2][0].rigor, Rigor::Ap);

        let other = &grid[2];
        assert_eq!(other.courses_by_year[1][0].course_name, "Ceramics");
    }

    #[test]
    fn test_trait_object_classifier() {
        let years = years();
        let classifier: &dyn SubjectClassifier = &by_keyword;
        let subjects = classify_all(&years, classifier);
        assert_eq!(subjects[2], vec!["Mathematics", "English"]);
    }
}
