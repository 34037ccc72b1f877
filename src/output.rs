//! Output formatting and persistence for normalization results.
//!
//! Supports pretty-printing, JSON logging, JSON report files, and CSV append
//! of per-course rows.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::normalizer::NormalizedTranscript;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// One CSV row per course.
#[derive(Debug, Default, Serialize)]
pub struct CourseRecord {
    pub school_id: String,
    pub student: Option<String>,
    pub year_label: String,
    pub course_name: String,
    pub rigor: String,
    pub credits: Option<f64>,
    pub graded: bool,
    pub unweighted: Option<f64>,
    pub weighted: Option<f64>,
    pub normalized: Option<f64>,
}

impl CourseRecord {
    /// Flattens a normalized transcript into course rows, in transcript order.
    pub fn rows(
        school_id: &str,
        student: Option<&str>,
        normalized: &NormalizedTranscript,
    ) -> Vec<CourseRecord> {
        normalized
            .courses()
            .map(|(year, course)| CourseRecord {
                school_id: school_id.to_string(),
                student: student.map(str::to_string),
                year_label: year.year_label.clone(),
                course_name: course.course_name.clone(),
                rigor: course.rigor.to_string(),
                credits: course.credits,
                graded: course.is_graded(),
                unweighted: course.values.map(|v| v.native_unweighted),
                weighted: course.values.map(|v| v.weighted),
                normalized: course.values.map(|v| v.normalized),
            })
            .collect()
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty(value: &impl std::fmt::Debug) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON, creating parent directories.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body)?;
    debug!(path, "Wrote JSON report");
    Ok(())
}

/// Appends [`CourseRecord`] rows to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_records(path: &str, records: &[CourseRecord]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = records.len(), "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize;
    use crate::scale::{GradeMapping, GradingScale, plus_minus_letters};
    use crate::transcript::{AcademicYear, Course, Rigor};
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn normalized() -> NormalizedTranscript {
        let scale = GradingScale::new(
            "Flint Hill",
            GradeMapping::Letter(plus_minus_letters()),
            [(Rigor::Honors, 0.33), (Rigor::Ap, 0.67)],
        )
        .unwrap();
        let year = AcademicYear::new("9th Grade")
            .with_course(
                Course::new("Geometry Honors", Rigor::Honors)
                    .with_term("Final", "A")
                    .with_credits(1.0),
            )
            .with_course(
                Course::new("Human Development", Rigor::PassFail)
                    .with_term("Final", "Pass")
                    .with_credits(0.5),
            );
        normalize(&[year], &scale).unwrap()
    }

    #[test]
    fn test_rows_follow_transcript_order() {
        let rows = CourseRecord::rows("flint-hill", Some("Qu, Thomas Shen"), &normalized());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].course_name, "Geometry Honors");
        assert_eq!(rows[0].rigor, "Honors");
        assert!(rows[0].graded);
        assert_eq!(rows[0].normalized, Some(4.3));
        assert!(!rows[1].graded);
        assert_eq!(rows[1].weighted, None);
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&normalized());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&normalized()).unwrap();
    }

    #[test]
    fn test_write_json_creates_file() {
        let path = temp_path("transcript_rater_test_report/report.json");
        let _ = fs::remove_file(&path);

        write_json(&path, &normalized()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["scale"], "Flint Hill");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_records_writes_header_once() {
        let path = temp_path("transcript_rater_test_header.csv");
        let _ = fs::remove_file(&path);

        let rows = CourseRecord::rows("flint-hill", None, &normalized());
        append_records(&path, &rows).unwrap();
        append_records(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("school_id")).count();
        assert_eq!(header_count, 1);
        // 1 header + 2 appends of 2 rows
        assert_eq!(content.lines().count(), 5);

        fs::remove_file(&path).unwrap();
    }
}
