use transcript_rater::analyzers::types::{ConcernKind, Direction, Trend};
use transcript_rater::parser::parse_transcript;
use transcript_rater::report::{TranscriptIndex, TranscriptIndexEntry, TranscriptReport};
use transcript_rater::scale::plus_minus_letters;
use transcript_rater::{
    Course, Error, GpaNormalizer, GradeMapping, GradingScale, GradingScaleRegistry, NumericScale,
    Rigor, SubjectTag, Transcript, TranscriptAnalyzer, analyze,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-3
}

fn registry() -> GradingScaleRegistry {
    let mut registry = GradingScaleRegistry::new();
    registry
        .register(
            "flint-hill",
            GradingScale::new(
                "Flint Hill School",
                GradeMapping::Letter(plus_minus_letters()),
                [(Rigor::Honors, 0.33), (Rigor::Ap, 0.67), (Rigor::PostAp, 0.67)],
            )
            .unwrap(),
        )
        .unwrap();
    registry
        .register(
            "ut-austin-hs",
            GradingScale::new(
                "UT Austin High School",
                GradeMapping::Numeric(NumericScale::standard()),
                [
                    (Rigor::Honors, 5.0),
                    (Rigor::Ap, 10.0),
                    (Rigor::DualEnrollment, 10.0),
                ],
            )
            .unwrap(),
        )
        .unwrap();
    registry
}

fn flint_hill() -> Transcript {
    parse_transcript(include_bytes!("fixtures/flint_hill.json")).expect("Failed to parse transcript")
}

fn ut_austin() -> Transcript {
    parse_transcript(include_bytes!("fixtures/ut_austin.json")).expect("Failed to parse transcript")
}

fn subject(course: &Course) -> SubjectTag {
    let name = course.course_name.to_lowercase();
    if name.contains("calculus") || name.contains("algebra") || name.contains("statistics") {
        "Mathematics".into()
    } else if name.contains("english") {
        "English".into()
    } else {
        "Other".into()
    }
}

#[test]
fn test_full_pipeline() {
    let registry = registry();
    let transcript = flint_hill();
    let school_id = transcript.school_id.clone().unwrap();

    let normalized = GpaNormalizer::new(&registry)
        .normalize(&school_id, &transcript.academic_years)
        .unwrap();

    // Computed weighted GPAs line up with the ones printed on the transcript.
    for year in &normalized.years {
        let reported = year.reported_gpa.unwrap();
        assert!(
            (year.gpa.weighted - reported).abs() < 0.02,
            "{}: computed {} vs reported {}",
            year.year_label,
            year.gpa.weighted,
            reported
        );
    }
    assert!(approx(normalized.cumulative.unweighted, 4.0083));
    assert!(approx(normalized.cumulative.weighted, 4.4258));
    assert!(approx(normalized.normalized_gpa, 4.18));
    assert_eq!(normalized.cumulative.credits, 24.0);

    let analysis = analyze(&transcript.academic_years, &normalized, &subject).unwrap();

    assert_eq!(analysis.course_counts.total_courses, 27);
    assert_eq!(analysis.course_counts.total_ap_courses, 10);
    assert_eq!(analysis.course_counts.total_honors_courses, 6);
    assert_eq!(analysis.course_counts.post_ap_or_advanced_courses, 4);
    assert_eq!(
        analysis.course_counts.notable_pass_fail,
        vec!["Human Development (Pass)", "Senior Project (Pass)"]
    );

    assert_eq!(analysis.grade_anomalies.len(), 11);
    let spanish = analysis
        .grade_anomalies
        .iter()
        .find(|a| a.course == "Spanish IV Honors")
        .unwrap();
    assert_eq!(spanish.from_grade, "B+");
    assert_eq!(spanish.to_grade, "A");
    assert_eq!(spanish.direction, Direction::Improved);

    assert_eq!(analysis.trajectory.direction, Trend::Rising);
    assert!(analysis.concerns.is_empty());
    assert_eq!(analysis.rigor_progression.len(), 4);
    assert_eq!(analysis.curriculum[0].courses_by_year.len(), 4);
}

#[test]
fn test_pass_fail_courses_carry_no_points() {
    let registry = registry();
    let transcript = flint_hill();
    let normalized = GpaNormalizer::new(&registry)
        .normalize("flint-hill", &transcript.academic_years)
        .unwrap();

    let (_, senior_project) = normalized
        .courses()
        .find(|(_, c)| c.course_name == "Senior Project")
        .unwrap();
    assert!(!senior_project.is_graded());
    assert_eq!(senior_project.credits, None);
}

#[test]
fn test_numeric_school_pipeline() {
    let registry = registry();
    let transcript = ut_austin();
    let normalized = GpaNormalizer::new(&registry)
        .normalize("ut-austin-hs", &transcript.academic_years)
        .unwrap();

    // Native GPAs stay on the 100-point scale; the normalized one is on 4.3.
    assert!(approx(normalized.cumulative.unweighted, 93.3261));
    assert!(approx(normalized.cumulative.weighted, 97.6739));
    assert!(approx(normalized.normalized_gpa, 4.0778));

    let analysis = TranscriptAnalyzer::new()
        .analyze(&transcript.academic_years, &normalized, &subject)
        .unwrap();
    assert_eq!(analysis.course_counts.dual_enrollment_courses, 1);

    // 87 -> 90 is exactly one plus/minus step.
    let english = analysis
        .grade_anomalies
        .iter()
        .find(|a| a.course == "English I")
        .unwrap();
    assert_eq!(english.from_letter, "B+");
    assert_eq!(english.to_letter, "A-");
    assert!(approx(english.delta, 0.3));

    let calculus = analysis
        .grade_anomalies
        .iter()
        .find(|a| a.course == "AP Calculus AB")
        .unwrap();
    assert_eq!(calculus.direction, Direction::Declined);
    assert_eq!(analysis.grade_anomalies.len(), 7);
}

#[test]
fn test_numeric_grades_and_concerns_from_json() {
    let doc = br#"{
        "school_id": "ut-austin-hs",
        "academic_years": [
            {"year_label": "9th", "courses": [
                {"course_name": "Algebra I", "rigor": "Regular", "term_grades": {"Sem1": 40, "Sem2": 52.5}, "credits_earned": 1.0},
                {"course_name": "Biology", "rigor": "Honors", "term_grades": {"Sem1": 91, "Sem2": "W"}, "credits_earned": 1.0}
            ]},
            {"year_label": "10th", "courses": [
                {"course_name": "Algebra I", "rigor": "Regular", "term_grades": {"Sem1": 84, "Sem2": 88}, "credits_earned": 1.0}
            ]}
        ]
    }"#;
    let registry = registry();
    let transcript = parse_transcript(doc).unwrap();
    let normalized = GpaNormalizer::new(&registry)
        .normalize("ut-austin-hs", &transcript.academic_years)
        .unwrap();

    let (_, biology) = normalized
        .courses()
        .find(|(_, c)| c.course_name == "Biology")
        .unwrap();
    assert_eq!(biology.values.unwrap().weighted, 96.0);

    let analysis = analyze(&transcript.academic_years, &normalized, &subject).unwrap();
    let kinds: Vec<ConcernKind> = analysis.concerns.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        [ConcernKind::LowGrade, ConcernKind::Withdrawal, ConcernKind::Repeated]
    );
    assert_eq!(analysis.concerns[2].years, ["9th", "10th"]);
}

#[test]
fn test_cross_school_ranking() {
    let registry = registry();
    let normalizer = GpaNormalizer::new(&registry);

    let entries = [ut_austin(), flint_hill()]
        .iter()
        .map(|t| {
            let school_id = t.school_id.as_deref().unwrap();
            let normalized = normalizer.normalize(school_id, &t.academic_years).unwrap();
            TranscriptIndexEntry::new(t, school_id, &normalized)
        })
        .collect();

    let index = TranscriptIndex::new(entries);
    assert_eq!(index.transcripts[0].student.as_deref(), Some("Qu, Thomas Shen"));
    assert_eq!(index.transcripts[1].school_id, "ut-austin-hs");
}

#[test]
fn test_report_serializes() {
    let registry = registry();
    let transcript = flint_hill();
    let report = TranscriptReport::build(
        &transcript,
        "flint-hill",
        registry.lookup("flint-hill").unwrap(),
        &TranscriptAnalyzer::default(),
        &subject,
    )
    .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["student_info"]["full_name"], "Qu, Thomas Shen");
    assert_eq!(json["normalized"]["years"][0]["courses"][6]["rigor"], "Pass/Fail");
    assert_eq!(json["analysis"]["trajectory"]["direction"], "rising");
}

#[test]
fn test_unknown_school() {
    let registry = registry();
    let transcript = flint_hill();
    let result = GpaNormalizer::new(&registry).normalize("nowhere", &transcript.academic_years);
    assert!(matches!(result, Err(Error::UnknownSchool(id)) if id == "nowhere"));
}

#[test]
fn test_wrong_scale_surfaces_unresolved_grade() {
    let registry = registry();
    let transcript = flint_hill();
    let result =
        GpaNormalizer::new(&registry).normalize("ut-austin-hs", &transcript.academic_years);
    assert!(matches!(result, Err(Error::UnresolvedGrade { .. })));
}
