//! CLI entry point for the transcript rater.
//!
//! Provides subcommands for normalizing a transcript onto the common
//! reference scale, producing a full analysis report, ranking several
//! transcripts, and listing the configured grading scales.

mod infra;

use crate::infra::config::AppConfig;
use crate::infra::subjects::KeywordClassifier;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transcript_rater::analyzers::anomaly::DEFAULT_ANOMALY_THRESHOLD;
use transcript_rater::output::{CourseRecord, append_records, print_json, print_pretty, write_json};
use transcript_rater::parser::parse_transcript;
use transcript_rater::report::{TranscriptIndex, TranscriptIndexEntry, TranscriptReport};
use transcript_rater::{
    GpaNormalizer, GradeMapping, GradingScaleRegistry, Rigor, Transcript, TranscriptAnalyzer,
    normalize,
};

#[derive(Parser)]
#[command(name = "transcript_rater")]
#[command(about = "A tool to normalize and analyze high school transcripts", long_about = None)]
struct Cli {
    /// Grading scale config (defaults to $TRANSCRIPT_RATER_SCALES, then config/scales.json)
    #[arg(long, global = true)]
    scales: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a transcript and log its GPA summary
    Normalize {
        /// Path to a transcript JSON document
        #[arg(value_name = "TRANSCRIPT")]
        source: String,

        /// School id; overrides the transcript's own school_id
        #[arg(short, long)]
        school: Option<String>,

        /// CSV file to append per-course results to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Normalize and analyze a transcript, producing a report
    Analyze {
        /// Path to a transcript JSON document
        #[arg(value_name = "TRANSCRIPT")]
        source: String,

        /// School id; overrides the transcript's own school_id
        #[arg(short, long)]
        school: Option<String>,

        /// JSON file to write the report to (logged when omitted)
        #[arg(short, long)]
        report: Option<String>,

        /// Minimum 4.0-scale swing between consecutive terms to flag
        #[arg(long, default_value_t = DEFAULT_ANOMALY_THRESHOLD)]
        anomaly_threshold: f64,
    },
    /// Rank several transcripts by normalized GPA
    Rank {
        /// Paths to transcript JSON documents
        #[arg(value_name = "TRANSCRIPT", required = true)]
        sources: Vec<String>,

        /// School id applied to transcripts that carry none
        #[arg(short, long)]
        school: Option<String>,

        /// JSON file to write the index to (logged when omitted)
        #[arg(short, long)]
        index: Option<String>,
    },
    /// List the configured grading scales
    ListScales,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/transcript_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transcript_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let scales_path = cli
        .scales
        .or_else(|| std::env::var("TRANSCRIPT_RATER_SCALES").ok())
        .unwrap_or_else(|| "config/scales.json".to_string());
    let (registry, subjects) = AppConfig::load(&scales_path)?.into_registry()?;
    info!(path = %scales_path, schools = registry.len(), "Grading scales loaded");

    match cli.command {
        Commands::Normalize {
            source,
            school,
            output,
        } => {
            normalize_transcript(&registry, &source, school.as_deref(), output.as_deref())?;
        }
        Commands::Analyze {
            source,
            school,
            report,
            anomaly_threshold,
        } => {
            let classifier = KeywordClassifier::new(subjects);
            let analyzer = TranscriptAnalyzer::new().with_anomaly_threshold(anomaly_threshold)?;
            analyze_transcript(
                &registry,
                &analyzer,
                &classifier,
                &source,
                school.as_deref(),
                report.as_deref(),
            )?;
        }
        Commands::Rank {
            sources,
            school,
            index,
        } => {
            rank_transcripts(&registry, &sources, school.as_deref(), index.as_deref())?;
        }
        Commands::ListScales => list_scales(&registry),
    }

    Ok(())
}

/// Reads and decodes a transcript document from disk.
#[tracing::instrument]
fn load_transcript(source: &str) -> Result<Transcript> {
    let bytes =
        std::fs::read(source).with_context(|| format!("failed to read transcript '{source}'"))?;
    parse_transcript(&bytes).with_context(|| format!("invalid transcript '{source}'"))
}

/// Picks the school id from the command line, then from the document.
fn resolve_school(school: Option<&str>, transcript: &Transcript) -> Result<String> {
    match school.or(transcript.school_id.as_deref()) {
        Some(id) => Ok(id.to_string()),
        None => bail!("transcript has no school_id; pass --school"),
    }
}

#[tracing::instrument(skip(registry))]
fn normalize_transcript(
    registry: &GradingScaleRegistry,
    source: &str,
    school: Option<&str>,
    output: Option<&str>,
) -> Result<()> {
    let transcript = load_transcript(source)?;
    let school_id = resolve_school(school, &transcript)?;
    let scale = registry.lookup(&school_id)?;
    let normalized = normalize(&transcript.academic_years, scale)?;

    for year in &normalized.years {
        let gpa = year.gpa;
        // Raw-score schools report on the 4.0 scale, so only letter GPAs compare.
        if let (Some(reported), false) = (year.reported_gpa, scale.is_numeric()) {
            if (reported - gpa.weighted).abs() > 0.05 {
                warn!(
                    year = %year.year_label,
                    reported,
                    computed = gpa.weighted,
                    "Computed weighted GPA differs from the reported one"
                );
            }
        }
        info!(
            year = %year.year_label,
            unweighted = gpa.unweighted,
            weighted = gpa.weighted,
            normalized = gpa.normalized,
            credits = gpa.credits,
            "Year"
        );
    }

    info!(
        school_id = %school_id,
        scale = %normalized.scale,
        unweighted = normalized.cumulative.unweighted,
        weighted = normalized.cumulative.weighted,
        normalized_gpa = normalized.normalized_gpa,
        credits = normalized.cumulative.credits,
        "Transcript normalized"
    );
    print_pretty(&normalized);

    if let Some(path) = output {
        let rows = CourseRecord::rows(&school_id, transcript.student_name(), &normalized);
        append_records(path, &rows)?;
        info!(path, rows = rows.len(), "Course rows appended");
    }

    Ok(())
}

#[tracing::instrument(skip(registry, analyzer, classifier))]
fn analyze_transcript(
    registry: &GradingScaleRegistry,
    analyzer: &TranscriptAnalyzer,
    classifier: &KeywordClassifier,
    source: &str,
    school: Option<&str>,
    report: Option<&str>,
) -> Result<()> {
    let transcript = load_transcript(source)?;
    let school_id = resolve_school(school, &transcript)?;
    let scale = registry.lookup(&school_id)?;
    let built = TranscriptReport::build(&transcript, &school_id, scale, analyzer, classifier)?;

    let counts = &built.analysis.course_counts;
    info!(
        school_id = %school_id,
        normalized_gpa = built.normalized.normalized_gpa,
        total_courses = counts.total_courses,
        ap_courses = counts.total_ap_courses,
        honors_courses = counts.total_honors_courses,
        anomalies = built.analysis.grade_anomalies.len(),
        concerns = built.analysis.concerns.len(),
        trend = ?built.analysis.trajectory.direction,
        "Transcript analyzed"
    );

    match report {
        Some(path) => {
            write_json(path, &built)?;
            info!(path, "Report written");
        }
        None => print_json(&built)?,
    }
    Ok(())
}

/// Normalizes every transcript and ranks them. A transcript with bad data is
/// logged and left out of the index; a configuration error aborts the run.
#[tracing::instrument(skip(registry, sources), fields(count = sources.len()))]
fn rank_transcripts(
    registry: &GradingScaleRegistry,
    sources: &[String],
    school: Option<&str>,
    index: Option<&str>,
) -> Result<()> {
    let normalizer = GpaNormalizer::new(registry);
    let mut entries = Vec::with_capacity(sources.len());

    for source in sources {
        let entry = load_transcript(source).and_then(|transcript| {
            // The document's own school wins; --school only fills the gap.
            let school_id = resolve_school(transcript.school_id.as_deref().or(school), &transcript)?;
            let normalized = normalizer.normalize(&school_id, &transcript.academic_years)?;
            Ok(TranscriptIndexEntry::new(&transcript, &school_id, &normalized))
        });
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e)
                if e
                    .downcast_ref::<transcript_rater::Error>()
                    .is_some_and(transcript_rater::Error::is_configuration_error) =>
            {
                return Err(e.context(format!("cannot rank '{source}'")));
            }
            Err(e) => error!(source = %source, error = %format!("{e:#}"), "Transcript skipped"),
        }
    }

    if entries.is_empty() {
        bail!("no transcript could be normalized");
    }

    let ranked = TranscriptIndex::new(entries);
    match index {
        Some(path) => {
            write_json(path, &ranked)?;
            info!(path, ranked = ranked.transcripts.len(), "Index written");
        }
        None => print_json(&ranked)?,
    }
    Ok(())
}

fn list_scales(registry: &GradingScaleRegistry) {
    for (school_id, scale) in registry.iter() {
        let bonuses = Rigor::ALL
            .iter()
            .filter(|r| scale.bonus(**r) > 0.0)
            .map(|r| format!("{r}: {}", scale.bonus(*r)))
            .collect::<Vec<_>>()
            .join(", ");
        match scale.grades() {
            GradeMapping::Letter(letters) => info!(
                school_id,
                name = scale.name(),
                mode = "letter",
                letters = letters.len(),
                bonuses = %bonuses,
                "Scale"
            ),
            GradeMapping::Numeric(numeric) => info!(
                school_id,
                name = scale.name(),
                mode = "numeric",
                bands = numeric.bands().len(),
                max_score = numeric.max_score(),
                bonuses = %bonuses,
                "Scale"
            ),
        }
    }
    info!(total = registry.len(), "Scale list summary");
}
