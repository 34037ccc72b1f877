use anyhow::{Context, Result, anyhow, bail};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use transcript_rater::scale::{plain_letters, plus_minus_letters};
use transcript_rater::{GradeMapping, GradingScale, GradingScaleRegistry, NumericBand, NumericScale, Rigor};

/// Grading scales and subject keywords, stored as JSON on disk:
/// ```json
/// {
///   "schools": {
///     "flint-hill": {
///       "name": "Flint Hill School",
///       "letters": "plus_minus",
///       "rigor_bonus": { "Honors": 0.33, "AP": 0.67 }
///     },
///     "ut-austin-hs": {
///       "name": "UT Austin High School",
///       "numeric": { "letter_equivalents": { "A": 95 } },
///       "rigor_bonus": { "Honors": 5, "AP": 10 }
///     }
///   },
///   "subjects": { "Mathematics": ["calculus", "algebra"] }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    schools: IndexMap<String, ScaleEntry>,
    #[serde(default)]
    subjects: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScaleEntry {
    name: String,
    #[serde(default)]
    letters: Option<LetterSpec>,
    #[serde(default)]
    numeric: Option<NumericEntry>,
    #[serde(default)]
    rigor_bonus: BTreeMap<Rigor, f64>,
    #[serde(default)]
    pass_marks: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LetterSpec {
    Preset(LetterPreset),
    Table(IndexMap<String, f64>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LetterPreset {
    PlusMinus,
    NoPlusMinus,
}

#[derive(Debug, Deserialize)]
struct NumericEntry {
    /// Falls back to the 90/80/70/60 bands.
    #[serde(default)]
    bands: Option<Vec<BandEntry>>,
    #[serde(default = "default_max_score")]
    max_score: f64,
    #[serde(default)]
    letter_equivalents: IndexMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct BandEntry {
    min: f64,
    points: f64,
}

fn default_max_score() -> f64 {
    100.0
}

impl ScaleEntry {
    fn into_scale(self) -> Result<GradingScale> {
        let grades = match (self.letters, self.numeric) {
            (Some(LetterSpec::Preset(LetterPreset::PlusMinus)), None) => {
                GradeMapping::Letter(plus_minus_letters())
            }
            (Some(LetterSpec::Preset(LetterPreset::NoPlusMinus)), None) => {
                GradeMapping::Letter(plain_letters())
            }
            (Some(LetterSpec::Table(table)), None) => GradeMapping::Letter(table),
            (None, Some(numeric)) => {
                let scale = match numeric.bands {
                    Some(bands) => NumericScale::new(
                        bands
                            .into_iter()
                            .map(|b| NumericBand {
                                min: b.min,
                                points: b.points,
                            })
                            .collect(),
                        numeric.max_score,
                    ),
                    None => NumericScale::standard(),
                };
                GradeMapping::Numeric(scale.with_letter_equivalents(numeric.letter_equivalents))
            }
            (Some(_), Some(_)) => bail!("scale '{}' sets both letters and numeric", self.name),
            (None, None) => bail!("scale '{}' sets neither letters nor numeric", self.name),
        };

        let scale = GradingScale::new(&self.name, grades, self.rigor_bonus)?;
        Ok(match self.pass_marks {
            Some(marks) => scale.with_pass_marks(marks),
            None => scale,
        })
    }
}

impl AppConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scale config '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("invalid scale config '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Builds and fills a registry. Any invalid scale fails the whole load.
    pub fn into_registry(self) -> Result<(GradingScaleRegistry, IndexMap<String, Vec<String>>)> {
        let mut registry = GradingScaleRegistry::new();
        for (school_id, entry) in self.schools {
            let scale = entry
                .into_scale()
                .map_err(|e| anyhow!("school '{school_id}': {e:#}"))?;
            registry.register(&school_id, scale)?;
        }
        Ok((registry, self.subjects))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "schools": {
            "flint-hill": {
                "name": "Flint Hill School",
                "letters": "plus_minus",
                "rigor_bonus": { "Honors": 0.33, "AP": 0.67, "Post-AP": 0.67 }
            },
            "westlake": {
                "name": "Westlake",
                "numeric": {
                    "bands": [ { "min": 93, "points": 4.0 }, { "min": 85, "points": 3.0 }, { "min": 0, "points": 0.0 } ]
                },
                "rigor_bonus": { "Honors": 3, "AP": 6, "IB": 6 },
                "pass_marks": ["S"]
            },
            "plain": {
                "name": "Plain",
                "letters": { "A": 4.0, "B": 3.0, "C": 2.0 }
            }
        },
        "subjects": { "Mathematics": ["calculus"] }
    }"#;

    #[test]
    fn test_load_sample() {
        let config = AppConfig::from_json(SAMPLE).unwrap();
        let (registry, subjects) = config.into_registry().unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(subjects["Mathematics"], vec!["calculus"]);

        let flint = registry.lookup("flint-hill").unwrap();
        assert_eq!(flint.bonus(Rigor::PostAp), 0.67);
        assert!(!flint.is_numeric());

        let westlake = registry.lookup("westlake").unwrap();
        assert!(westlake.is_numeric());
        assert_eq!(westlake.pass_marks(), ["S".to_string()]);
        assert_eq!(westlake.bonus(Rigor::Ib), 6.0);

        assert_eq!(registry.lookup("plain").unwrap().bonus(Rigor::Ap), 0.0);
    }

    #[test]
    fn test_default_numeric_bands() {
        let config = AppConfig::from_json(
            r#"{ "schools": { "austin": { "name": "Austin", "numeric": {} } } }"#,
        )
        .unwrap();
        let (registry, _) = config.into_registry().unwrap();
        let scale = registry.lookup("austin").unwrap();
        assert!(scale.resolve("91").is_some());
        assert!(scale.resolve("101").is_none());
    }

    #[test]
    fn test_both_modes_rejected() {
        let config = AppConfig::from_json(
            r#"{ "schools": { "x": { "name": "X", "letters": "plus_minus", "numeric": {} } } }"#,
        )
        .unwrap();
        assert!(config.into_registry().is_err());
    }

    #[test]
    fn test_invalid_bonus_rejected() {
        let config = AppConfig::from_json(
            r#"{ "schools": { "x": { "name": "X", "letters": "plus_minus", "rigor_bonus": { "Standard": 1 } } } }"#,
        )
        .unwrap();
        let err = config.into_registry().unwrap_err();
        assert!(err.to_string().contains("school 'x'"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = AppConfig::from_json(
            r#"{ "schools": { "x": { "name": "X", "letters": "plus_minus", "bonus": {} } } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(AppConfig::load("/nonexistent/scales.json").is_err());
    }
}
