use indexmap::IndexMap;
use transcript_rater::{Course, SubjectClassifier, SubjectTag};

/// Fallback subject for courses no keyword matches.
pub const OTHER_SUBJECT: &str = "Other";

/// Order matters: the first subject with a matching keyword wins, so
/// "Computer Science" sits ahead of "Science" and "History" ahead of "Arts".
const DEFAULT_SUBJECTS: &[(&str, &[&str])] = &[
    (
        "Mathematics",
        &[
            "calculus", "precalculus", "algebra", "geometry", "statistics", "trigonometry",
            "math", "mathematics",
        ],
    ),
    ("Computer Science", &["computer", "programming", "coding"]),
    (
        "Science",
        &["biology", "chemistry", "physics", "science", "environmental", "anatomy"],
    ),
    (
        "English",
        &["english", "literature", "writing", "composition", "rhetoric"],
    ),
    (
        "History & Social Studies",
        &[
            "history", "government", "economics", "macroeconomics", "microeconomics",
            "psychology", "geography", "civics",
        ],
    ),
    (
        "World Languages",
        &["spanish", "french", "latin", "chinese", "mandarin", "german", "japanese"],
    ),
    (
        "Arts",
        &[
            "art", "arts", "ceramics", "photography", "film", "music", "orchestra", "band",
            "choir", "theater", "theatre", "drawing", "painting",
        ],
    ),
    (
        "Health & Physical Education",
        &["physical education", "health", "fitness"],
    ),
];

/// Lowercased alphanumeric words of `text`.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Tags courses by case-insensitive keyword match on the course name. A
/// keyword matches whole words only: "art" hits "Studio Art" but not
/// "Smart Cities", and "physical education" needs both words in a row.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<(SubjectTag, Vec<Vec<String>>)>,
}

impl KeywordClassifier {
    /// Builds a classifier from `subject -> keywords`. An empty table falls
    /// back to the built-in keywords.
    pub fn new(table: IndexMap<String, Vec<String>>) -> Self {
        if table.is_empty() {
            return Self::default();
        }
        let rules = table
            .into_iter()
            .map(|(subject, keywords)| {
                let keywords = keywords.iter().map(|k| words(k)).collect();
                (subject, keywords)
            })
            .collect();
        Self { rules }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        let rules = DEFAULT_SUBJECTS
            .iter()
            .map(|(subject, keywords)| {
                (
                    subject.to_string(),
                    keywords.iter().map(|k| words(k)).collect(),
                )
            })
            .collect();
        Self { rules }
    }
}

impl SubjectClassifier for KeywordClassifier {
    fn classify(&self, course: &Course) -> SubjectTag {
        let name = words(&course.course_name);
        self.rules
            .iter()
            .find(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|k| !k.is_empty() && name.windows(k.len()).any(|w| w == k.as_slice()))
            })
            .map(|(subject, _)| subject.clone())
            .unwrap_or_else(|| OTHER_SUBJECT.to_string())
    }
}
