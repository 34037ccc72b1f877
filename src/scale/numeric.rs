//! Raw-score (0–100) grading as a piecewise-linear map onto the 4.0 scale.

use crate::scale::NORMALIZED_CEILING;
use indexmap::IndexMap;

/// Scores from `min` up to the next band's `min` form one band, worth
/// `points` at its midpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBand {
    pub min: f64,
    pub points: f64,
}

/// Bands used by the 100-point schools: 90-100 = A, 80-89 = B, ...
static STANDARD_BANDS: &[(f64, f64)] = &[
    (90.0, 4.0),
    (80.0, 3.0),
    (70.0, 2.0),
    (60.0, 1.0),
    (0.0, 0.0),
];

/// Raw scores mapped onto the 4.0 scale by linear interpolation between
/// band corners. The lowest band's corner sits at its `min`, every other
/// band's at its midpoint, and `max_score` maps to the 4.3 ceiling, so the
/// map is strictly increasing: a higher raw score always earns more points.
///
/// With the standard bands: 65 → 1.0, 85 → 3.0, 95 → 4.0, 100 → 4.3.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericScale {
    /// Sorted by `min`, highest first.
    bands: Vec<NumericBand>,
    max_score: f64,
    /// Representative raw score for letter grades on an otherwise numeric transcript.
    letter_equivalents: IndexMap<String, f64>,
}

impl NumericScale {
    pub fn new(mut bands: Vec<NumericBand>, max_score: f64) -> Self {
        bands.sort_by(|a, b| b.min.total_cmp(&a.min));
        NumericScale {
            bands,
            max_score,
            letter_equivalents: IndexMap::new(),
        }
    }

    /// 90/80/70/60 bands without plus/minus, capped at 100.
    pub fn standard() -> Self {
        let bands = STANDARD_BANDS
            .iter()
            .map(|&(min, points)| NumericBand { min, points })
            .collect();
        Self::new(bands, 100.0)
    }

    pub fn with_letter_equivalents<I, S>(mut self, letters: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.letter_equivalents
            .extend(letters.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }

    pub fn bands(&self) -> &[NumericBand] {
        &self.bands
    }

    pub fn max_score(&self) -> f64 {
        self.max_score
    }

    /// Inclusive range of scores that resolve.
    pub fn domain(&self) -> (f64, f64) {
        let low = self.bands.last().map_or(0.0, |b| b.min);
        (low, self.max_score)
    }

    /// Interpolation corners `(score, points)`, lowest score first.
    fn corners(&self) -> Vec<(f64, f64)> {
        let mut corners = Vec::with_capacity(self.bands.len() + 1);
        let mut upper_min = self.max_score;
        for (i, band) in self.bands.iter().enumerate() {
            let x = if i + 1 == self.bands.len() {
                band.min
            } else {
                (band.min + upper_min) / 2.0
            };
            corners.push((x, band.points));
            upper_min = band.min;
        }
        corners.reverse();
        if let Some(&(top, _)) = corners.last() {
            if self.max_score > top {
                corners.push((self.max_score, NORMALIZED_CEILING));
            }
        }
        corners
    }

    /// Maps any raw value, bonus points included, onto the reference scale.
    /// Values past the last corner continue along the top slope.
    pub fn to_reference(&self, value: f64) -> f64 {
        let corners = self.corners();
        match corners.len() {
            0 => 0.0,
            1 => corners[0].1,
            n => {
                let i = corners
                    .windows(2)
                    .position(|w| value <= w[1].0)
                    .unwrap_or(n - 2);
                let ((x0, y0), (x1, y1)) = (corners[i], corners[i + 1]);
                y0 + (value - x0) / (x1 - x0) * (y1 - y0)
            }
        }
    }

    /// 4.0-scale points for a raw score, or `None` outside the domain.
    pub fn points(&self, score: f64) -> Option<f64> {
        let (low, high) = self.domain();
        if self.bands.is_empty() || !score.is_finite() || score < low || score > high {
            return None;
        }
        Some(self.to_reference(score))
    }

    /// Raw score standing in for a letter grade, if the school declares one.
    pub fn letter_score(&self, letter: &str) -> Option<f64> {
        self.letter_equivalents.get(letter).copied()
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        let Some(top) = self.bands.first() else {
            return Err("numeric scale has no bands".into());
        };
        for band in &self.bands {
            if !band.min.is_finite() || !(0.0..=NORMALIZED_CEILING).contains(&band.points) {
                return Err(format!(
                    "band starting at {} has points {} outside 0..={NORMALIZED_CEILING}",
                    band.min, band.points
                ));
            }
        }
        for pair in self.bands.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if upper.min == lower.min {
                return Err(format!("two bands start at {}", upper.min));
            }
            if upper.points <= lower.points {
                return Err(format!(
                    "band at {} must earn more points than the band below it",
                    upper.min
                ));
            }
        }
        if !self.max_score.is_finite() || self.max_score < top.min {
            return Err(format!(
                "max score {} is below the top band",
                self.max_score
            ));
        }
        if self.max_score > top.min && top.points >= NORMALIZED_CEILING {
            return Err(format!(
                "top band earns {}, leaving no room below the {NORMALIZED_CEILING} ceiling",
                top.points
            ));
        }
        for (letter, score) in &self.letter_equivalents {
            if self.points(*score).is_none() {
                return Err(format!(
                    "letter '{letter}' maps to {score}, outside the numeric domain"
                ));
            }
        }
        Ok(())
    }
}
