use crate::analyzers::types::{RigorCount, YearRigor};
use crate::transcript::{AcademicYear, Rigor};
use std::collections::BTreeMap;

/// Tallies rigor tiers per year, in tier order.
pub fn rigor_progression(years: &[AcademicYear]) -> Vec<YearRigor> {
    years
        .iter()
        .map(|year| {
            let mut counts: BTreeMap<Rigor, usize> = BTreeMap::new();
            for course in &year.courses {
                *counts.entry(course.rigor).or_default() += 1;
            }
            YearRigor {
                year: year.year_label.clone(),
                courses: counts
                    .into_iter()
                    .map(|(rigor, count)| RigorCount { rigor, count })
                    .collect(),
            }
        })
        .collect()
}
