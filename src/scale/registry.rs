use crate::error::{Error, Result};
use crate::scale::GradingScale;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Grading scales keyed by school id.
///
/// Write-once per id: replacing a scale takes an explicit [`unregister`]
/// followed by [`register`], and both steps are logged.
///
/// [`register`]: GradingScaleRegistry::register
/// [`unregister`]: GradingScaleRegistry::unregister
#[derive(Debug, Default, Clone)]
pub struct GradingScaleRegistry {
    scales: BTreeMap<String, GradingScale>,
}

impl GradingScaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a scale. Fails with [`Error::DuplicateSchool`] rather than overwriting.
    pub fn register(&mut self, school_id: &str, scale: GradingScale) -> Result<()> {
        if self.scales.contains_key(school_id) {
            return Err(Error::DuplicateSchool(school_id.to_string()));
        }
        debug!(
            school_id,
            scale = scale.name(),
            numeric = scale.is_numeric(),
            "Registering grading scale"
        );
        self.scales.insert(school_id.to_string(), scale);
        Ok(())
    }

    pub fn lookup(&self, school_id: &str) -> Result<&GradingScale> {
        self.scales
            .get(school_id)
            .ok_or_else(|| Error::UnknownSchool(school_id.to_string()))
    }

    /// Removes and returns a scale, the first half of replacing it.
    pub fn unregister(&mut self, school_id: &str) -> Result<GradingScale> {
        let scale = self
            .scales
            .remove(school_id)
            .ok_or_else(|| Error::UnknownSchool(school_id.to_string()))?;
        info!(school_id, scale = scale.name(), "Unregistered grading scale");
        Ok(scale)
    }

    /// Registered school ids, sorted.
    pub fn schools(&self) -> impl Iterator<Item = &str> {
        self.scales.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GradingScale)> {
        self.scales.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }
}
