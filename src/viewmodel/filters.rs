use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Record;

pub const HEIGHT_BOUNDS: ValueRange = ValueRange { min: 0, max: 20 };
pub const WEIGHT_BOUNDS: ValueRange = ValueRange { min: 0, max: 1000 };

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid {label} range {min}-{max}: MIN must not exceed MAX")]
    InvertedRange {
        label: &'static str,
        min: u32,
        max: u32,
    },

    #[error("{label} range {min}-{max} is outside {lower}-{upper}")]
    OutOfBounds {
        label: &'static str,
        min: u32,
        max: u32,
        lower: u32,
        upper: u32,
    },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },
}

/// Inclusive `min..=max` constraint on a record attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    /// Builds a range after checking `min <= max` and that both ends sit
    /// inside `bounds`.
    pub fn bounded(
        min: u32,
        max: u32,
        bounds: ValueRange,
        label: &'static str,
    ) -> Result<Self, FilterError> {
        if min > max {
            return Err(FilterError::InvertedRange { label, min, max });
        }
        if min < bounds.min || max > bounds.max {
            return Err(FilterError::OutOfBounds {
                label,
                min,
                max,
                lower: bounds.min,
                upper: bounds.max,
            });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Empty means any type.
    pub type_name: String,
    pub height_range: ValueRange,
    pub weight_range: ValueRange,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            type_name: String::new(),
            height_range: HEIGHT_BOUNDS,
            weight_range: WEIGHT_BOUNDS,
        }
    }
}

impl FilterConfig {
    pub fn matches(&self, record: &Record) -> bool {
        let type_ok = self.type_name.is_empty() || record.primary_type_name == self.type_name;
        type_ok
            && self.height_range.contains(record.height_units)
            && self.weight_range.contains(record.weight_units)
    }

    /// Re-checks both ranges against their bounds.
    pub fn validate(&self) -> Result<(), FilterError> {
        let h = self.height_range;
        let w = self.weight_range;
        ValueRange::bounded(h.min, h.max, HEIGHT_BOUNDS, "height")?;
        ValueRange::bounded(w.min, w.max, WEIGHT_BOUNDS, "weight")?;
        Ok(())
    }

    pub fn is_unconstrained(&self) -> bool {
        self == &FilterConfig::default()
    }

    /// Short `key=value` summary of the active constraints, `None` when
    /// nothing is constrained.
    pub fn summary(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if !self.type_name.is_empty() {
            parts.push(format!("type={}", self.type_name));
        }
        if self.height_range != HEIGHT_BOUNDS {
            parts.push(format!(
                "height={}-{}",
                self.height_range.min, self.height_range.max
            ));
        }
        if self.weight_range != WEIGHT_BOUNDS {
            parts.push(format!(
                "weight={}-{}",
                self.weight_range.min, self.weight_range.max
            ));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}
