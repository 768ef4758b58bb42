//! Domains and Triangular Membership Functions

use serde::{Deserialize, Serialize};

use crate::error::{DomainBound, FuzzyError};

/// Inclusive integer range a linguistic variable is defined over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub min: i32,
    pub max: i32,
}

impl Domain {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Rejects `value` if it lies outside the domain of `variable`.
    pub fn check(&self, variable: &'static str, value: i32) -> Result<(), FuzzyError> {
        if value < self.min {
            return Err(FuzzyError::InvalidInput {
                variable,
                value,
                bound: DomainBound::Min(self.min),
            });
        }
        if value > self.max {
            return Err(FuzzyError::InvalidInput {
                variable,
                value,
                bound: DomainBound::Max(self.max),
            });
        }
        Ok(())
    }

    pub fn points(&self) -> impl Iterator<Item = i32> {
        self.min..=self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min as f64 + self.max as f64) / 2.0
    }
}

/// Triangular fuzzy set `(left, peak, right)`.
///
/// `left == peak` or `peak == right` gives a flat shoulder at a domain edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub left: f64,
    pub peak: f64,
    pub right: f64,
}

impl Triangle {
    pub const fn new(left: f64, peak: f64, right: f64) -> Self {
        Self { left, peak, right }
    }

    /// Degree of membership of `x`, always in `[0, 1]`.
    pub fn degree(&self, x: f64) -> f64 {
        if x < self.left || x > self.right {
            return 0.0;
        }
        if x == self.peak {
            return 1.0;
        }
        if x < self.peak {
            (x - self.left) / (self.peak - self.left)
        } else {
            (self.right - x) / (self.right - self.peak)
        }
    }

    /// Returns the reason the breakpoints are unusable within `domain`, if any.
    pub(crate) fn defect(&self, domain: &Domain) -> Option<String> {
        let Triangle { left, peak, right } = *self;
        if !(left.is_finite() && peak.is_finite() && right.is_finite()) {
            return Some("breakpoints must be finite".to_string());
        }
        if left > peak {
            return Some(format!("left foot {left} exceeds peak {peak}"));
        }
        if peak > right {
            return Some(format!("peak {peak} exceeds right foot {right}"));
        }
        if left < domain.min as f64 || right > domain.max as f64 {
            return Some(format!(
                "breakpoints [{left}, {peak}, {right}] leave domain {}..={}",
                domain.min, domain.max
            ));
        }
        None
    }
}
