//! Confidence module

use std::fmt;

/// Strength of a rule or a recommendation, always within [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    /// Full confidence
    pub const ONE: Confidence = Confidence(1.0);

    /// No confidence
    pub const ZERO: Confidence = Confidence(0.0);

    /// Create a confidence value
    ///
    /// # Errors
    /// Returns error if the value is not finite or outside [0, 1]
    pub fn new(value: f64) -> Result<Self, String> {
        if !value.is_finite() {
            return Err(format!("Confidence must be finite, got {}", value));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("Confidence must be in [0, 1], got {}", value));
        }
        Ok(Self(value))
    }

    /// Saturate an arbitrary score into [0, 1]. NaN maps to zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use proprel_domain::Confidence;
    ///
    /// assert_eq!(Confidence::clamped(1.7).value(), 1.0);
    /// assert_eq!(Confidence::clamped(-0.3).value(), 0.0);
    /// assert_eq!(Confidence::clamped(0.4).value(), 0.4);
    /// ```
    pub fn clamped(score: f64) -> Self {
        if score.is_nan() {
            return Self::ZERO;
        }
        Self(score.clamp(0.0, 1.0))
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
