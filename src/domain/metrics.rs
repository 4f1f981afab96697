//! Derived body metrics.
//!
//! BMI is computed from the text-encoded height and weight of a profile.
//! The deriver never fails: invalid input yields a non-finite value.

use serde::{Deserialize, Serialize};

/// BMI classification by fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// 18.5 up to (not including) 25
    Normal,
    /// 25 up to (not including) 30
    Overweight,
    /// 30 and above
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value.
    ///
    /// Thresholds are checked in ascending order, so NaN falls through to `Obese`.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Underweight => (59, 130, 246), // Blue (#3B82F6)
            Self::Normal => (16, 185, 129),      // Emerald (#10B981)
            Self::Overweight => (251, 191, 36),  // Amber (#FBBF24)
            Self::Obese => (244, 63, 94),        // Rose (#F43F5E)
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Underweight => write!(f, "Underweight"),
            Self::Normal => write!(f, "Normal weight"),
            Self::Overweight => write!(f, "Overweight"),
            Self::Obese => write!(f, "Obese"),
        }
    }
}

/// BMI plus its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl DerivedMetrics {
    /// Wrap a raw BMI value.
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        Self {
            bmi,
            category: BmiCategory::from_bmi(bmi),
        }
    }

    /// Whether the value is worth displaying (finite and positive).
    #[must_use]
    pub fn is_meaningful(&self) -> bool {
        self.bmi.is_finite() && self.bmi > 0.0
    }

    /// BMI rounded to one decimal for display.
    #[must_use]
    pub fn bmi_display(&self) -> String {
        format!("{:.1}", self.bmi)
    }
}

/// Read a text-encoded number the way the form stores it.
///
/// Blank reads as zero; anything unparsable reads as NaN.
fn read_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Compute BMI from height in centimetres and weight in kilograms.
#[must_use]
pub fn derive_metrics(height_cm: &str, weight_kg: &str) -> DerivedMetrics {
    let height_m = read_number(height_cm) / 100.0;
    let weight = read_number(weight_kg);
    DerivedMetrics::from_bmi(weight / (height_m * height_m))
}

/// One point of the synthetic BMI trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub bmi: f64,
}

/// Offsets applied to the current BMI to fake a four-month history.
const TREND_OFFSETS: [(&str, f64); 4] = [("Jan", -0.5), ("Feb", -0.3), ("Mar", -0.1), ("Apr", 0.0)];

/// Synthetic series ending at the current BMI. Not historical data.
#[must_use]
pub fn bmi_trend(bmi: f64) -> Vec<TrendPoint> {
    TREND_OFFSETS
        .iter()
        .map(|&(month, offset)| TrendPoint {
            month,
            bmi: bmi + offset,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_bmi_formula() {
        let m = derive_metrics("180", "81");
        assert!((m.bmi - 25.0).abs() < 1e-9);
        assert_eq!(m.category, BmiCategory::Overweight);
        assert_eq!(m.bmi_display(), "25.0");

        let m = derive_metrics("170", "65");
        assert!((m.bmi - 65.0 / (1.7 * 1.7)).abs() < 1e-9);
        assert_eq!(m.category, BmiCategory::Normal);
        assert!(m.is_meaningful());
    }

    #[test]
    fn test_bmi_is_deterministic() {
        assert_eq!(derive_metrics("165.5", "72.3"), derive_metrics("165.5", "72.3"));
    }

    #[test]
    fn test_invalid_input_is_not_meaningful() {
        assert!(!derive_metrics("", "70").is_meaningful());
        assert!(!derive_metrics("abc", "70").is_meaningful());
        assert!(!derive_metrics("170", "-5").is_meaningful());
        assert_eq!(derive_metrics("abc", "70").category, BmiCategory::Obese);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(BmiCategory::Normal.to_string(), "Normal weight");
        assert_eq!(BmiCategory::Obese.to_string(), "Obese");
    }

    #[test]
    fn test_trend_ends_at_current_bmi() {
        let trend = bmi_trend(22.0);
        assert_eq!(trend.len(), 4);
        assert_eq!(trend[0].month, "Jan");
        assert!((trend[0].bmi - 21.5).abs() < 1e-9);
        assert!((trend[3].bmi - 22.0).abs() < f64::EPSILON);
    }
}
