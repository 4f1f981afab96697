//! Dashboard presenter: Profile plus derived metrics, ready for rendering.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::{
    bmi_trend, derive_metrics, DerivedMetrics, PatientProfile, TrendPoint, VitalReading,
    STATIC_VITALS,
};
use crate::ports::ProfileConsumer;

/// Upper bound (exclusive) of the numeric part of the display id.
const DISPLAY_ID_RANGE: u32 = 100_000;

/// What the dashboard shows for the current session.
#[derive(Debug, Clone, Default)]
pub struct DashboardModel {
    profile: Option<PatientProfile>,
    metrics: Option<DerivedMetrics>,
    display_id: Option<String>,
}

impl DashboardModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn profile(&self) -> Option<&PatientProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub fn metrics(&self) -> Option<DerivedMetrics> {
        self.metrics
    }

    /// Cosmetic patient id, `P<n>`. Drawn once per received profile.
    #[must_use]
    pub fn display_id(&self) -> Option<&str> {
        self.display_id.as_deref()
    }

    /// Vital cards in display order; blood group comes from the profile.
    #[must_use]
    pub fn vitals(&self) -> Vec<VitalReading> {
        let mut cards = STATIC_VITALS.to_vec();
        if let Some(profile) = &self.profile {
            cards.insert(
                4,
                VitalReading {
                    label: "Blood Group",
                    value: profile.blood_group.as_str(),
                    unit: "Type",
                    status: None,
                },
            );
        }
        cards
    }

    /// Synthetic BMI history for the chart.
    #[must_use]
    pub fn trend(&self) -> Vec<TrendPoint> {
        self.metrics.map(|m| bmi_trend(m.bmi)).unwrap_or_default()
    }
}

impl ProfileConsumer for DashboardModel {
    fn consume(&mut self, profile: &PatientProfile) {
        let metrics = derive_metrics(&profile.height, &profile.weight);
        let mut rng = ChaCha20Rng::from_entropy();

        self.display_id = Some(format!("P{}", rng.gen_range(0..DISPLAY_ID_RANGE)));
        self.metrics = Some(metrics);
        self.profile = Some(profile.clone());

        tracing::debug!(category = %metrics.category, "Dashboard metrics recomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample_draft, BmiCategory};

    #[test]
    fn test_empty_dashboard() {
        let model = DashboardModel::new();
        assert!(model.profile().is_none());
        assert!(model.metrics().is_none());
        assert!(model.trend().is_empty());
        assert_eq!(model.vitals().len(), 5);
    }

    #[test]
    fn test_consume_derives_metrics() {
        let mut model = DashboardModel::new();
        let profile = sample_draft().validate().expect("Should validate");
        model.consume(&profile);

        let metrics = model.metrics().expect("Should have metrics");
        assert_eq!(metrics.category, BmiCategory::Normal);
        assert_eq!(metrics.bmi_display(), "22.5");

        let id = model.display_id().expect("Should have id");
        assert!(id.starts_with('P'));
        assert!(id[1..].parse::<u32>().expect("Numeric id") < DISPLAY_ID_RANGE);
    }

    #[test]
    fn test_vitals_include_blood_group() {
        let mut model = DashboardModel::new();
        model.consume(&sample_draft().validate().expect("Should validate"));

        let vitals = model.vitals();
        assert_eq!(vitals.len(), 6);
        assert_eq!(vitals[4].label, "Blood Group");
        assert_eq!(vitals[4].value, "O+");
        assert_eq!(vitals[5].label, "Oxygen Level");
    }

    #[test]
    fn test_new_profile_replaces_metrics() {
        let mut model = DashboardModel::new();
        let mut draft = sample_draft();
        model.consume(&draft.validate().expect("Should validate"));

        draft.weight = "100".to_string();
        model.consume(&draft.validate().expect("Should validate"));
        assert_eq!(model.metrics().map(|m| m.category), Some(BmiCategory::Obese));
        assert_eq!(model.trend().len(), 4);
    }
}
