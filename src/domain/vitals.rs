//! Vital-sign cards shown on the dashboard.
//!
//! These are fixed demo values, not measurements.

/// Status badge on a vital card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VitalStatus {
    Normal,
    High,
}

impl std::fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VitalReading {
    pub label: &'static str,
    pub value: &'static str,
    pub unit: &'static str,
    pub status: Option<VitalStatus>,
}

pub const STATIC_VITALS: [VitalReading; 5] = [
    VitalReading {
        label: "Blood Pressure",
        value: "120/80",
        unit: "mmHg",
        status: Some(VitalStatus::High),
    },
    VitalReading {
        label: "Heart Rate",
        value: "72",
        unit: "bpm",
        status: Some(VitalStatus::Normal),
    },
    VitalReading {
        label: "Blood Sugar",
        value: "95",
        unit: "mg/dL",
        status: Some(VitalStatus::Normal),
    },
    VitalReading {
        label: "Temperature",
        value: "36.6°C",
        unit: "Celsius",
        status: None,
    },
    VitalReading {
        label: "Oxygen Level",
        value: "98%",
        unit: "SpO2",
        status: None,
    },
];
