//! Domain layer: Core types and pure logic.
//!
//! Nothing here touches the terminal or the filesystem.

pub mod document;
pub mod export;
mod metrics;
mod profile;
mod vitals;

pub use document::{DocumentPreview, DocumentRecord, FileHandle};
pub use metrics::{bmi_trend, derive_metrics, BmiCategory, DerivedMetrics, TrendPoint};
pub use profile::{
    ActivityLevel, BloodGroup, Gender, IntakeDraft, PatientProfile, SubstanceUse, UnknownOption,
};
pub use vitals::{VitalReading, VitalStatus, STATIC_VITALS};

#[cfg(test)]
pub(crate) use profile::sample_draft;
