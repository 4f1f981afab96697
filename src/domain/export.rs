//! Line-oriented `key,value` export of a patient profile.
//!
//! Values are written verbatim. Commas inside free-text values are not escaped, so a
//! reader must split each line on the first comma only.

use super::profile::PatientProfile;

/// Keys in export order.
pub const EXPORT_KEYS: [&str; 12] = [
    "patientName",
    "age",
    "gender",
    "weight",
    "height",
    "bloodGroup",
    "medicalConditions",
    "allergies",
    "medications",
    "substances",
    "physicalActivity",
    "emergencyContact",
];

/// Flatten a profile into `(key, value)` pairs in export order.
///
/// # Errors
/// Returns error if the substance flags cannot be encoded as JSON.
pub fn export_fields(profile: &PatientProfile) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
    let substances = serde_json::to_string(&profile.substances)?;
    let values = [
        profile.patient_name.clone(),
        profile.age.clone(),
        profile.gender.as_str().to_string(),
        profile.weight.clone(),
        profile.height.clone(),
        profile.blood_group.as_str().to_string(),
        profile.medical_conditions.clone(),
        profile.allergies.clone(),
        profile.medications.clone(),
        substances,
        profile.physical_activity.as_str().to_string(),
        profile.emergency_contact.clone(),
    ];
    Ok(EXPORT_KEYS.into_iter().zip(values).collect())
}

/// Render the export text: one `key,value` line per field joined by `\n`.
///
/// # Errors
/// Returns error if the substance flags cannot be encoded as JSON.
pub fn render_export(profile: &PatientProfile) -> Result<String, serde_json::Error> {
    Ok(export_fields(profile)?
        .into_iter()
        .map(|(key, value)| format!("{key},{value}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

/// File name for an export taken at `millis` (Unix epoch milliseconds).
#[must_use]
pub fn export_file_name(millis: i64) -> String {
    format!("health_data_{millis}.csv")
}
