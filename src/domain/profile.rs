//! Patient profile types collected by the intake form.
//!
//! `IntakeDraft` is the raw text the form holds while the user types.
//! `PatientProfile` is the validated record handed to the export and the dashboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Gender options offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Wire value used in exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// ABO/Rh blood groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.as_str()
    }
}

/// Self-reported physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    SuperActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::SuperActive,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly_active",
            Self::ModeratelyActive => "moderately_active",
            Self::VeryActive => "very_active",
            Self::SuperActive => "super_active",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (Little to no exercise)",
            Self::LightlyActive => "Lightly Active (1-3 days/week)",
            Self::ModeratelyActive => "Moderately Active (3-5 days/week)",
            Self::VeryActive => "Very Active (6-7 days/week)",
            Self::SuperActive => "Super Active (Athletic level)",
        }
    }
}

/// Error returned when an enumerated value does not match any known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! impl_option_parsing {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_option_parsing!(Gender, "gender");
impl_option_parsing!(BloodGroup, "blood group");
impl_option_parsing!(ActivityLevel, "activity level");

/// Substance use flags. Exported as a single JSON object value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstanceUse {
    pub smoking: bool,
    pub alcohol: bool,
}

/// Validated intake submission.
///
/// Numeric fields stay text-encoded exactly as entered; the metrics deriver parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub patient_name: String,
    pub age: String,
    pub gender: Gender,
    /// Body weight in kilograms
    pub weight: String,
    /// Height in centimetres
    pub height: String,
    pub blood_group: BloodGroup,
    pub medical_conditions: String,
    pub allergies: String,
    pub medications: String,
    pub substances: SubstanceUse,
    pub physical_activity: ActivityLevel,
    pub emergency_contact: String,
}

impl PatientProfile {
    /// First character of the name, used as an avatar on the dashboard.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.patient_name.trim().chars().next()
    }
}

/// Raw form contents before validation.
///
/// Enumerated fields are `None` until the user picks an option.
#[derive(Debug, Clone, Default)]
pub struct IntakeDraft {
    pub patient_name: String,
    pub age: String,
    pub gender: Option<Gender>,
    pub weight: String,
    pub height: String,
    pub blood_group: Option<BloodGroup>,
    pub medical_conditions: String,
    pub allergies: String,
    pub medications: String,
    pub substances: SubstanceUse,
    pub physical_activity: Option<ActivityLevel>,
    pub emergency_contact: String,
}

fn check_number(label: &str, raw: &str, min: f64, max: f64, errors: &mut Vec<String>) {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && (min..=max).contains(&v) => {}
        Ok(_) => errors.push(format!("{label}: Value must be between {min} and {max}")),
        Err(_) => errors.push(format!("{label}: Invalid number")),
    }
}

/// Export lines are `key,value`; a control character would split or forge a line.
fn check_single_line(label: &str, raw: &str, errors: &mut Vec<String>) {
    if raw.chars().any(char::is_control) {
        errors.push(format!("{label}: Line breaks and control characters are not allowed"));
    }
}

impl IntakeDraft {
    /// Validate the draft and produce a profile.
    ///
    /// # Errors
    /// Returns every violation found, in form order.
    pub fn validate(&self) -> Result<PatientProfile, Vec<String>> {
        let mut errors = Vec::new();

        if self.patient_name.trim().is_empty() {
            errors.push("Patient Name: Required".to_string());
        }

        match self.age.trim().parse::<u32>() {
            Ok(age) if age <= 150 => {}
            Ok(_) => errors.push("Age: Value must be between 0 and 150".to_string()),
            Err(_) => errors.push("Age: Invalid whole number".to_string()),
        }

        if self.gender.is_none() {
            errors.push("Gender: Select an option".to_string());
        }

        check_number("Body Weight", &self.weight, 0.0, 500.0, &mut errors);
        check_number("Height", &self.height, 0.0, 300.0, &mut errors);

        if self.blood_group.is_none() {
            errors.push("Blood Group: Select an option".to_string());
        }
        if self.physical_activity.is_none() {
            errors.push("Physical Activity: Select an option".to_string());
        }

        for (label, raw) in [
            ("Patient Name", &self.patient_name),
            ("Medical Conditions", &self.medical_conditions),
            ("Allergies", &self.allergies),
            ("Medications", &self.medications),
        ] {
            check_single_line(label, raw, &mut errors);
        }

        let contact = self.emergency_contact.trim();
        if contact.len() != 10 || !contact.bytes().all(|b| b.is_ascii_digit()) {
            errors.push("Emergency Contact: Please enter a valid 10-digit phone number".to_string());
        }

        let (Some(gender), Some(blood_group), Some(physical_activity)) =
            (self.gender, self.blood_group, self.physical_activity)
        else {
            return Err(errors);
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PatientProfile {
            patient_name: self.patient_name.trim().to_string(),
            age: self.age.trim().to_string(),
            gender,
            weight: self.weight.trim().to_string(),
            height: self.height.trim().to_string(),
            blood_group,
            medical_conditions: self.medical_conditions.clone(),
            allergies: self.allergies.clone(),
            medications: self.medications.clone(),
            substances: self.substances,
            physical_activity,
            emergency_contact: contact.to_string(),
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_draft() -> IntakeDraft {
    IntakeDraft {
        patient_name: "Jane Doe".to_string(),
        age: "34".to_string(),
        gender: Some(Gender::Female),
        weight: "65".to_string(),
        height: "170".to_string(),
        blood_group: Some(BloodGroup::OPositive),
        medical_conditions: "None".to_string(),
        allergies: "Penicillin".to_string(),
        medications: "None".to_string(),
        substances: SubstanceUse {
            smoking: false,
            alcohol: true,
        },
        physical_activity: Some(ActivityLevel::ModeratelyActive),
        emergency_contact: "5551234567".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_draft_produces_profile() {
        let profile = sample_draft().validate().expect("Should validate");
        assert_eq!(profile.patient_name, "Jane Doe");
        assert_eq!(profile.blood_group, BloodGroup::OPositive);
        assert!(profile.substances.alcohol);
        assert_eq!(profile.initial(), Some('J'));
    }

    #[test]
    fn test_line_breaks_in_free_text_rejected() {
        let mut draft = sample_draft();
        draft.allergies = "pollen\nmedications,forged".to_string();
        draft.medical_conditions = "asthma\r".to_string();
        let errors = draft.validate().expect_err("Should fail");
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.starts_with("Allergies")));
        assert!(errors.iter().any(|e| e.starts_with("Medical Conditions")));

        draft.allergies = "pollen, dust".to_string();
        draft.medical_conditions = "asthma".to_string();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_empty_draft_reports_every_missing_field() {
        let errors = IntakeDraft::default().validate().expect_err("Should fail");
        assert!(errors.iter().any(|e| e.starts_with("Patient Name")));
        assert!(errors.iter().any(|e| e.starts_with("Gender")));
        assert!(errors.iter().any(|e| e.starts_with("Blood Group")));
        assert!(errors.iter().any(|e| e.starts_with("Physical Activity")));
        assert!(errors.iter().any(|e| e.starts_with("Emergency Contact")));
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn test_out_of_range_numbers_rejected() {
        let mut draft = sample_draft();
        draft.age = "151".to_string();
        draft.weight = "501".to_string();
        draft.height = "abc".to_string();
        let errors = draft.validate().expect_err("Should fail");
        assert_eq!(errors.len(), 3);
        assert!(errors[2].contains("Invalid number"));
    }

    #[test]
    fn test_emergency_contact_must_be_ten_digits() {
        let mut draft = sample_draft();
        draft.emergency_contact = "555-123-45".to_string();
        assert!(draft.validate().is_err());

        draft.emergency_contact = "555123456".to_string();
        assert!(draft.validate().is_err());

        draft.emergency_contact = " 5551234567 ".to_string();
        assert_eq!(
            draft.validate().expect("Should trim").emergency_contact,
            "5551234567"
        );
    }

    #[test]
    fn test_option_parsing() {
        assert_eq!("AB-".parse::<BloodGroup>(), Ok(BloodGroup::AbNegative));
        assert_eq!("Female".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!(
            "very_active".parse::<ActivityLevel>(),
            Ok(ActivityLevel::VeryActive)
        );
        assert!("C+".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn test_profile_serializes_with_form_keys() {
        let profile = sample_draft().validate().expect("Should validate");
        let json = serde_json::to_value(&profile).expect("Should serialize");
        assert_eq!(json["patientName"], "Jane Doe");
        assert_eq!(json["bloodGroup"], "O+");
        assert_eq!(json["physicalActivity"], "moderately_active");
        assert_eq!(json["substances"]["alcohol"], true);
    }
}
