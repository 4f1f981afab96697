//! Intake port: downstream consumer of submitted profiles.

use crate::domain::PatientProfile;

/// Receives each successfully submitted profile.
pub trait ProfileConsumer {
    fn consume(&mut self, profile: &PatientProfile);
}
