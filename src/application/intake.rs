//! Intake service: Validates a form draft, exports it and hands it downstream.
//!
//! Order on submit:
//! - Validate the draft into a profile
//! - Render the `key,value` export and deliver it as `health_data_<millis>.csv`
//! - Forward the profile to the consumer exactly once

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::export::{export_file_name, render_export};
use crate::domain::{IntakeDraft, PatientProfile};
use crate::ports::{DownloadSink, ProfileConsumer};
use crate::HealthError;

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct IntakeReceipt {
    pub file_name: String,
    pub path: PathBuf,
    pub profile: PatientProfile,
}

/// Service for health-data intake.
pub struct IntakeService<D>
where
    D: DownloadSink,
{
    sink: Arc<D>,
}

impl<D> IntakeService<D>
where
    D: DownloadSink,
    D::Error: Into<HealthError>,
{
    pub fn new(sink: Arc<D>) -> Self {
        Self { sink }
    }

    /// Submit a draft using the current time for the export name.
    ///
    /// # Errors
    /// Returns validation errors, or the delivery error if the export cannot be written.
    /// The consumer is not called on error.
    pub fn submit<C>(&self, draft: &IntakeDraft, consumer: &mut C) -> Result<IntakeReceipt, HealthError>
    where
        C: ProfileConsumer + ?Sized,
    {
        self.submit_at(draft, consumer, chrono::Utc::now().timestamp_millis())
    }

    /// Submit a draft, naming the export after `millis`.
    ///
    /// # Errors
    /// See [`IntakeService::submit`].
    pub fn submit_at<C>(
        &self,
        draft: &IntakeDraft,
        consumer: &mut C,
        millis: i64,
    ) -> Result<IntakeReceipt, HealthError>
    where
        C: ProfileConsumer + ?Sized,
    {
        let profile = draft.validate().map_err(HealthError::Validation)?;

        let text = render_export(&profile)?;
        let file_name = export_file_name(millis);
        let path = self
            .sink
            .deliver(&file_name, text.as_bytes())
            .map_err(Into::<HealthError>::into)?;

        tracing::info!(file = %file_name, "Exported health data");

        consumer.consume(&profile);

        Ok(IntakeReceipt {
            file_name,
            path,
            profile,
        })
    }
}
