//! # HealthMoniTree
//!
//! Local health-monitoring terminal application.
//!
//! This crate provides:
//! - A health-data intake form that exports each submission to a `key,value` file
//! - A dashboard deriving BMI and its category from the submitted profile
//! - An emergency panel with a map widget gated on a configured credential
//! - A session-only register of uploaded patient documents
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (PatientProfile, DerivedMetrics, DocumentRecord)
//! - `ports`: Trait definitions for collaborators
//! - `adapters`: Concrete implementations (download directory, in-memory store, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Startup configuration passed into the shell
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use config::AppConfig;
pub use domain::{derive_metrics, BmiCategory, DerivedMetrics, DocumentRecord, PatientProfile};

/// Result type for HealthMoniTree operations
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for HealthMoniTree
#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("Invalid health data: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Download failed: {0}")]
    Download(#[from] adapters::DownloadError),

    #[error("Document register error: {0}")]
    Store(#[from] adapters::StoreError),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("No file available for document: {0}")]
    MissingFile(String),

    #[error("Unsupported file type: {0} (accepted: .pdf, .doc, .docx, .jpg, .png)")]
    UnsupportedFile(String),

    #[error("No file selected")]
    NoFileSelected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
