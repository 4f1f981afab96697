//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the intake, dashboard and document-register use cases.

mod dashboard;
mod intake;
mod records;

pub use dashboard::DashboardModel;
pub use intake::{IntakeReceipt, IntakeService};
pub use records::RecordsService;
