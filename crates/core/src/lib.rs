//! # Front Desk Core
//!
//! Core business logic for the hospital front-desk system.
//!
//! This crate contains the store access layer and domain services:
//! - SQLite schema and idempotent seed routines for `patients` and `users`
//! - The patient registry (list, fetch, create, update)
//! - Staff credential checks and the server-tracked session payload
//!
//! **No API concerns**: routing, HTML rendering and cookie handling belong
//! to the server binary at the workspace root.

pub mod config;
pub mod error;
pub mod patient;
pub mod session;
pub mod staff;
pub mod store;

pub use config::CoreConfig;
pub use error::{FrontDeskError, FrontDeskResult};
pub use patient::{NewPatient, Patient, PatientRegistry, PatientUpdate};
pub use session::{StaffSession, SESSION_STAFF_KEY};
pub use staff::StaffUser;
