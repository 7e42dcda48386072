//! Chairside Core Library
//!
//! Storage and business logic for a single-chair dental clinic: patient
//! registry, treatment history, appointment book, medicine inventory, and
//! the restocking list.
//!
//! # Architecture
//!
//! ```text
//!                    HTTP API (chairside-api)
//!                              │
//!                              ▼
//!                  ┌───────────────────────┐
//!                  │       Database        │
//!                  │   (SQLite, one file)  │
//!                  └───────────┬───────────┘
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//!      patients ──┐       appointments         medicines ──► expiry
//!                 │                                │          classify
//!      treatment  │                                ▼
//!       records ──┴──► VisitSummary        InventoryReport
//!                   (derived on read)
//!                          │
//!                          ▼
//!               roster::select_visits
//!               (day / month schedules)
//! ```
//!
//! # Core Principle
//!
//! **Visit state is derived, never stored.** A patient's current status,
//! treatment type, and next visit date are projections of their latest
//! treatment record; deleting or editing records changes them on the next
//! read with no repair step.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer, one submodule per table
//! - [`models`]: Domain types (Patient, TreatmentRecord, Appointment, Medicine, ShoppingItem)
//! - [`expiry`]: Expiry-date classification for the medicine inventory
//! - [`roster`]: Day and month visit roster selection
//! - [`inventory`]: Inventory alert report (expiring and low-stock views)

pub mod db;
pub mod expiry;
pub mod inventory;
pub mod models;
pub mod roster;

// Re-export commonly used types
pub use db::{Database, DbError, DbResult};
pub use inventory::InventoryReport;
pub use models::{
    Appointment, AppointmentStatus, Gender, Medicine, MedicineCategory, MedicineStatus, Patient,
    PatientProfile, PatientStatus, ShoppingItem, TreatmentRecord, TreatmentType, VisitSummary,
};
pub use roster::{RosterQuery, VisitOccurrence};
