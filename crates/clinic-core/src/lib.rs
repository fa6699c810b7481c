//! Clinic Records Core Library
//!
//! Patient and appointment record keeping for a small clinic.
//!
//! # Architecture
//!
//! ```text
//! user input
//!     │
//!     ▼
//!  parser ──► AnyCommand ──execute──► Model (filters, revision)
//!                                       │
//!                                       ▼
//!                         ┌─────────────────────────────┐
//!                         │         AddressBook         │
//!                         │  PatientRegistry            │
//!                         │  AppointmentRegistry        │
//!                         │  AppointmentViews (derived) │
//!                         └──────────────┬──────────────┘
//!                                        │
//!                                        ▼
//!                               storage (JSON snapshot)
//! ```
//!
//! # Core Principle
//!
//! **Every mutation goes through [`AddressBook`].** It checks all
//! preconditions before touching a registry and recomputes the appointment
//! views before returning, so a failed call leaves nothing half-applied.
//!
//! # Modules
//!
//! - [`models`]: Validated value types (Nric, Date, TimePeriod, Patient, Appointment, ...)
//! - [`registry`]: Ordered patient and appointment collections plus the view projection
//! - [`book`]: The `AddressBook` aggregate root
//! - [`model`]: Address book with list filters
//! - [`commands`]: User-level commands
//! - [`parser`]: Command-line syntax
//! - [`storage`]: JSON persistence
//! - [`logic`]: Parse, execute and save in one call
//! - [`config`], [`logging`]: Runtime setup

pub mod book;
pub mod commands;
pub mod config;
pub mod logging;
pub mod logic;
pub mod model;
pub mod models;
pub mod parser;
pub mod registry;
pub mod storage;

// Re-export commonly used types
pub use book::{AddressBook, BookError, BookResult, ReadOnlyAddressBook};
pub use commands::{AnyCommand, Command, CommandError, CommandResult};
pub use config::{ClinicConfig, ConfigError};
pub use logging::{init_from_config, init_logging, LoggingError};
pub use logic::{Logic, LogicError};
pub use model::{AppointmentFilter, Model, PatientFilter};
pub use models::{
    Address, Appointment, AppointmentType, AppointmentView, Date, Email, Mark, Name, Note, Nric,
    Patient, Phone, Time, TimePeriod, ValidationError,
};
pub use parser::{parse_command, ParseError};
pub use registry::{AppointmentRegistry, AppointmentViews, PatientRegistry, RegistryError};
pub use storage::{AddressBookStorage, JsonAddressBookStorage, StorageError};

/// Crate version, as built.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
