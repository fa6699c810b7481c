//! User-level commands.
//!
//! A command holds already-validated arguments. `execute` re-checks domain
//! preconditions against the current [`Model`], performs at most one
//! mutation and returns the message to show the user.

mod appointment;
mod find;
mod list;
mod mark;
mod patient;

pub use appointment::*;
pub use find::*;
pub use list::*;
pub use mark::*;
pub use patient::*;

use thiserror::Error;
use tracing::{info, warn};

use crate::book::BookError;
use crate::model::Model;
use crate::models::{Date, ValidationError};
use crate::registry::{EntityKind, RegistryError};

/// Feedback returned by a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
        }
    }
}

/// User-facing command failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No patient with NRIC {0} exists in the clinic records")]
    PatientNotFound(String),

    #[error("The given appointment does not exist in the clinic records")]
    AppointmentNotFound,

    #[error("A patient with NRIC {0} already exists in the clinic records")]
    DuplicatePatient(String),

    #[error("This appointment already exists in the clinic records")]
    DuplicateAppointment,

    #[error("Appointment date {date} cannot be before the patient's date of birth {dob}")]
    InvalidAppointmentDate { date: Date, dob: Date },

    #[error("This appointment overlaps with another appointment of the same patient")]
    OverlappingAppointment,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<BookError> for CommandError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::Registry(RegistryError::DuplicateEntity { kind, key }) => match kind {
                EntityKind::Patient => CommandError::DuplicatePatient(key),
                EntityKind::Appointment => CommandError::DuplicateAppointment,
            },
            BookError::Registry(RegistryError::EntityNotFound { kind, key }) => match kind {
                EntityKind::Patient => CommandError::PatientNotFound(key),
                EntityKind::Appointment => CommandError::AppointmentNotFound,
            },
            BookError::PatientNotFound(nric) => CommandError::PatientNotFound(nric.to_string()),
            BookError::InvalidApptDate { date, dob } => {
                CommandError::InvalidAppointmentDate { date, dob }
            }
            BookError::OverlappingAppointment { .. } => CommandError::OverlappingAppointment,
        }
    }
}

pub type CommandOutcome = Result<CommandResult, CommandError>;

/// A single user intent executed against the model.
pub trait Command {
    fn execute(&self, model: &mut Model) -> CommandOutcome;
}

/// Any parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyCommand {
    AddPatient(AddPatientCommand),
    EditPatient(EditPatientCommand),
    DeletePatient(DeletePatientCommand),
    AddAppointment(AddAppointmentCommand),
    EditAppointment(EditAppointmentCommand),
    DeleteAppointment(DeleteAppointmentCommand),
    Mark(MarkCommand),
    Unmark(UnmarkCommand),
    FindPatient(FindPatientCommand),
    FindAppointment(FindAppointmentCommand),
    List(ListCommand),
    Clear(ClearCommand),
}

impl AnyCommand {
    pub fn command_word(&self) -> &'static str {
        match self {
            AnyCommand::AddPatient(_) => AddPatientCommand::COMMAND_WORD,
            AnyCommand::EditPatient(_) => EditPatientCommand::COMMAND_WORD,
            AnyCommand::DeletePatient(_) => DeletePatientCommand::COMMAND_WORD,
            AnyCommand::AddAppointment(_) => AddAppointmentCommand::COMMAND_WORD,
            AnyCommand::EditAppointment(_) => EditAppointmentCommand::COMMAND_WORD,
            AnyCommand::DeleteAppointment(_) => DeleteAppointmentCommand::COMMAND_WORD,
            AnyCommand::Mark(_) => MarkCommand::COMMAND_WORD,
            AnyCommand::Unmark(_) => UnmarkCommand::COMMAND_WORD,
            AnyCommand::FindPatient(_) => FindPatientCommand::COMMAND_WORD,
            AnyCommand::FindAppointment(_) => FindAppointmentCommand::COMMAND_WORD,
            AnyCommand::List(_) => ListCommand::COMMAND_WORD,
            AnyCommand::Clear(_) => ClearCommand::COMMAND_WORD,
        }
    }
}

impl Command for AnyCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        let outcome = match self {
            AnyCommand::AddPatient(cmd) => cmd.execute(model),
            AnyCommand::EditPatient(cmd) => cmd.execute(model),
            AnyCommand::DeletePatient(cmd) => cmd.execute(model),
            AnyCommand::AddAppointment(cmd) => cmd.execute(model),
            AnyCommand::EditAppointment(cmd) => cmd.execute(model),
            AnyCommand::DeleteAppointment(cmd) => cmd.execute(model),
            AnyCommand::Mark(cmd) => cmd.execute(model),
            AnyCommand::Unmark(cmd) => cmd.execute(model),
            AnyCommand::FindPatient(cmd) => cmd.execute(model),
            AnyCommand::FindAppointment(cmd) => cmd.execute(model),
            AnyCommand::List(cmd) => cmd.execute(model),
            AnyCommand::Clear(cmd) => cmd.execute(model),
        };

        match &outcome {
            Ok(_) => info!(command = self.command_word(), revision = model.revision(), "command executed"),
            Err(e) => warn!(command = self.command_word(), error = %e, "command rejected"),
        }
        outcome
    }
}
