//! Narrowing the listed patients and appointments.

use super::{Command, CommandOutcome, CommandResult};
use crate::model::{AppointmentFilter, Model, PatientFilter};

/// Lists patients whose name matches any keyword, or the patient with a given NRIC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindPatientCommand {
    filter: PatientFilter,
}

impl FindPatientCommand {
    pub const COMMAND_WORD: &'static str = "findpatient";
    pub const MESSAGE_USAGE: &'static str = "findpatient: Finds patients whose names contain any of the keywords, or the patient with the given NRIC.\n\
        Parameters: KEYWORD [MORE_KEYWORDS]... | i/NRIC\n\
        Example: findpatient alice bob charlie";

    pub fn new(filter: PatientFilter) -> Self {
        Self { filter }
    }
}

impl Command for FindPatientCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        model.update_patient_filter(self.filter.clone());
        let count = model.filtered_patients().len();
        Ok(CommandResult::new(format!("{count} patients listed!")))
    }
}

/// Lists appointments of one patient, on one date, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindAppointmentCommand {
    filter: AppointmentFilter,
}

impl FindAppointmentCommand {
    pub const COMMAND_WORD: &'static str = "findappt";
    pub const MESSAGE_USAGE: &'static str = "findappt: Finds appointments by patient NRIC, by date, or both.\n\
        Parameters: [i/NRIC] [d/DATE]\n\
        Example: findappt i/S1234567A d/2024-02-20";

    pub fn new(filter: AppointmentFilter) -> Self {
        Self { filter }
    }
}

impl Command for FindAppointmentCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        model.update_appointment_filter(self.filter.clone());
        let count = model.filtered_appointment_views().len();
        Ok(CommandResult::new(format!("{count} appointments listed!")))
    }
}
