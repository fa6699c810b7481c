//! Marking appointments as seen or not seen.

use super::appointment::find_existing;
use super::{Command, CommandOutcome, CommandResult};
use crate::model::{AppointmentFilter, Model};
use crate::models::{Date, Nric, TimePeriod};

/// Set the mark on one appointment and show every appointment again.
fn set_mark(model: &mut Model, nric: &Nric, date: &Date, period: &TimePeriod, seen: bool) -> CommandOutcome {
    let target = find_existing(model, nric, date, period)?;
    let updated = target.with_mark(seen);
    model.set_appointment(&target, updated.clone())?;
    model.update_appointment_filter(AppointmentFilter::All);

    let feedback = if seen {
        format!("Appointment successfully marked as seen: {updated}")
    } else {
        format!("Appointment successfully marked as not seen: {updated}")
    };
    Ok(CommandResult::new(feedback))
}

/// Records that the patient attended the appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkCommand {
    nric: Nric,
    date: Date,
    period: TimePeriod,
}

impl MarkCommand {
    pub const COMMAND_WORD: &'static str = "mark";
    pub const MESSAGE_USAGE: &'static str = "mark: Marks the appointment identified by NRIC, date and time period as seen.\n\
        Parameters: i/NRIC d/DATE from/START_TIME to/END_TIME\n\
        Example: mark i/S1234567A d/2024-02-20 from/11:00 to/11:30";

    pub fn new(nric: Nric, date: Date, period: TimePeriod) -> Self {
        Self { nric, date, period }
    }
}

impl Command for MarkCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        set_mark(model, &self.nric, &self.date, &self.period, true)
    }
}

/// Reverts an appointment to not seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmarkCommand {
    nric: Nric,
    date: Date,
    period: TimePeriod,
}

impl UnmarkCommand {
    pub const COMMAND_WORD: &'static str = "unmark";
    pub const MESSAGE_USAGE: &'static str = "unmark: Marks the appointment identified by NRIC, date and time period as not seen.\n\
        Parameters: i/NRIC d/DATE from/START_TIME to/END_TIME\n\
        Example: unmark i/S1234567A d/2024-02-20 from/11:00 to/11:30";

    pub fn new(nric: Nric, date: Date, period: TimePeriod) -> Self {
        Self { nric, date, period }
    }
}

impl Command for UnmarkCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        set_mark(model, &self.nric, &self.date, &self.period, false)
    }
}
