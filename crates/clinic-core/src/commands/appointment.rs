//! Appointment commands: add, edit and delete.

use super::{Command, CommandError, CommandOutcome, CommandResult};
use crate::model::Model;
use crate::models::{Appointment, AppointmentType, Date, Note, Nric, Time, TimePeriod};

/// Look up an existing appointment by identity, reporting a missing patient
/// before a missing appointment.
pub(crate) fn find_existing(
    model: &Model,
    nric: &Nric,
    date: &Date,
    period: &TimePeriod,
) -> Result<Appointment, CommandError> {
    if !model.has_patient_with_nric(nric) {
        return Err(CommandError::PatientNotFound(nric.to_string()));
    }
    model
        .find_appointment(nric, date, period)
        .cloned()
        .ok_or(CommandError::AppointmentNotFound)
}

/// Schedules a new appointment for an existing patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAppointmentCommand {
    appointment: Appointment,
}

impl AddAppointmentCommand {
    pub const COMMAND_WORD: &'static str = "addappt";
    pub const MESSAGE_USAGE: &'static str = "addappt: Adds an appointment for an existing patient.\n\
        Parameters: i/NRIC d/DATE from/START_TIME to/END_TIME t/APPOINTMENT_TYPE [note/NOTE]\n\
        Example: addappt i/S1234567A d/2024-02-20 from/11:00 to/11:30 t/Medical Check-up note/Routine check-in";

    pub fn new(appointment: Appointment) -> Self {
        Self { appointment }
    }
}

impl Command for AddAppointmentCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        let appt = &self.appointment;
        let dob = model
            .find_patient_with_nric(&appt.nric)
            .map(|p| p.dob)
            .ok_or_else(|| CommandError::PatientNotFound(appt.nric.to_string()))?;
        if model.has_appointment(appt) {
            return Err(CommandError::DuplicateAppointment);
        }
        if !model.is_valid_appt_for_patient(appt)? {
            return Err(CommandError::InvalidAppointmentDate {
                date: appt.date,
                dob,
            });
        }
        if model.same_patient_has_overlapping_appointment(appt) {
            return Err(CommandError::OverlappingAppointment);
        }
        model.add_appointment(appt.clone())?;
        model.show_all();
        Ok(CommandResult::new(format!("New appointment added: {appt}")))
    }
}

/// Fields to change on an existing appointment. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditAppointmentDescriptor {
    pub date: Option<Date>,
    pub start: Option<Time>,
    pub end: Option<Time>,
    pub appointment_type: Option<AppointmentType>,
    pub note: Option<Note>,
}

impl EditAppointmentDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.date.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.appointment_type.is_some()
            || self.note.is_some()
    }

    /// Apply the edits to a copy of `appointment`. The mark is kept.
    ///
    /// Fails when the resulting start is not before the resulting end.
    pub fn apply(&self, appointment: &Appointment) -> Result<Appointment, CommandError> {
        let period = TimePeriod::new(
            self.start.unwrap_or(appointment.period.start()),
            self.end.unwrap_or(appointment.period.end()),
        )?;
        Ok(Appointment {
            nric: appointment.nric.clone(),
            date: self.date.unwrap_or(appointment.date),
            period,
            appointment_type: self
                .appointment_type
                .clone()
                .unwrap_or_else(|| appointment.appointment_type.clone()),
            note: self.note.clone().unwrap_or_else(|| appointment.note.clone()),
            mark: appointment.mark,
        })
    }
}

/// Edits the appointment identified by (NRIC, date, time period).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAppointmentCommand {
    nric: Nric,
    date: Date,
    period: TimePeriod,
    descriptor: EditAppointmentDescriptor,
}

impl EditAppointmentCommand {
    pub const COMMAND_WORD: &'static str = "editappt";
    pub const MESSAGE_USAGE: &'static str = "editappt: Edits the appointment identified by NRIC, date and time period.\n\
        Parameters: i/NRIC d/DATE from/START_TIME to/END_TIME [newd/DATE] [newfrom/START_TIME] [newto/END_TIME] [newt/APPOINTMENT_TYPE] [newnote/NOTE]\n\
        Example: editappt i/S1234567A d/2024-02-20 from/11:00 to/11:30 newfrom/12:00 newto/12:30";

    pub fn new(nric: Nric, date: Date, period: TimePeriod, descriptor: EditAppointmentDescriptor) -> Self {
        Self {
            nric,
            date,
            period,
            descriptor,
        }
    }
}

impl Command for EditAppointmentCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        let target = find_existing(model, &self.nric, &self.date, &self.period)?;
        let edited = self.descriptor.apply(&target)?;

        if !target.is_same_appointment(&edited) && model.has_appointment(&edited) {
            return Err(CommandError::DuplicateAppointment);
        }
        if model.has_overlapping_appointment_excluding(&edited, &target) {
            return Err(CommandError::OverlappingAppointment);
        }

        model.set_appointment(&target, edited.clone())?;
        model.show_all();
        Ok(CommandResult::new(format!("Edited appointment: {edited}")))
    }
}

/// Cancels the appointment identified by (NRIC, date, time period).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteAppointmentCommand {
    nric: Nric,
    date: Date,
    period: TimePeriod,
}

impl DeleteAppointmentCommand {
    pub const COMMAND_WORD: &'static str = "deleteappt";
    pub const MESSAGE_USAGE: &'static str = "deleteappt: Deletes the appointment identified by NRIC, date and time period.\n\
        Parameters: i/NRIC d/DATE from/START_TIME to/END_TIME\n\
        Example: deleteappt i/S1234567A d/2024-02-20 from/11:00 to/11:30";

    pub fn new(nric: Nric, date: Date, period: TimePeriod) -> Self {
        Self { nric, date, period }
    }
}

impl Command for DeleteAppointmentCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        let target = find_existing(model, &self.nric, &self.date, &self.period)?;
        let removed = model.delete_appointment(&target)?;
        Ok(CommandResult::new(format!("Deleted appointment: {removed}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::ReadOnlyAddressBook;
    use crate::models::{Address, Email, Name, Patient, Phone};

    const NRIC: &str = "S1234567A";

    fn setup_model() -> Model {
        let mut model = Model::default();
        model
            .add_patient(Patient::new(
                Name::parse("Alice").unwrap(),
                Nric::parse(NRIC).unwrap(),
                Date::parse("1990-01-01").unwrap(),
                Phone::parse("91234567").unwrap(),
                Email::parse("alice@example.com").unwrap(),
                Address::parse("Clementi").unwrap(),
            ))
            .unwrap();
        model
    }

    fn make_appointment(date: &str, start: &str, end: &str) -> Appointment {
        Appointment::new(
            Nric::parse(NRIC).unwrap(),
            Date::parse(date).unwrap(),
            TimePeriod::parse(start, end).unwrap(),
            AppointmentType::parse("Check-up").unwrap(),
            Note::new(""),
        )
    }

    #[test]
    fn test_add_appointment() {
        let mut model = setup_model();
        let appt = make_appointment("2024-01-05", "09:00", "09:30");
        let result = AddAppointmentCommand::new(appt.clone())
            .execute(&mut model)
            .unwrap();
        assert!(result.feedback.starts_with("New appointment added"));
        assert_eq!(model.address_book().appointments(), &[appt]);
    }

    #[test]
    fn test_add_appointment_rejections() {
        let mut model = setup_model();
        let appt = make_appointment("2024-01-05", "09:00", "10:00");
        AddAppointmentCommand::new(appt.clone())
            .execute(&mut model)
            .unwrap();

        assert_eq!(
            AddAppointmentCommand::new(appt.clone()).execute(&mut model),
            Err(CommandError::DuplicateAppointment)
        );
        assert_eq!(
            AddAppointmentCommand::new(make_appointment("2024-01-05", "09:30", "10:30"))
                .execute(&mut model),
            Err(CommandError::OverlappingAppointment)
        );
        assert!(matches!(
            AddAppointmentCommand::new(make_appointment("1989-12-31", "09:00", "10:00"))
                .execute(&mut model),
            Err(CommandError::InvalidAppointmentDate { .. })
        ));

        let stranger = Appointment {
            nric: Nric::parse("T7654321B").unwrap(),
            ..appt
        };
        assert_eq!(
            AddAppointmentCommand::new(stranger).execute(&mut model),
            Err(CommandError::PatientNotFound("T7654321B".into()))
        );
        assert_eq!(model.address_book().appointments().len(), 1);
    }

    #[test]
    fn test_adjacent_appointment_allowed() {
        let mut model = setup_model();
        AddAppointmentCommand::new(make_appointment("2024-01-05", "09:00", "10:00"))
            .execute(&mut model)
            .unwrap();
        AddAppointmentCommand::new(make_appointment("2024-01-05", "10:00", "11:00"))
            .execute(&mut model)
            .unwrap();
        assert_eq!(model.address_book().appointments().len(), 2);
    }

    #[test]
    fn test_edit_appointment_extend_own_window() {
        let mut model = setup_model();
        let appt = make_appointment("2024-01-05", "09:00", "10:00");
        model.add_appointment(appt.clone()).unwrap();

        let cmd = EditAppointmentCommand::new(
            appt.nric.clone(),
            appt.date,
            appt.period,
            EditAppointmentDescriptor {
                end: Some(Time::parse("10:30").unwrap()),
                note: Some(Note::new("extended")),
                ..Default::default()
            },
        );
        cmd.execute(&mut model).unwrap();

        let stored = &model.address_book().appointments()[0];
        assert_eq!(stored.period, TimePeriod::parse("09:00", "10:30").unwrap());
        assert_eq!(stored.note.as_str(), "extended");
    }

    #[test]
    fn test_edit_appointment_into_overlap() {
        let mut model = setup_model();
        let first = make_appointment("2024-01-05", "09:00", "10:00");
        let second = make_appointment("2024-01-05", "10:00", "11:00");
        model.add_appointment(first.clone()).unwrap();
        model.add_appointment(second).unwrap();

        let cmd = EditAppointmentCommand::new(
            first.nric.clone(),
            first.date,
            first.period,
            EditAppointmentDescriptor {
                end: Some(Time::parse("10:15").unwrap()),
                ..Default::default()
            },
        );
        assert_eq!(cmd.execute(&mut model), Err(CommandError::OverlappingAppointment));
        assert_eq!(model.address_book().appointments()[0], first);
    }

    #[test]
    fn test_edit_appointment_inverted_window() {
        let mut model = setup_model();
        let appt = make_appointment("2024-01-05", "09:00", "10:00");
        model.add_appointment(appt.clone()).unwrap();

        let cmd = EditAppointmentCommand::new(
            appt.nric.clone(),
            appt.date,
            appt.period,
            EditAppointmentDescriptor {
                start: Some(Time::parse("11:00").unwrap()),
                ..Default::default()
            },
        );
        assert!(matches!(
            cmd.execute(&mut model),
            Err(CommandError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_appointment() {
        let mut model = setup_model();
        let appt = make_appointment("2024-01-05", "09:00", "10:00");
        model.add_appointment(appt.clone()).unwrap();

        let cmd = DeleteAppointmentCommand::new(appt.nric.clone(), appt.date, appt.period);
        cmd.execute(&mut model).unwrap();
        assert!(model.address_book().appointments().is_empty());
        assert!(model.address_book().appointment_views().is_empty());

        assert_eq!(cmd.execute(&mut model), Err(CommandError::AppointmentNotFound));
    }
}
