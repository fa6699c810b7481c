//! Patient commands: add, edit and delete.

use super::{Command, CommandError, CommandOutcome, CommandResult};
use crate::model::Model;
use crate::models::{Address, Date, Email, Name, Nric, Patient, Phone};

/// Registers a new patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddPatientCommand {
    patient: Patient,
}

impl AddPatientCommand {
    pub const COMMAND_WORD: &'static str = "addpatient";
    pub const MESSAGE_USAGE: &'static str = "addpatient: Adds a patient to the clinic records.\n\
        Parameters: i/NRIC n/NAME b/DOB p/PHONE e/EMAIL a/ADDRESS\n\
        Example: addpatient i/S1234567A n/John Doe b/1990-01-01 p/98765432 e/johnd@example.com a/311, Clementi Ave 2, #02-25";

    pub fn new(patient: Patient) -> Self {
        Self { patient }
    }
}

impl Command for AddPatientCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        if model.has_patient_with_nric(&self.patient.nric) {
            return Err(CommandError::DuplicatePatient(self.patient.nric.to_string()));
        }
        model.add_patient(self.patient.clone())?;
        Ok(CommandResult::new(format!("New patient added: {}", self.patient)))
    }
}

/// Fields to change on an existing patient. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPatientDescriptor {
    pub name: Option<Name>,
    pub nric: Option<Nric>,
    pub dob: Option<Date>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
}

impl EditPatientDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.nric.is_some()
            || self.dob.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
    }

    /// Apply the edits to a copy of `patient`.
    pub fn apply(&self, patient: &Patient) -> Patient {
        Patient {
            name: self.name.clone().unwrap_or_else(|| patient.name.clone()),
            nric: self.nric.clone().unwrap_or_else(|| patient.nric.clone()),
            dob: self.dob.unwrap_or(patient.dob),
            phone: self.phone.clone().unwrap_or_else(|| patient.phone.clone()),
            email: self.email.clone().unwrap_or_else(|| patient.email.clone()),
            address: self
                .address
                .clone()
                .unwrap_or_else(|| patient.address.clone()),
        }
    }
}

/// Edits the details of the patient with the given NRIC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPatientCommand {
    nric: Nric,
    descriptor: EditPatientDescriptor,
}

impl EditPatientCommand {
    pub const COMMAND_WORD: &'static str = "editpatient";
    pub const MESSAGE_USAGE: &'static str = "editpatient: Edits the details of the patient identified by NRIC.\n\
        Parameters: i/NRIC [newi/NRIC] [newn/NAME] [newb/DOB] [newp/PHONE] [newe/EMAIL] [newa/ADDRESS]\n\
        Example: editpatient i/S1234567A newp/91234567 newe/johndoe@example.com";

    pub fn new(nric: Nric, descriptor: EditPatientDescriptor) -> Self {
        Self { nric, descriptor }
    }
}

impl Command for EditPatientCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        let target = model
            .find_patient_with_nric(&self.nric)
            .cloned()
            .ok_or_else(|| CommandError::PatientNotFound(self.nric.to_string()))?;

        let edited = self.descriptor.apply(&target);
        if !target.is_same_patient(&edited) && model.has_patient_with_nric(&edited.nric) {
            return Err(CommandError::DuplicatePatient(edited.nric.to_string()));
        }

        model.set_patient(&target, edited.clone())?;
        model.show_all();
        Ok(CommandResult::new(format!("Edited patient: {edited}")))
    }
}

/// Deletes a patient together with all of their appointments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePatientCommand {
    nric: Nric,
}

impl DeletePatientCommand {
    pub const COMMAND_WORD: &'static str = "deletepatient";
    pub const MESSAGE_USAGE: &'static str = "deletepatient: Deletes the patient identified by NRIC, along with their appointments.\n\
        Parameters: i/NRIC\n\
        Example: deletepatient i/S1234567A";

    pub fn new(nric: Nric) -> Self {
        Self { nric }
    }
}

impl Command for DeletePatientCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        if !model.has_patient_with_nric(&self.nric) {
            return Err(CommandError::PatientNotFound(self.nric.to_string()));
        }
        let removed = model.delete_patient_with_nric(&self.nric)?;
        Ok(CommandResult::new(format!("Deleted patient: {removed}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::ReadOnlyAddressBook;

    fn make_patient(name: &str, nric: &str) -> Patient {
        Patient::new(
            Name::parse(name).unwrap(),
            Nric::parse(nric).unwrap(),
            Date::parse("1995-07-20").unwrap(),
            Phone::parse("85355255").unwrap(),
            Email::parse("alice@example.com").unwrap(),
            Address::parse("123, Jurong West Ave 6, #08-111").unwrap(),
        )
    }

    #[test]
    fn test_add_patient() {
        let mut model = Model::default();
        let patient = make_patient("Alice Pauline", "S1234567A");

        let result = AddPatientCommand::new(patient.clone())
            .execute(&mut model)
            .unwrap();
        assert!(result.feedback.starts_with("New patient added: Alice Pauline"));
        assert_eq!(model.address_book().patients(), &[patient]);
    }

    #[test]
    fn test_add_duplicate_patient() {
        let mut model = Model::default();
        AddPatientCommand::new(make_patient("Alice", "S1234567A"))
            .execute(&mut model)
            .unwrap();

        let err = AddPatientCommand::new(make_patient("Someone Else", "S1234567A"))
            .execute(&mut model)
            .unwrap_err();
        assert_eq!(err, CommandError::DuplicatePatient("S1234567A".into()));
        assert_eq!(model.address_book().patients().len(), 1);
    }

    #[test]
    fn test_edit_patient() {
        let mut model = Model::default();
        model.add_patient(make_patient("Alice", "S1234567A")).unwrap();

        let descriptor = EditPatientDescriptor {
            name: Some(Name::parse("Alice Tan").unwrap()),
            phone: Some(Phone::parse("99999999").unwrap()),
            ..Default::default()
        };
        let cmd = EditPatientCommand::new(Nric::parse("S1234567A").unwrap(), descriptor);
        cmd.execute(&mut model).unwrap();

        let patient = &model.address_book().patients()[0];
        assert_eq!(patient.name.as_str(), "Alice Tan");
        assert_eq!(patient.phone.as_str(), "99999999");
        assert_eq!(patient.email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_edit_missing_patient() {
        let mut model = Model::default();
        let cmd = EditPatientCommand::new(
            Nric::parse("S1234567A").unwrap(),
            EditPatientDescriptor {
                name: Some(Name::parse("Nobody").unwrap()),
                ..Default::default()
            },
        );
        assert_eq!(
            cmd.execute(&mut model),
            Err(CommandError::PatientNotFound("S1234567A".into()))
        );
    }

    #[test]
    fn test_edit_patient_nric_collision() {
        let mut model = Model::default();
        model.add_patient(make_patient("Alice", "S1234567A")).unwrap();
        model.add_patient(make_patient("Bob", "S2345678B")).unwrap();

        let cmd = EditPatientCommand::new(
            Nric::parse("S1234567A").unwrap(),
            EditPatientDescriptor {
                nric: Some(Nric::parse("S2345678B").unwrap()),
                ..Default::default()
            },
        );
        assert_eq!(
            cmd.execute(&mut model),
            Err(CommandError::DuplicatePatient("S2345678B".into()))
        );
    }

    #[test]
    fn test_delete_patient() {
        let mut model = Model::default();
        model.add_patient(make_patient("Alice", "S1234567A")).unwrap();

        let nric = Nric::parse("S1234567A").unwrap();
        let result = DeletePatientCommand::new(nric.clone())
            .execute(&mut model)
            .unwrap();
        assert!(result.feedback.contains("Alice"));
        assert!(!model.has_patient_with_nric(&nric));

        assert_eq!(
            DeletePatientCommand::new(nric).execute(&mut model),
            Err(CommandError::PatientNotFound("S1234567A".into()))
        );
    }
}
