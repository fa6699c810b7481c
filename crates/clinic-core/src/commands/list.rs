//! Listing everything and wiping the records.

use super::{Command, CommandOutcome, CommandResult};
use crate::model::Model;

/// Clears any active filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCommand;

impl ListCommand {
    pub const COMMAND_WORD: &'static str = "list";
}

impl Command for ListCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        model.show_all();
        Ok(CommandResult::new("Listed all patients and appointments"))
    }
}

/// Deletes every patient and appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub const COMMAND_WORD: &'static str = "clear";
}

impl Command for ClearCommand {
    fn execute(&self, model: &mut Model) -> CommandOutcome {
        model.clear();
        model.show_all();
        Ok(CommandResult::new("Clinic records have been cleared!"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::ReadOnlyAddressBook;
    use crate::model::PatientFilter;
    use crate::models::{Address, Date, Email, Name, Nric, Patient, Phone};

    #[test]
    fn test_list_and_clear() {
        let mut model = Model::default();
        model
            .add_patient(Patient::new(
                Name::parse("George Best").unwrap(),
                Nric::parse("S4444444G").unwrap(),
                Date::parse("1960-02-02").unwrap(),
                Phone::parse("9482442").unwrap(),
                Email::parse("anna@example.com").unwrap(),
                Address::parse("4th street").unwrap(),
            ))
            .unwrap();

        model.update_patient_filter(PatientFilter::NameKeywords(vec!["nobody".into()]));
        assert!(model.filtered_patients().is_empty());

        ListCommand.execute(&mut model).unwrap();
        assert_eq!(model.filtered_patients().len(), 1);

        ClearCommand.execute(&mut model).unwrap();
        assert!(model.address_book().patients().is_empty());
    }
}
