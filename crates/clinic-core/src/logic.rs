//! Session facade: parse a line, run it, persist if anything changed.

use thiserror::Error;
use tracing::{info, warn};

use crate::commands::{Command, CommandError, CommandResult};
use crate::config::ClinicConfig;
use crate::model::Model;
use crate::parser::{parse_command, ParseError};
use crate::storage::{AddressBookStorage, JsonAddressBookStorage, StorageError};

#[derive(Error, Debug)]
pub enum LogicError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("Could not save clinic records: {0}")]
    Storage(#[from] StorageError),

    /// The command ran and the in-memory model kept its change, but the
    /// snapshot on disk is stale.
    #[error("{} (changes not saved: {source})", .result.feedback)]
    Unsaved {
        result: CommandResult,
        #[source]
        source: StorageError,
    },
}

pub type LogicResult<T> = Result<T, LogicError>;

/// A model bound to the storage it is saved to.
pub struct Logic {
    model: Model,
    storage: Box<dyn AddressBookStorage>,
}

impl Logic {
    pub fn new(model: Model, storage: Box<dyn AddressBookStorage>) -> Self {
        Self { model, storage }
    }

    /// Load the configured data file, starting empty when there is none.
    pub fn open(config: &ClinicConfig) -> LogicResult<Self> {
        let storage = JsonAddressBookStorage::new(&config.data_file);
        let book = storage.read_address_book()?.unwrap_or_default();
        info!(data_file = %config.data_file.display(), "session opened");
        Ok(Self::new(Model::new(book), Box::new(storage)))
    }

    /// Execute one line of input. The book is saved only after a command
    /// that changed it.
    ///
    /// A failed save does not roll the model back: the error is
    /// [`LogicError::Unsaved`] and still carries the command's feedback.
    pub fn execute(&mut self, input: &str) -> LogicResult<CommandResult> {
        let command = parse_command(input)?;
        let before = self.model.revision();
        let result = command.execute(&mut self.model)?;
        if self.model.revision() != before {
            if let Err(source) = self.storage.save_address_book(self.model.address_book()) {
                warn!(command = command.command_word(), error = %source, "change applied but not saved");
                return Err(LogicError::Unsaved { result, source });
            }
        }
        Ok(result)
    }

    /// Replace the live book with the snapshot on disk, keeping the current
    /// filters. Returns `false` and leaves the model alone when there is no
    /// snapshot.
    pub fn reload(&mut self) -> LogicResult<bool> {
        match self.storage.read_address_book()? {
            Some(book) => {
                self.model.set_address_book(book);
                info!(path = %self.storage.file_path().display(), "address book reloaded");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn storage(&self) -> &dyn AddressBookStorage {
        self.storage.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::ReadOnlyAddressBook;
    use tempfile::TempDir;

    fn open_in(dir: &TempDir) -> Logic {
        let config = ClinicConfig {
            data_file: dir.path().join("clinic.json"),
            ..ClinicConfig::default()
        };
        Logic::open(&config).unwrap()
    }

    #[test]
    fn test_mutation_is_persisted() {
        let dir = TempDir::new().unwrap();
        let mut logic = open_in(&dir);
        logic
            .execute("addpatient i/S1234567A n/Alice b/1990-01-01 p/91234567 e/alice@example.com a/Clementi")
            .unwrap();
        assert!(logic.storage().file_path().exists());

        let reopened = open_in(&dir);
        assert_eq!(reopened.model().address_book().patients().len(), 1);
    }

    #[test]
    fn test_queries_do_not_write() {
        let dir = TempDir::new().unwrap();
        let mut logic = open_in(&dir);
        logic.execute("list").unwrap();
        assert!(!logic.storage().file_path().exists());
    }

    #[test]
    fn test_reload_picks_up_external_save() {
        let dir = TempDir::new().unwrap();
        let mut live = open_in(&dir);
        assert!(!live.reload().unwrap());
        assert_eq!(live.model().revision(), 0);

        let mut other = open_in(&dir);
        other
            .execute("addpatient i/S1234567A n/Alice b/1990-01-01 p/91234567 e/alice@example.com a/Clementi")
            .unwrap();

        let before = live.model().revision();
        assert!(live.reload().unwrap());
        assert!(live.model().revision() > before);
        assert_eq!(live.model().address_book().patients().len(), 1);
        assert_eq!(live.model().filtered_patients().len(), 1);
    }

    #[test]
    fn test_failed_save_keeps_change_and_feedback() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let config = ClinicConfig {
            data_file: blocker.join("clinic.json"),
            ..ClinicConfig::default()
        };
        let mut logic = Logic::open(&config).unwrap();

        let err = logic
            .execute("addpatient i/S1234567A n/Alice b/1990-01-01 p/91234567 e/alice@example.com a/Clementi")
            .unwrap_err();
        match &err {
            LogicError::Unsaved { result, source } => {
                assert!(result.feedback.starts_with("New patient added"));
                assert!(matches!(source, StorageError::Io(_)));
            }
            other => panic!("expected Unsaved, got {other:?}"),
        }
        assert!(err.to_string().contains("changes not saved"));
        assert_eq!(logic.model().address_book().patients().len(), 1);
    }

    #[test]
    fn test_errors_are_classified() {
        let dir = TempDir::new().unwrap();
        let mut logic = open_in(&dir);
        assert!(matches!(logic.execute("bogus"), Err(LogicError::Parse(_))));
        assert!(matches!(
            logic.execute("deletepatient i/S1234567A"),
            Err(LogicError::Command(CommandError::PatientNotFound(_)))
        ));
    }
}
