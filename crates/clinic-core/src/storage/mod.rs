//! JSON snapshot storage for the address book.

mod records;

pub use records::*;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::book::{AddressBook, BookError, ReadOnlyAddressBook};
use crate::models::ValidationError;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Illegal value in stored {record}: {source}")]
    IllegalValue {
        record: &'static str,
        source: ValidationError,
    },

    #[error("Stored data is inconsistent: {0}")]
    Integrity(#[from] BookError),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Persists and restores a whole address book.
pub trait AddressBookStorage {
    fn file_path(&self) -> &Path;

    /// `Ok(None)` when nothing has been saved yet.
    fn read_address_book(&self) -> StorageResult<Option<AddressBook>>;

    fn save_address_book(&self, book: &AddressBook) -> StorageResult<()>;
}

/// Address book stored as a single pretty-printed JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonAddressBookStorage {
    path: PathBuf,
}

impl JsonAddressBookStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl AddressBookStorage for JsonAddressBookStorage {
    fn file_path(&self) -> &Path {
        &self.path
    }

    fn read_address_book(&self) -> StorageResult<Option<AddressBook>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no data file found");
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)?;
        let snapshot: JsonSerializableAddressBook = serde_json::from_str(&contents)
            .inspect_err(|e| warn!(path = %self.path.display(), error = %e, "data file is not valid JSON"))?;
        let book = snapshot
            .to_model()
            .inspect_err(|e| warn!(path = %self.path.display(), error = %e, "data file rejected"))?;

        info!(
            path = %self.path.display(),
            patients = book.patients().len(),
            appointments = book.appointments().len(),
            "address book loaded"
        );
        Ok(Some(book))
    }

    fn save_address_book(&self, book: &AddressBook) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let snapshot = JsonSerializableAddressBook::from_book(book);
        fs::write(&self.path, serde_json::to_string_pretty(&snapshot)?)?;

        info!(
            path = %self.path.display(),
            patients = snapshot.patients.len(),
            appointments = snapshot.appointments.len(),
            "address book saved"
        );
        Ok(())
    }
}
