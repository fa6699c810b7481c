//! Turns a line of user input into an [`AnyCommand`].
//!
//! Input is `COMMAND_WORD ARGS`, where arguments are introduced by prefixes
//! such as `i/` (see [`tokenizer`]). Every field goes through its value
//! type's parser, so a command that parses carries only valid values.

pub mod tokenizer;

use thiserror::Error;

use crate::commands::{
    AddAppointmentCommand, AddPatientCommand, AnyCommand, ClearCommand, DeleteAppointmentCommand,
    DeletePatientCommand, EditAppointmentCommand, EditAppointmentDescriptor, EditPatientCommand,
    EditPatientDescriptor, FindAppointmentCommand, FindPatientCommand, ListCommand, MarkCommand,
    UnmarkCommand,
};
use crate::model::{AppointmentFilter, PatientFilter};
use crate::models::{
    Address, Appointment, AppointmentType, Date, Email, Name, Note, Nric, Patient, Phone, Time,
    TimePeriod, ValidationError,
};
use tokenizer::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    EmptyInput,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid command format!\n{usage}")]
    InvalidFormat { usage: &'static str },

    #[error("Missing required field {prefix}\n{usage}")]
    MissingPrefix { prefix: Prefix, usage: &'static str },

    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefix(String),

    #[error("At least one field to edit must be provided")]
    NoFieldEdited,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parse one line of user input.
pub fn parse_command(input: &str) -> ParseResult<AnyCommand> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let (word, args) = match input.find(char::is_whitespace) {
        Some(split) => input.split_at(split),
        None => (input, ""),
    };

    match word {
        AddPatientCommand::COMMAND_WORD => parse_add_patient(args),
        EditPatientCommand::COMMAND_WORD => parse_edit_patient(args),
        DeletePatientCommand::COMMAND_WORD => {
            let map = expect_args(args, &[PREFIX_NRIC], DeletePatientCommand::MESSAGE_USAGE)?;
            let nric = Nric::parse(required(&map, PREFIX_NRIC, DeletePatientCommand::MESSAGE_USAGE)?)?;
            Ok(AnyCommand::DeletePatient(DeletePatientCommand::new(nric)))
        }
        AddAppointmentCommand::COMMAND_WORD => parse_add_appointment(args),
        EditAppointmentCommand::COMMAND_WORD => parse_edit_appointment(args),
        DeleteAppointmentCommand::COMMAND_WORD => {
            let (nric, date, period) = parse_identity(args, DeleteAppointmentCommand::MESSAGE_USAGE)?;
            Ok(AnyCommand::DeleteAppointment(DeleteAppointmentCommand::new(nric, date, period)))
        }
        MarkCommand::COMMAND_WORD => {
            let (nric, date, period) = parse_identity(args, MarkCommand::MESSAGE_USAGE)?;
            Ok(AnyCommand::Mark(MarkCommand::new(nric, date, period)))
        }
        UnmarkCommand::COMMAND_WORD => {
            let (nric, date, period) = parse_identity(args, UnmarkCommand::MESSAGE_USAGE)?;
            Ok(AnyCommand::Unmark(UnmarkCommand::new(nric, date, period)))
        }
        FindPatientCommand::COMMAND_WORD => parse_find_patient(args),
        FindAppointmentCommand::COMMAND_WORD => parse_find_appointment(args),
        ListCommand::COMMAND_WORD => Ok(AnyCommand::List(ListCommand)),
        ClearCommand::COMMAND_WORD => Ok(AnyCommand::Clear(ClearCommand)),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Tokenize, rejecting a preamble and repeated prefixes.
fn expect_args(args: &str, prefixes: &[Prefix], usage: &'static str) -> ParseResult<ArgumentMultimap> {
    let map = tokenize(args, prefixes);
    if !map.preamble().is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    check_no_repeats(&map, prefixes)?;
    Ok(map)
}

fn check_no_repeats(map: &ArgumentMultimap, prefixes: &[Prefix]) -> ParseResult<()> {
    let repeated = map.repeated(prefixes);
    if repeated.is_empty() {
        return Ok(());
    }
    let names: Vec<&str> = repeated.iter().map(Prefix::as_str).collect();
    Err(ParseError::DuplicatePrefix(names.join(" ")))
}

fn required<'a>(map: &'a ArgumentMultimap, prefix: Prefix, usage: &'static str) -> ParseResult<&'a str> {
    map.value(prefix)
        .ok_or(ParseError::MissingPrefix { prefix, usage })
}

/// Parse an optional field with the given value parser.
fn optional<T>(
    map: &ArgumentMultimap,
    prefix: Prefix,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> ParseResult<Option<T>> {
    Ok(map.value(prefix).map(parse).transpose()?)
}

fn parse_add_patient(args: &str) -> ParseResult<AnyCommand> {
    const USAGE: &str = AddPatientCommand::MESSAGE_USAGE;
    let map = expect_args(
        args,
        &[PREFIX_NRIC, PREFIX_NAME, PREFIX_DOB, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS],
        USAGE,
    )?;

    let patient = Patient::new(
        Name::parse(required(&map, PREFIX_NAME, USAGE)?)?,
        Nric::parse(required(&map, PREFIX_NRIC, USAGE)?)?,
        Date::parse(required(&map, PREFIX_DOB, USAGE)?)?,
        Phone::parse(required(&map, PREFIX_PHONE, USAGE)?)?,
        Email::parse(required(&map, PREFIX_EMAIL, USAGE)?)?,
        Address::parse(required(&map, PREFIX_ADDRESS, USAGE)?)?,
    );
    Ok(AnyCommand::AddPatient(AddPatientCommand::new(patient)))
}

fn parse_edit_patient(args: &str) -> ParseResult<AnyCommand> {
    const USAGE: &str = EditPatientCommand::MESSAGE_USAGE;
    let map = expect_args(
        args,
        &[
            PREFIX_NRIC,
            PREFIX_NEW_NRIC,
            PREFIX_NEW_NAME,
            PREFIX_NEW_DOB,
            PREFIX_NEW_PHONE,
            PREFIX_NEW_EMAIL,
            PREFIX_NEW_ADDRESS,
        ],
        USAGE,
    )?;

    let nric = Nric::parse(required(&map, PREFIX_NRIC, USAGE)?)?;
    let descriptor = EditPatientDescriptor {
        name: optional(&map, PREFIX_NEW_NAME, Name::parse)?,
        nric: optional(&map, PREFIX_NEW_NRIC, Nric::parse)?,
        dob: optional(&map, PREFIX_NEW_DOB, Date::parse)?,
        phone: optional(&map, PREFIX_NEW_PHONE, Phone::parse)?,
        email: optional(&map, PREFIX_NEW_EMAIL, Email::parse)?,
        address: optional(&map, PREFIX_NEW_ADDRESS, Address::parse)?,
    };
    if !descriptor.is_any_field_edited() {
        return Err(ParseError::NoFieldEdited);
    }
    Ok(AnyCommand::EditPatient(EditPatientCommand::new(nric, descriptor)))
}

/// The `i/ d/ from/ to/` fields naming one appointment.
fn identity_from(map: &ArgumentMultimap, usage: &'static str) -> ParseResult<(Nric, Date, TimePeriod)> {
    let nric = Nric::parse(required(map, PREFIX_NRIC, usage)?)?;
    let date = Date::parse(required(map, PREFIX_DATE, usage)?)?;
    let period = TimePeriod::parse(
        required(map, PREFIX_START, usage)?,
        required(map, PREFIX_END, usage)?,
    )?;
    Ok((nric, date, period))
}

fn parse_identity(args: &str, usage: &'static str) -> ParseResult<(Nric, Date, TimePeriod)> {
    let map = expect_args(args, &[PREFIX_NRIC, PREFIX_DATE, PREFIX_START, PREFIX_END], usage)?;
    identity_from(&map, usage)
}

fn parse_add_appointment(args: &str) -> ParseResult<AnyCommand> {
    const USAGE: &str = AddAppointmentCommand::MESSAGE_USAGE;
    let map = expect_args(
        args,
        &[PREFIX_NRIC, PREFIX_DATE, PREFIX_START, PREFIX_END, PREFIX_APPT_TYPE, PREFIX_NOTE],
        USAGE,
    )?;

    let (nric, date, period) = identity_from(&map, USAGE)?;
    let appointment_type = AppointmentType::parse(required(&map, PREFIX_APPT_TYPE, USAGE)?)?;
    let note = map.value(PREFIX_NOTE).map(Note::new).unwrap_or_default();

    let appointment = Appointment::new(nric, date, period, appointment_type, note);
    Ok(AnyCommand::AddAppointment(AddAppointmentCommand::new(appointment)))
}

fn parse_edit_appointment(args: &str) -> ParseResult<AnyCommand> {
    const USAGE: &str = EditAppointmentCommand::MESSAGE_USAGE;
    let map = expect_args(
        args,
        &[
            PREFIX_NRIC,
            PREFIX_DATE,
            PREFIX_START,
            PREFIX_END,
            PREFIX_NEW_DATE,
            PREFIX_NEW_START,
            PREFIX_NEW_END,
            PREFIX_NEW_APPT_TYPE,
            PREFIX_NEW_NOTE,
        ],
        USAGE,
    )?;

    let (nric, date, period) = identity_from(&map, USAGE)?;
    let descriptor = EditAppointmentDescriptor {
        date: optional(&map, PREFIX_NEW_DATE, Date::parse)?,
        start: optional(&map, PREFIX_NEW_START, Time::parse)?,
        end: optional(&map, PREFIX_NEW_END, Time::parse)?,
        appointment_type: optional(&map, PREFIX_NEW_APPT_TYPE, AppointmentType::parse)?,
        note: map.value(PREFIX_NEW_NOTE).map(Note::new),
    };
    if !descriptor.is_any_field_edited() {
        return Err(ParseError::NoFieldEdited);
    }
    Ok(AnyCommand::EditAppointment(EditAppointmentCommand::new(
        nric, date, period, descriptor,
    )))
}

fn parse_find_patient(args: &str) -> ParseResult<AnyCommand> {
    const USAGE: &str = FindPatientCommand::MESSAGE_USAGE;
    let map = tokenize(args, &[PREFIX_NRIC]);
    check_no_repeats(&map, &[PREFIX_NRIC])?;

    let filter = match map.value(PREFIX_NRIC) {
        Some(raw) => {
            if !map.preamble().is_empty() {
                return Err(ParseError::InvalidFormat { usage: USAGE });
            }
            PatientFilter::Nric(Nric::parse(raw)?)
        }
        None => {
            let keywords: Vec<String> = map
                .preamble()
                .split_whitespace()
                .map(str::to_string)
                .collect();
            if keywords.is_empty() {
                return Err(ParseError::InvalidFormat { usage: USAGE });
            }
            PatientFilter::NameKeywords(keywords)
        }
    };
    Ok(AnyCommand::FindPatient(FindPatientCommand::new(filter)))
}

fn parse_find_appointment(args: &str) -> ParseResult<AnyCommand> {
    const USAGE: &str = FindAppointmentCommand::MESSAGE_USAGE;
    let map = expect_args(args, &[PREFIX_NRIC, PREFIX_DATE], USAGE)?;

    let nric = optional(&map, PREFIX_NRIC, Nric::parse)?;
    let date = optional(&map, PREFIX_DATE, Date::parse)?;
    let filter = match (nric, date) {
        (Some(nric), Some(date)) => AppointmentFilter::NricAndDate(nric, date),
        (Some(nric), None) => AppointmentFilter::Nric(nric),
        (None, Some(date)) => AppointmentFilter::Date(date),
        (None, None) => return Err(ParseError::InvalidFormat { usage: USAGE }),
    };
    Ok(AnyCommand::FindAppointment(FindAppointmentCommand::new(filter)))
}
