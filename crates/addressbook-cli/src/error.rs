use addressbook_config::ConfigError;
use addressbook_core::CoreError;
use addressbook_store::error::{StoreError, StoreErrorKind};
use anyhow::Error;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            };
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return store_exit_code(store_err);
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return core_exit_code(core_err);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
    }
    EXIT_FAILURE
}

fn core_exit_code(err: &CoreError) -> u8 {
    match err {
        CoreError::UnknownId(_) => EXIT_NOT_FOUND,
        CoreError::MissingFirstName | CoreError::DuplicateContact(_) => EXIT_INVALID_INPUT,
        CoreError::IdCollision(_) => EXIT_FAILURE,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    if let StoreError::Core(core_err) = err {
        return core_exit_code(core_err);
    }
    match err.kind() {
        StoreErrorKind::InvalidContact => EXIT_INVALID_INPUT,
        StoreErrorKind::InvalidId => EXIT_NOT_FOUND,
        StoreErrorKind::InvalidDataPath => EXIT_INVALID_INPUT,
        StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::DataAccess
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidDbPath(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::{exit_status, invalid_input, EXIT_FAILURE, EXIT_INVALID_INPUT, EXIT_NOT_FOUND};
    use addressbook_core::{ContactId, CoreError};
    use addressbook_store::error::StoreError;

    #[test]
    fn maps_error_kinds_to_exit_codes() {
        let not_found = anyhow::Error::from(StoreError::from(CoreError::UnknownId(
            ContactId::from("9"),
        )));
        assert_eq!(exit_status(&not_found), EXIT_NOT_FOUND);

        let duplicate = anyhow::Error::from(CoreError::DuplicateContact("Ana".to_string()));
        assert_eq!(exit_status(&duplicate), EXIT_INVALID_INPUT);

        assert_eq!(exit_status(&invalid_input("bad")), EXIT_INVALID_INPUT);

        let data_access = anyhow::Error::from(StoreError::ConnectionBusy);
        assert_eq!(exit_status(&data_access), EXIT_FAILURE);
    }
}
