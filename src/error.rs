use thiserror::Error;

use crate::formatter::format_hundredths;
use crate::types::SplitMethod;

/// Failures of the split calculator.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SplitError {
    #[error("there must be at least one participant in the split")]
    NoParticipants,

    #[error("invalid total amount `{0}`: expected a non-negative number")]
    InvalidAmount(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error(
        "the {} split does not add up: expected {}, got {}",
        .method.name(),
        format_hundredths(.expected),
        format_hundredths(.actual)
    )]
    SplitMismatch {
        method: SplitMethod,
        expected: i64,
        actual: i64,
    },

    #[error("there is no participant at position {0}")]
    UnknownParticipant(usize),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("unknown command `{0}`, type /help for the list of commands")]
    UnknownCommand(String),

    #[error("invalid syntax for /{0}; example of valid syntax: {1}")]
    InvalidCommandSyntax(String, String),

    #[error("the expense needs a description")]
    MissingDescription,

    #[error("the total amount must be greater than zero")]
    ZeroTotal,

    #[error("`{0}` is not a member of the selected group")]
    NotAMember(String),

    #[error("nobody paid for this expense, use /payer to choose who did")]
    MissingPayer,

    #[error("unknown category `{0}`; valid categories: food, transport, entertainment, utilities, groceries, shopping, other")]
    UnknownCategory(String),

    #[error("unknown split method `{0}`; valid methods: equal, percentage, fixed")]
    UnknownSplitMethod(String),

    #[error("invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(
        "invalid name `{0}`: names must be alphanumeric, can only \
             include ASCII characters and must start with a letter"
    )]
    InvalidName(String),

    #[error("`{0}` is not a registered group")]
    UnregisteredGroup(String),

    #[error("no group has the invite code `{0}`")]
    UnknownGroupCode(String),

    #[error("no group selected, use /group to pick one")]
    NoGroupSelected,
}

#[derive(Error, Debug)]
#[error("{message}: {cause}")]
pub struct DatabaseError {
    message: String,
    cause: anyhow::Error,
}

impl SplitError {
    pub fn invalid_amount(amount: String) -> Self {
        SplitError::InvalidAmount(amount)
    }

    pub fn invalid_number(raw: String) -> Self {
        SplitError::InvalidNumber(raw)
    }

    pub fn split_mismatch(method: SplitMethod, expected: i64, actual: i64) -> Self {
        SplitError::SplitMismatch {
            method,
            expected,
            actual,
        }
    }
}

impl InputError {
    pub fn invalid_command_syntax(command: &str, example: &str) -> Self {
        InputError::InvalidCommandSyntax(command.to_string(), example.to_string())
    }

    pub fn invalid_name(name: String) -> Self {
        InputError::InvalidName(name)
    }

    pub fn unregistered_group(name: String) -> Self {
        InputError::UnregisteredGroup(name)
    }
}

impl DatabaseError {
    pub fn new<T: AsRef<str>>(message: T, cause: anyhow::Error) -> Self {
        DatabaseError {
            message: message.as_ref().to_string(),
            cause,
        }
    }
}
