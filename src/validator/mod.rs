//! Functions that check the validity of user input.
//!
//! These functions are called after the parsing phase and execute
//! checks that are not easily done by the parser. Checks on the split
//! itself belong to the calculator.

mod database;

pub use database::{validate_group_exists, validate_members_exist};

use crate::error::InputError;
use crate::types::{Amount, Participant};

/// Group and member names must be alphanumeric ASCII and start with a letter.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

pub fn validate_name(name: &str) -> Result<(), InputError> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(InputError::invalid_name(name.to_string()))
    }
}

pub fn validate_names<T: AsRef<str>>(names: &[T]) -> Result<(), InputError> {
    for name in names {
        validate_name(name.as_ref())?;
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), InputError> {
    if description.trim().is_empty() {
        Err(InputError::MissingDescription)
    } else {
        Ok(())
    }
}

/// A zero total is fine while editing, but not for a saved expense.
pub fn validate_total_for_submission(total_amount: Amount) -> Result<(), InputError> {
    if total_amount > 0 {
        Ok(())
    } else {
        Err(InputError::ZeroTotal)
    }
}

/// The payer must be one of the participants of the expense.
pub fn validate_payer(payer: Option<&str>, participants: &[Participant]) -> Result<(), InputError> {
    let payer = payer.ok_or(InputError::MissingPayer)?;
    if participants.iter().any(|p| p.id == payer) {
        Ok(())
    } else {
        Err(InputError::NotAMember(payer.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_name() {
        assert!(is_valid_name("alice"));
        assert!(is_valid_name("Flat42"));
        assert!(!is_valid_name("42flat"));
        assert!(!is_valid_name("al ice"));
        assert!(!is_valid_name("alicë"));
        assert!(!is_valid_name(""));
    }

    #[test]
    fn test_validate_names() {
        assert!(validate_names(&["a", "b2"]).is_ok());
        assert!(matches!(
            validate_names(&["a", "#b"]),
            Err(InputError::InvalidName(name)) if name == "#b"
        ));
    }

    #[test]
    fn test_validate_payer() {
        let participants = vec![Participant::new("alice", "Alice"), Participant::new("bob", "Bob")];
        assert!(validate_payer(Some("bob"), &participants).is_ok());
        assert!(matches!(
            validate_payer(Some("carol"), &participants),
            Err(InputError::NotAMember(_))
        ));
        assert!(matches!(
            validate_payer(None, &participants),
            Err(InputError::MissingPayer)
        ));
    }

    #[test]
    fn test_validate_description_and_total() {
        assert!(validate_description("Dinner").is_ok());
        assert!(validate_description("   ").is_err());
        assert!(validate_total_for_submission(1).is_ok());
        assert!(validate_total_for_submission(0).is_err());
    }
}
