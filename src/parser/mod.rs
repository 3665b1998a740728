//! Parse the user input.

mod command;
mod number;

pub use command::{parse_command, parse_edit, Command};
pub use number::{parse_hundredths, parse_hundredths_or_zero};

use crate::error::InputError;

const ADD_MEMBERS_EXAMPLE: &str = "/addmembers roommates alice bob";

/// Parse `group_name member [member...]`. Names are lowercased.
pub fn parse_group_and_members(s: &str) -> Result<(String, Vec<String>), InputError> {
    let mut parts: Vec<_> = s
        .split(' ')
        .filter_map(|x| {
            if x.is_empty() {
                None
            } else {
                Some(x.to_lowercase())
            }
        })
        .collect();
    if parts.len() < 2 {
        Err(InputError::invalid_command_syntax(
            "addmembers",
            ADD_MEMBERS_EXAMPLE,
        ))
    } else {
        let members = parts.split_off(1);
        Ok((
            parts
                .pop()
                .expect("Just checked that the Vec contains at least two elements"),
            members,
        ))
    }
}
