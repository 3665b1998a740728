//! Functions that check the validity of user input by running query to the database.
//!
//! These checks are necessary in order to return nice error messages,
//! but the database should still fail when the actual query is run.

use std::collections::HashSet;

use crate::database::Database;
use crate::error::InputError;

/// Verify that a group with the given name exists in the database.
pub fn validate_group_exists<D: Database>(group_name: &str, database: &D) -> anyhow::Result<()> {
    if database.group_exists(group_name)? {
        Ok(())
    } else {
        Err(InputError::unregistered_group(group_name.to_string()).into())
    }
}

/// Check that all the given names are members of the group.
pub fn validate_members_exist<D: Database, T: AsRef<str>>(
    group_name: &str,
    members: &[T],
    database: &D,
) -> anyhow::Result<()> {
    if !members.is_empty() {
        let registered_members: HashSet<_> = database
            .get_group_members(group_name)?
            .into_iter()
            .map(|p| p.id)
            .collect();

        for member in members {
            if !registered_members.contains(member.as_ref()) {
                return Err(InputError::NotAMember(member.as_ref().to_string()).into());
            }
        }
    }
    Ok(())
}
