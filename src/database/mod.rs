//! Access to the data owned by the backend: groups, their members and the
//! expenses recorded in them.

use crate::{
    error::DatabaseError,
    types::{ExpenseSubmission, GroupSummary, Participant, SavedExpense},
};

type DatabaseResult<T> = Result<T, DatabaseError>;

pub mod sqlite;

/// This trait abstracts over the type of database.
///
/// The implementation could save the data in any suitable database, a remote
/// service or even in memory.
pub trait Database {
    /// Add a group with the given *group_name* and a fresh invite code.
    ///
    /// If the group already exists, it is left as it is. Returns the invite code of the group.
    fn add_group_if_not_exists(&mut self, group_name: &str) -> Result<String, DatabaseError>;

    /// Find the name of the group with the given invite code.
    fn find_group_by_code(&self, code: &str) -> Result<Option<String>, DatabaseError>;

    /// Add the given members to a group.
    ///
    /// If some of the members are already present, they are ignored. If the group does not exist,
    /// an error is returned.
    fn add_group_members_if_not_exist<T: AsRef<str>>(
        &mut self,
        group_name: &str,
        members: &[T],
    ) -> Result<(), DatabaseError>;

    /// Check if a group with the given *group_name* exists.
    fn group_exists(&self, group_name: &str) -> Result<bool, DatabaseError>;

    /// Get the members of a group, in the order they joined.
    fn get_group_members(&self, group_name: &str) -> Result<Vec<Participant>, DatabaseError>;

    /// Get every group with its member count and the total of its expenses.
    fn get_group_summaries(&self) -> Result<Vec<GroupSummary>, DatabaseError>;

    /// Save an expense together with its splits, as a single unit.
    ///
    /// Returns the ID of the new expense.
    fn save_expense(
        &mut self,
        group_name: &str,
        expense: &ExpenseSubmission,
    ) -> Result<i64, DatabaseError>;

    /// Get all expenses, oldest first.
    fn get_expenses(&self) -> Result<Vec<SavedExpense>, DatabaseError>;
}
