//! The implementation of a data storage using Sqlite.

use std::path::Path;

use anyhow::anyhow;
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::{
    categorizer::Category,
    error::DatabaseError,
    types::{ExpenseSplit, ExpenseSubmission, GroupSummary, Participant, SavedExpense},
};

use super::{Database, DatabaseResult};

mod schema;

const GROUP_CODE_LENGTH: usize = 6;

pub struct SqliteDatabase {
    connection: Connection,
}

impl SqliteDatabase {
    pub fn new<P: AsRef<Path>>(path: P) -> DatabaseResult<SqliteDatabase> {
        let connection = Connection::open(path)
            .map_err(|e| DatabaseError::new("cannot open database", e.into()))?;
        schema::create_all_tables(&connection)
            .map_err(|e| DatabaseError::new("cannot create tables", e))?;
        Ok(SqliteDatabase { connection })
    }
}

impl Database for SqliteDatabase {
    fn add_group_if_not_exists(&mut self, group_name: &str) -> DatabaseResult<String> {
        let fn_impl = || {
            self.connection.execute(
                "INSERT INTO groups (name, code) VALUES (?1, ?2) ON CONFLICT(name) DO NOTHING",
                params![&group_name, &generate_group_code()],
            )?;
            let code: String = self.connection.query_row(
                "SELECT code FROM groups WHERE name = ?1",
                params![&group_name],
                |row| row.get(0),
            )?;
            Ok(code)
        };

        fn_impl().map_err(|e| map_error("cannot add group", e))
    }

    fn find_group_by_code(&self, code: &str) -> DatabaseResult<Option<String>> {
        let fn_impl = || {
            let group_name = self
                .connection
                .query_row(
                    "SELECT name FROM groups WHERE code = ?1",
                    params![&code],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(group_name)
        };

        fn_impl().map_err(|e| map_error("cannot find group by code", e))
    }

    fn add_group_members_if_not_exist<T: AsRef<str>>(
        &mut self,
        group_name: &str,
        members: &[T],
    ) -> DatabaseResult<()> {
        let mut fn_impl = || {
            let tx = self.connection.transaction()?;

            let group_id: i64 = tx
                .query_row(
                    "SELECT id FROM groups WHERE name = ?1",
                    params![&group_name],
                    |row| row.get(0),
                )
                .optional()?
                .ok_or_else(|| anyhow!("group `{group_name}` does not exist"))?;

            {
                let mut insert_member_stmt = tx.prepare_cached(
                    "INSERT INTO group_members (group_id, member_name, display_name) VALUES (?1, ?2, ?3)
                     ON CONFLICT DO NOTHING",
                )?;

                for member in members {
                    let member = member.as_ref();
                    insert_member_stmt.execute(params![
                        &group_id,
                        &member,
                        &display_name(member)
                    ])?;
                }
            }

            tx.commit()?;
            Ok(())
        };

        fn_impl().map_err(|e| map_error("cannot add group members", e))
    }

    fn group_exists(&self, group_name: &str) -> DatabaseResult<bool> {
        let fn_impl = || {
            let exists = self
                .connection
                .query_row(
                    "SELECT 1 FROM groups WHERE name = ?1",
                    params![&group_name],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            Ok(exists)
        };

        fn_impl().map_err(|e| map_error("cannot check if group exists", e))
    }

    fn get_group_members(&self, group_name: &str) -> DatabaseResult<Vec<Participant>> {
        let fn_impl = || {
            let mut stmt = self.connection.prepare_cached(
                "SELECT gm.member_name, gm.display_name FROM groups g
                 INNER JOIN group_members gm ON g.id = gm.group_id
                 WHERE g.name = :group_name
                 ORDER BY gm.id",
            )?;

            let member_iter = stmt.query_map(&[(":group_name", &group_name)], |row| {
                Ok(Participant {
                    id: row.get(0)?,
                    display_name: row.get(1)?,
                })
            })?;

            let members = member_iter.collect::<Result<_, _>>()?;
            Ok(members)
        };

        fn_impl().map_err(|e| map_error("cannot get group members", e))
    }

    fn get_group_summaries(&self) -> DatabaseResult<Vec<GroupSummary>> {
        let fn_impl = || {
            let mut stmt = self.connection.prepare_cached(
                "SELECT g.name, g.code,
                   (SELECT COUNT(*) FROM group_members gm WHERE gm.group_id = g.id),
                   (SELECT COALESCE(SUM(e.amount), 0) FROM expenses e WHERE e.group_id = g.id)
                 FROM groups g
                 ORDER BY g.name",
            )?;

            let summary_iter = stmt.query_map([], |row| {
                let name: String = row.get(0)?;
                let code: String = row.get(1)?;
                let members: i64 = row.get(2)?;
                Ok(GroupSummary::new(&name, &code, members as usize, row.get(3)?))
            })?;

            let summaries = summary_iter.collect::<Result<_, _>>()?;
            Ok(summaries)
        };

        fn_impl().map_err(|e| map_error("cannot get group summaries", e))
    }

    fn save_expense(
        &mut self,
        group_name: &str,
        expense: &ExpenseSubmission,
    ) -> DatabaseResult<i64> {
        let mut fn_impl = || {
            let tx = self.connection.transaction()?;

            let expense_id: i64 = {
                let mut insert_expense_stmt = tx.prepare_cached(
                    "INSERT INTO expenses (group_id, amount, description, category, expense_date, payer, split_method)
                     SELECT id, ?2, ?3, ?4, ?5, ?6, ?7 FROM groups WHERE name = ?1
                     RETURNING id",
                )?;

                insert_expense_stmt
                    .query_row(
                        params![
                            &group_name,
                            &expense.total_amount,
                            &expense.description,
                            &expense.category.name(),
                            &expense.date,
                            &expense.payer_id,
                            &expense.method.name(),
                        ],
                        |row| row.get(0),
                    )
                    .optional()?
                    .ok_or_else(|| anyhow!("group `{group_name}` does not exist"))?
            };

            debug!("expense_id is {expense_id}");

            {
                let mut insert_split_stmt = tx.prepare_cached(
                    "INSERT INTO expense_splits (expense_id, position, member_name, amount, percentage)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;

                for (position, split) in expense.splits.iter().enumerate() {
                    insert_split_stmt.execute(params![
                        &expense_id,
                        &(position as i64),
                        &split.participant_id,
                        &split.amount,
                        &split.percentage,
                    ])?;
                }
            }

            tx.commit()?;

            Ok(expense_id)
        };

        fn_impl().map_err(|e| map_error("cannot save expense", e))
    }

    fn get_expenses(&self) -> DatabaseResult<Vec<SavedExpense>> {
        let fn_impl = || {
            let mut stmt = self.connection.prepare_cached(
                "SELECT e.id, g.name, e.amount, e.description, e.category, e.expense_date, e.payer,
                        s.member_name, s.amount, s.percentage
                 FROM expenses e
                 INNER JOIN groups g ON e.group_id = g.id
                 INNER JOIN expense_splits s ON e.id = s.expense_id
                 ORDER BY e.expense_date, e.id, s.position",
            )?;

            let expense_iter = stmt.query_map([], |row| {
                Ok(ExpenseQuery {
                    id: row.get(0)?,
                    g_name: row.get(1)?,
                    e_amount: row.get(2)?,
                    e_description: row.get(3)?,
                    e_category: row.get(4)?,
                    e_date: row.get(5)?,
                    e_payer: row.get(6)?,
                    s_member: row.get(7)?,
                    s_amount: row.get(8)?,
                    s_percentage: row.get(9)?,
                })
            })?;

            let expenses: Result<Vec<_>, _> = expense_iter.collect();
            Ok(parse_expenses_query(expenses?))
        };

        fn_impl().map_err(|e| map_error("cannot get expenses", e))
    }
}

/// Rows are ordered by expense, so each expense is a contiguous run of rows.
fn parse_expenses_query(rows: Vec<ExpenseQuery>) -> Vec<SavedExpense> {
    let mut result: Vec<SavedExpense> = vec![];
    for row in rows {
        let split = ExpenseSplit::new(&row.s_member, row.s_amount, row.s_percentage);
        match result.last_mut() {
            Some(expense) if expense.id == row.id => expense.splits.push(split),
            _ => result.push(SavedExpense {
                id: row.id,
                group_name: row.g_name,
                total_amount: row.e_amount,
                description: row.e_description,
                category: row.e_category.as_deref().and_then(Category::from_name),
                date: row.e_date,
                payer_id: row.e_payer,
                splits: vec![split],
            }),
        }
    }
    result
}

struct ExpenseQuery {
    id: i64,
    g_name: String,
    e_amount: i64,
    e_description: String,
    e_category: Option<String>,
    e_date: NaiveDate,
    e_payer: String,
    s_member: String,
    s_amount: i64,
    s_percentage: Option<i64>,
}

/// Upper-case hex digits taken from a random UUID.
fn generate_group_code() -> String {
    Uuid::new_v4().simple().to_string()[..GROUP_CODE_LENGTH].to_uppercase()
}

fn display_name(member: &str) -> String {
    let mut chars = member.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn map_error<T: AsRef<str>>(message: T, e: anyhow::Error) -> DatabaseError {
    match e.downcast::<DatabaseError>() {
        Ok(e) => e,
        Err(e) => DatabaseError::new(message, e),
    }
}
