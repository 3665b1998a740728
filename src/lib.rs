//! Splitify: shared expenses split among the members of a group.
//!
//! The heart of the crate is [`calculator`], which computes equal, percentage
//! and fixed-amount splits and keeps them adding up to the total. The other
//! modules wrap it into an expense-entry form, a local store and a small
//! command-line front end.

pub mod analytics;
pub mod calculator;
pub mod categorizer;
pub mod database;
pub mod error;
pub mod expense_form;
pub mod formatter;
pub mod handlers;
pub mod money;
pub mod parser;
pub mod types;
pub mod validator;
