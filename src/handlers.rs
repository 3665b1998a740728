//! Handlers of the interactive commands.
//!
//! Each handler applies one command to the session and the database and
//! returns the text to show. They hold no state of their own, so they can be
//! tested without a terminal.

use log::{debug, info};

use crate::{
    analytics::{category_breakdown, dashboard_stats, forecast_next_two_days, suggestions},
    database::Database,
    error::{InputError, SplitError},
    expense_form::ExpenseForm,
    formatter::{
        format_amount, format_category_breakdown, format_dashboard_stats, format_forecast, format_form,
        format_group_summaries, format_list_expenses, format_suggestions,
    },
    parser::Command,
    types::SplitField,
    validator::{validate_group_exists, validate_members_exist, validate_name, validate_names},
};

pub const HELP: &str = "Splitify keeps track of shared expenses. Supported commands:
/addgroup name - create a group and get its invite code
/addmembers group member1 member2 - add members to a group
/join CODE member - join the group with the given invite code
/groups - list groups with their members and spending
/group name - start entering expenses for a group
/total 12.50 - set the total of the expense
/method equal|percentage|fixed - choose how the expense is split
/edit 2 percentage 40 - set the share of the second participant (or: /edit 2 amount 5)
/desc text - describe the expense
/category food|transport|entertainment|utilities|groceries|shopping|other
/payer name - who paid
/date 2024-01-15 - when the expense happened
/show - show the expense being entered
/submit - save the expense
/reset - discard the expense being entered
/list - list all expenses
/stats - dashboard figures
/categories - spending by category
/forecast - expected range of the next expenses
/suggestions - tips based on your spending
/quit - exit";

/// What the command loop owns between two commands.
pub struct Session {
    pub form: ExpenseForm,
    pub group: Option<String>,
    /// The member whose share the dashboard shows.
    pub user: String,
}

impl Session {
    pub fn new(form: ExpenseForm, user: &str) -> Session {
        Session {
            form,
            group: None,
            user: user.to_string(),
        }
    }
}

pub fn handle_command<D: Database>(
    command: Command,
    session: &mut Session,
    database: &mut D,
) -> anyhow::Result<String> {
    debug!("Handling command {:?}", command);

    match command {
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok("Bye!".to_string()),
        Command::AddGroup(group_name) => handle_add_group(database, &group_name),
        Command::AddMembers { group, members } => handle_add_members(database, &group, &members),
        Command::Join { code, member } => handle_join(database, &code, &member),
        Command::SelectGroup(group_name) => handle_select_group(session, database, &group_name),
        Command::Groups => Ok(format_group_summaries(&database.get_group_summaries()?)),
        Command::Total(raw_value) => {
            session.form.set_total(&raw_value)?;
            Ok(format_form(&session.form))
        }
        Command::Method(method) => {
            session.form.set_method(method)?;
            Ok(format_form(&session.form))
        }
        Command::Edit {
            position,
            field,
            value,
        } => handle_edit(session, position, field, &value),
        Command::Description(description) => {
            session.form.set_description(&description);
            Ok(format_form(&session.form))
        }
        Command::Category(category) => {
            session.form.set_category(category);
            Ok(format_form(&session.form))
        }
        Command::Payer(payer) => {
            session.form.set_payer(&payer);
            Ok(format_form(&session.form))
        }
        Command::Date(date) => {
            session.form.set_date(date);
            Ok(format_form(&session.form))
        }
        Command::Show => Ok(format_form(&session.form)),
        Command::Submit => handle_submit(session, database),
        Command::Reset => {
            session.form.reset()?;
            Ok(format_form(&session.form))
        }
        Command::List => Ok(format_list_expenses(&database.get_expenses()?)),
        Command::Stats => {
            let expenses = database.get_expenses()?;
            Ok(format_dashboard_stats(&dashboard_stats(&expenses, &session.user)))
        }
        Command::Categories => {
            let expenses = database.get_expenses()?;
            Ok(format_category_breakdown(&category_breakdown(&expenses)))
        }
        Command::Forecast => {
            let expenses = database.get_expenses()?;
            Ok(format_forecast(forecast_next_two_days(&expenses).as_ref()))
        }
        Command::Suggestions => {
            let expenses = database.get_expenses()?;
            Ok(format_suggestions(&suggestions(&expenses)))
        }
    }
}

fn handle_add_group<D: Database>(database: &mut D, group_name: &str) -> anyhow::Result<String> {
    let group_name = group_name.trim().to_lowercase();
    validate_name(&group_name)?;
    debug!("Creating group named {group_name}");

    let code = database.add_group_if_not_exists(&group_name)?;
    Ok(format!(
        "Group {group_name} is ready, add people with /addmembers or share the invite code {code}"
    ))
}

fn handle_add_members<D: Database>(
    database: &mut D,
    group_name: &str,
    members: &[String],
) -> anyhow::Result<String> {
    validate_name(group_name)?;
    validate_names(members)?;
    debug!(
        "Adding group members to group named {group_name}. Members: {:#?}",
        members
    );

    validate_group_exists(group_name, database)?;
    database.add_group_members_if_not_exist(group_name, members)?;
    Ok(format!("Added {} to {group_name}", members.join(", ")))
}

fn handle_join<D: Database>(database: &mut D, code: &str, member: &str) -> anyhow::Result<String> {
    validate_name(member)?;
    let group_name = database
        .find_group_by_code(code)?
        .ok_or_else(|| InputError::UnknownGroupCode(code.to_string()))?;
    debug!("Adding {member} to group {group_name} with code {code}");

    database.add_group_members_if_not_exist(&group_name, &[member])?;
    Ok(format!("{member} joined {group_name}"))
}

/// Pick the group the next expenses belong to. Its members become the
/// participants of the expense being entered.
fn handle_select_group<D: Database>(
    session: &mut Session,
    database: &mut D,
    group_name: &str,
) -> anyhow::Result<String> {
    let group_name = group_name.trim().to_lowercase();
    validate_group_exists(&group_name, database)?;

    let members = database.get_group_members(&group_name)?;
    session.form.set_participants(members)?;
    session.group = Some(group_name);
    Ok(format_form(&session.form))
}

/// Positions are shown to the user starting from 1.
fn handle_edit(
    session: &mut Session,
    position: usize,
    field: SplitField,
    raw_value: &str,
) -> anyhow::Result<String> {
    let index = position
        .checked_sub(1)
        .ok_or(SplitError::UnknownParticipant(position))?;
    session
        .form
        .edit(index, field, raw_value)
        .map_err(|e| match e {
            SplitError::UnknownParticipant(_) => SplitError::UnknownParticipant(position),
            e => e,
        })?;
    Ok(format_form(&session.form))
}

fn handle_submit<D: Database>(session: &mut Session, database: &mut D) -> anyhow::Result<String> {
    let group_name = session.group.clone().ok_or(InputError::NoGroupSelected)?;
    validate_group_exists(&group_name, database)?;

    let participant_ids = session.form.split_set().participant_ids();
    validate_members_exist(&group_name, &participant_ids, database)?;

    // The form resets on submit, so only keep that if the expense was saved.
    let mut form = session.form.clone();
    let expense = form.submit()?;
    let expense_id = database.save_expense(&group_name, &expense)?;
    session.form = form;
    info!(
        "Saved expense {expense_id} of {} in group {group_name}",
        expense.total_amount
    );

    Ok(format!(
        "Expense {expense_id} saved: {} paid {} for {}",
        expense.payer_id,
        format_amount(expense.total_amount),
        expense.description
    ))
}
