//! Parse the commands of the interactive front end.
//!
//! A command is a line like `/total 12.50`: a slash, the command name and an
//! optional payload.

use chrono::NaiveDate;
use nom::{
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{alpha1, char, digit1, multispace0, multispace1},
    combinator::{all_consuming, eof, map, map_res, rest, value},
    sequence::{preceded, tuple},
    IResult,
};

use super::parse_group_and_members;
use crate::{
    categorizer::Category,
    error::InputError,
    types::{SplitField, SplitMethod},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    AddGroup(String),
    AddMembers { group: String, members: Vec<String> },
    SelectGroup(String),
    Groups,
    Total(String),
    Method(SplitMethod),
    Edit {
        position: usize,
        field: SplitField,
        value: String,
    },
    Description(String),
    Category(Category),
    Payer(String),
    Date(NaiveDate),
    Show,
    Submit,
    Reset,
    List,
    Stats,
    Categories,
    Forecast,
    Suggestions,
    Join { code: String, member: String },
}

pub fn parse_command(s: &str) -> Result<Command, InputError> {
    let (payload, name) = preceded(multispace0, command_name)(s)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| {
            InputError::UnknownCommand(s.trim().to_string())
        })?;
    let payload = payload.trim();

    let command = match name.to_lowercase().as_str() {
        "help" | "start" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "addgroup" => Command::AddGroup(non_empty(payload, "addgroup", "/addgroup roommates")?),
        "addmembers" => {
            let (group, members) = parse_group_and_members(payload)?;
            Command::AddMembers { group, members }
        }
        "group" => Command::SelectGroup(non_empty(payload, "group", "/group roommates")?),
        "groups" => Command::Groups,
        "total" => Command::Total(payload.to_string()),
        "method" => Command::Method(
            SplitMethod::from_name(payload)
                .ok_or_else(|| InputError::UnknownSplitMethod(payload.to_string()))?,
        ),
        "edit" => {
            let (position, field, value) = parse_edit(payload)?;
            Command::Edit {
                position,
                field,
                value,
            }
        }
        "description" | "desc" => Command::Description(payload.to_string()),
        "category" => Command::Category(
            Category::from_name(payload)
                .ok_or_else(|| InputError::UnknownCategory(payload.to_string()))?,
        ),
        "payer" => Command::Payer(non_empty(payload, "payer", "/payer alice")?.to_lowercase()),
        "date" => Command::Date(
            NaiveDate::parse_from_str(payload, "%Y-%m-%d")
                .map_err(|_| InputError::InvalidDate(payload.to_string()))?,
        ),
        "show" => Command::Show,
        "submit" => Command::Submit,
        "reset" => Command::Reset,
        "list" => Command::List,
        "stats" | "dashboard" => Command::Stats,
        "categories" => Command::Categories,
        "forecast" => Command::Forecast,
        "suggestions" | "tips" => Command::Suggestions,
        "join" => {
            let (code, member) = parse_join(payload)?;
            Command::Join { code, member }
        }
        _ => return Err(InputError::UnknownCommand(name.to_string())),
    };

    Ok(command)
}

fn command_name(s: &str) -> IResult<&str, &str> {
    preceded(char('/'), alpha1)(s)
}

fn non_empty(payload: &str, command: &str, example: &str) -> Result<String, InputError> {
    if payload.is_empty() {
        Err(InputError::invalid_command_syntax(command, example))
    } else {
        Ok(payload.to_string())
    }
}

/// Parse `CODE member`. Codes are upper case, member names lower case.
fn parse_join(s: &str) -> Result<(String, String), InputError> {
    match s.split_whitespace().collect::<Vec<_>>()[..] {
        [code, member] => Ok((code.to_uppercase(), member.to_lowercase())),
        _ => Err(InputError::invalid_command_syntax("join", "/join K3X9QA alice")),
    }
}

/// Parse `position field value`, where field is `amount`, `percentage` or `%`.
///
/// The value is kept as raw text: the calculator decides how to read it.
pub fn parse_edit(s: &str) -> Result<(usize, SplitField, String), InputError> {
    fn do_parse(s: &str) -> IResult<&str, (usize, SplitField, &str)> {
        map(
            tuple((
                map_res(digit1, |d: &str| d.parse::<usize>()),
                multispace1,
                alt((
                    value(SplitField::Percentage, tag_no_case("percentage")),
                    value(SplitField::Percentage, tag_no_case("%")),
                    value(SplitField::Amount, tag_no_case("amount")),
                )),
                alt((multispace1, eof)),
                rest,
            )),
            |(position, _, field, _, raw)| (position, field, raw),
        )(s)
    }

    all_consuming(do_parse)(s.trim())
        .map(|(_, (position, field, raw))| (position, field, raw.trim().to_string()))
        .map_err(|_| InputError::invalid_command_syntax("edit", "/edit 2 percentage 40"))
}
