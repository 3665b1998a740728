use std::env;
use std::io::{self, BufRead, Write};

use chrono::Local;
use log::{error, info, warn};

use splitify::database::sqlite::SqliteDatabase;
use splitify::expense_form::ExpenseForm;
use splitify::handlers::{handle_command, Session, HELP};
use splitify::parser::{parse_command, Command};

const DEFAULT_DATABASE_PATH: &str = "splitify.db";
const DEFAULT_USER: &str = "you";

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let database_path =
        env::var("SPLITIFY_DB").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
    let user = env::var("SPLITIFY_USER")
        .map(|u| u.to_lowercase())
        .unwrap_or_else(|_| DEFAULT_USER.to_string());

    info!("Initializing database at {database_path}...");
    let mut database = SqliteDatabase::new(&database_path)
        .map_err(|e| {
            error!("Cannot initialize database: {}", e);
            e
        })?;

    let form = ExpenseForm::new(Local::now().date_naive());
    let mut session = Session::new(form, &user);

    println!("{HELP}");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };
        let quit = command == Command::Quit;

        match handle_command(command, &mut session, &mut database) {
            Ok(output) => println!("{output}"),
            Err(e) => {
                warn!("Command '{}' failed: {:#}", line.trim(), e);
                println!("An error occurred: {e}");
            }
        }
        stdout.flush()?;

        if quit {
            break;
        }
    }

    info!("Bye");
    Ok(())
}
