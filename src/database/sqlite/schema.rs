const CREATE_GROUPS_TABLE: &str = "CREATE TABLE IF NOT EXISTS groups (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  name TEXT NOT NULL UNIQUE,
  code TEXT NOT NULL UNIQUE,
  created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_GROUP_MEMBERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS group_members (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  group_id INTEGER NOT NULL,
  member_name TEXT NOT NULL,
  display_name TEXT NOT NULL,
  joined_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
  UNIQUE(group_id, member_name)
)";

const CREATE_EXPENSES_TABLE: &str = "CREATE TABLE IF NOT EXISTS expenses (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  group_id INTEGER NOT NULL,
  amount INTEGER NOT NULL,
  description TEXT NOT NULL,
  category TEXT,
  expense_date DATE NOT NULL,
  payer TEXT NOT NULL,
  split_method TEXT NOT NULL,
  created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)";

const CREATE_EXPENSE_SPLITS_TABLE: &str = "CREATE TABLE IF NOT EXISTS expense_splits (
  expense_id INTEGER NOT NULL,
  position INTEGER NOT NULL,
  member_name TEXT NOT NULL,
  amount INTEGER NOT NULL,
  percentage INTEGER,
  UNIQUE(expense_id, member_name)
)";

pub fn create_all_tables(connection: &rusqlite::Connection) -> anyhow::Result<()> {
    connection.execute(CREATE_GROUPS_TABLE, ())?;
    connection.execute(CREATE_GROUP_MEMBERS_TABLE, ())?;
    connection.execute(CREATE_EXPENSES_TABLE, ())?;
    connection.execute(CREATE_EXPENSE_SPLITS_TABLE, ())?;
    Ok(())
}
