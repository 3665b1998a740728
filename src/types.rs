//! Internal representation of data.

use chrono::NaiveDate;

use crate::categorizer::Category;
use crate::money::saturating_sum;

/// Money in cents.
pub type Amount = i64;

/// A share in hundredths of a percent (`33.33%` is `3333`).
pub type Percentage = i64;

pub const FULL_PERCENTAGE: Percentage = 100 * 100;

/// A group member as supplied by the member directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub display_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitMethod {
    Equal,
    Percentage,
    FixedAmount,
}

/// The per-participant field that the user edits directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitField {
    Percentage,
    Amount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseSplit {
    pub participant_id: String,
    pub amount: Amount,
    pub percentage: Option<Percentage>,
}

/// The split of one expense. It is owned by the caller and passed by value
/// through every calculator operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitSet {
    pub total_amount: Amount,
    pub splits: Vec<ExpenseSplit>,
}

/// What is handed over to the expense submission endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseSubmission {
    pub total_amount: Amount,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    pub payer_id: String,
    pub method: SplitMethod,
    pub splits: Vec<ExpenseSplit>,
}

/// An expense read back from the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedExpense {
    pub id: i64,
    pub group_name: String,
    pub total_amount: Amount,
    pub description: String,
    pub category: Option<Category>,
    pub date: NaiveDate,
    pub payer_id: String,
    pub splits: Vec<ExpenseSplit>,
}

/// One row of the grouped membership listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupSummary {
    pub name: String,
    /// Invite code: anyone who knows it can join the group.
    pub code: String,
    pub members: usize,
    pub total_expenses: Amount,
}

impl Participant {
    pub fn new(id: &str, display_name: &str) -> Participant {
        Participant {
            id: id.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

impl SplitMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SplitMethod::Equal => "equal",
            SplitMethod::Percentage => "percentage",
            SplitMethod::FixedAmount => "fixed",
        }
    }

    pub fn from_name(name: &str) -> Option<SplitMethod> {
        match name.trim().to_lowercase().as_str() {
            "equal" => Some(SplitMethod::Equal),
            "percentage" | "ratio" | "%" => Some(SplitMethod::Percentage),
            "fixed" | "amount" | "item" => Some(SplitMethod::FixedAmount),
            _ => None,
        }
    }
}

impl ExpenseSplit {
    pub fn new(participant_id: &str, amount: Amount, percentage: Option<Percentage>) -> ExpenseSplit {
        ExpenseSplit {
            participant_id: participant_id.to_string(),
            amount,
            percentage,
        }
    }
}

impl SplitSet {
    pub fn new(total_amount: Amount, splits: Vec<ExpenseSplit>) -> SplitSet {
        SplitSet {
            total_amount,
            splits,
        }
    }

    pub fn empty() -> SplitSet {
        SplitSet::new(0, vec![])
    }

    pub fn participant_ids(&self) -> Vec<&str> {
        self.splits.iter().map(|s| s.participant_id.as_str()).collect()
    }

    pub fn total_split_amount(&self) -> Amount {
        saturating_sum(self.splits.iter().map(|s| s.amount))
    }

    pub fn total_percentage(&self) -> Percentage {
        saturating_sum(self.splits.iter().filter_map(|s| s.percentage))
    }
}

impl GroupSummary {
    pub fn new(name: &str, code: &str, members: usize, total_expenses: Amount) -> GroupSummary {
        GroupSummary {
            name: name.to_string(),
            code: code.to_string(),
            members,
            total_expenses,
        }
    }
}
