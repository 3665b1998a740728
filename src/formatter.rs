//! Produce the strings that are shown to the user.
//! The formatting is plain text: amounts with two decimals and columns padded
//! so that the figures line up.

use crate::{
    analytics::{CategorySpending, DashboardStats, Forecast},
    calculator::validate,
    expense_form::ExpenseForm,
    types::{Amount, GroupSummary, Percentage, SavedExpense, SplitMethod, FULL_PERCENTAGE},
};

pub fn format_amount(amount: Amount) -> String {
    format_hundredths(&amount)
}

pub fn format_percentage(percentage: Percentage) -> String {
    format!("{}%", format_hundredths(&percentage))
}

/// Both amounts and percentages are kept in hundredths.
pub(crate) fn format_hundredths(value: &i64) -> String {
    let sign = if *value < 0 { "-" } else { "" };
    let value = value.unsigned_abs();
    format!("{}{}.{:02}", sign, value / 100, value % 100)
}

/// The current state of the expense being entered.
pub fn format_form(form: &ExpenseForm) -> String {
    let description = if form.description().is_empty() {
        "(no description)"
    } else {
        form.description()
    };

    let mut result = format!(
        "💰  {} - {} - {}\n",
        description,
        form.category().label(),
        form.date()
    );
    result += &format!(
        "Total: {}  Paid by: {}  Split: {}\n",
        format_amount(form.total_amount()),
        form.payer().unwrap_or("?"),
        form.method().name()
    );

    let split_set = form.split_set();
    if split_set.splits.is_empty() {
        result += "Nobody to split with yet, use /group to pick a group\n";
        return result;
    }

    let names: Vec<_> = split_set
        .splits
        .iter()
        .map(|s| {
            form.participants()
                .iter()
                .find(|p| p.id == s.participant_id)
                .map_or(s.participant_id.as_str(), |p| p.display_name.as_str())
        })
        .collect();
    let max_name_length = names
        .iter()
        .map(|n| n.chars().count())
        .max()
        .unwrap_or(0);

    for (position, (split, name)) in split_set.splits.iter().zip(&names).enumerate() {
        let percentage = split
            .percentage
            .map(format_percentage)
            .unwrap_or_default();
        result += &format!(
            "{:>2}. {}  {:>10}  {:>8}\n",
            position + 1,
            pad(name, max_name_length),
            format_amount(split.amount),
            percentage
        );
    }

    let method = form.method();
    if !validate(split_set, method) {
        let (label, actual, expected) = match method {
            SplitMethod::Percentage => (
                "percentages",
                format_percentage(split_set.total_percentage()),
                format_percentage(FULL_PERCENTAGE),
            ),
            _ => (
                "amounts",
                format_amount(split_set.total_split_amount()),
                format_amount(split_set.total_amount),
            ),
        };
        result += &format!("⚠️  The {label} add up to {actual} instead of {expected}\n");
    }

    result
}

pub fn format_list_expenses(expenses: &[SavedExpense]) -> String {
    if expenses.is_empty() {
        "Nothing to show!".to_string()
    } else {
        expenses
            .iter()
            .map(format_expense)
            .fold(String::new(), |a, b| a + &b + "\n")
    }
}

fn format_expense(expense: &SavedExpense) -> String {
    let splits = expense
        .splits
        .iter()
        .map(|s| format!("{}/{}", s.participant_id, format_amount(s.amount)))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "💰  {}: {} [{}] {} paid {} for {} - {}",
        expense.id,
        expense.date,
        expense.group_name,
        expense.payer_id,
        format_amount(expense.total_amount),
        splits,
        expense.description
    )
}

pub fn format_category_breakdown(breakdown: &[CategorySpending]) -> String {
    if breakdown.is_empty() {
        return "Nothing to show!".to_string();
    }

    let max_label_length = breakdown
        .iter()
        .map(|c| c.category.label().len())
        .max()
        .expect("just checked there are categories!");
    breakdown
        .iter()
        .map(|c| {
            format!(
                "{}  {:>10}  ({}%)",
                pad(c.category.label(), max_label_length),
                format_amount(c.amount),
                c.percentage
            )
        })
        .fold(String::new(), |a, b| a + &b + "\n")
}

pub fn format_group_summaries(summaries: &[GroupSummary]) -> String {
    if summaries.is_empty() {
        return "Nothing to show!".to_string();
    }

    summaries
        .iter()
        .map(|g| {
            format!(
                "- {} [{}] ({} members): {}",
                g.name,
                g.code,
                g.members,
                format_amount(g.total_expenses)
            )
        })
        .fold(String::new(), |a, b| a + &b + "\n")
}

pub fn format_dashboard_stats(stats: &DashboardStats) -> String {
    format!(
        "Total expenses: {} in {} expenses\nYour share: {} ({} of total)\n",
        format_amount(stats.total_expenses),
        stats.expense_count,
        format_amount(stats.member_share),
        format_percentage(stats.member_share_percentage)
    )
}

pub fn format_forecast(forecast: Option<&Forecast>) -> String {
    match forecast {
        Some(f) => format!(
            "Next expenses are expected between {} and {}\n",
            format_amount(f.lower),
            format_amount(f.upper)
        ),
        None => "Not enough data to forecast yet.\n".to_string(),
    }
}

pub fn format_suggestions(suggestions: &[String]) -> String {
    suggestions
        .iter()
        .fold(String::new(), |a, b| a + b + "\n")
}

fn pad(s: &str, target_length: usize) -> String {
    format!("{:<width$}", s, width = target_length)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::categorizer::Category;
    use crate::types::{ExpenseSplit, Participant, SplitField};

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(4343), "43.43");
        assert_eq!(format_amount(5), "0.05");
        assert_eq!(format_amount(-1050), "-10.50");
        assert_eq!(format_amount(0), "0.00");
        assert_eq!(format_percentage(3333), "33.33%");
    }

    #[test]
    fn test_format_form() -> anyhow::Result<()> {
        let mut form = ExpenseForm::new(NaiveDate::from_ymd_opt(2024, 1, 15).expect("test"));
        form.set_participants(vec![
            Participant::new("you", "You"),
            Participant::new("sarah", "Sarah"),
        ])?;
        form.set_total("45")?;
        form.set_description("Movie Tickets");
        form.set_payer("sarah");
        form.edit(0, SplitField::Amount, "20")?;

        let result = format_form(&form);
        assert_eq!(
            result,
            "💰  Movie Tickets - Entertainment - 2024-01-15\n\
             Total: 45.00  Paid by: sarah  Split: fixed\n \
             1. You         20.00    44.44%\n \
             2. Sarah       22.50    50.00%\n\
             ⚠️  The amounts add up to 42.50 instead of 45.00\n"
        );
        Ok(())
    }

    #[test]
    fn test_format_expense() {
        let expense = SavedExpense {
            id: 1,
            group_name: "trip".to_string(),
            total_amount: 4500,
            description: "Movie Tickets".to_string(),
            category: Some(Category::Entertainment),
            date: NaiveDate::from_ymd_opt(2024, 1, 13).expect("test"),
            payer_id: "sarah".to_string(),
            splits: vec![
                ExpenseSplit::new("sarah", 2250, None),
                ExpenseSplit::new("john", 2250, None),
            ],
        };
        assert_eq!(
            format_expense(&expense),
            "💰  1: 2024-01-13 [trip] sarah paid 45.00 for sarah/22.50 john/22.50 - Movie Tickets"
        );
    }

    #[test]
    fn test_format_category_breakdown() {
        let breakdown = vec![
            CategorySpending {
                category: Category::FoodAndDining,
                amount: 15050,
                percentage: 54,
            },
            CategorySpending {
                category: Category::Other,
                amount: 500,
                percentage: 2,
            },
        ];
        assert_eq!(
            format_category_breakdown(&breakdown),
            "Food & Dining      150.50  (54%)\nOther                5.00  (2%)\n"
        );
        assert_eq!(format_category_breakdown(&[]), "Nothing to show!");
    }

    #[test]
    fn test_format_group_summaries() {
        let summaries = vec![
            GroupSummary::new("roommates", "K3X9QA", 3, 16050),
            GroupSummary::new("trip", "0B7F21", 0, 0),
        ];
        assert_eq!(
            format_group_summaries(&summaries),
            "- roommates [K3X9QA] (3 members): 160.50\n- trip [0B7F21] (0 members): 0.00\n"
        );
    }
}
