//! Aggregate views over saved expenses: spending by category, the dashboard
//! figures, a naive short-term forecast and spending tips.

use std::collections::HashMap;

use crate::{
    categorizer::{categorize, Category},
    formatter::format_amount,
    money::{amount_from_f64, amount_to_f64, div_round, percentage_from_amount, round2, saturating_sum},
    types::{Amount, Percentage, SavedExpense},
};

/// How many of the most recent expenses the forecast looks at.
const FORECAST_WINDOW: usize = 7;

const CATEGORY_ADVICE: &[(Category, &str)] = &[
    (
        Category::FoodAndDining,
        "🍽 Try planning meals weekly to reduce frequent small food purchases.",
    ),
    (
        Category::Transportation,
        "🚗 Consider using public transport or carpooling to save fuel costs.",
    ),
    (
        Category::Entertainment,
        "🎬 Set a monthly entertainment budget to avoid overspending on leisure.",
    ),
    (
        Category::Shopping,
        "🛍 Track your shopping habits; wait 24 hours before making non-essential purchases.",
    ),
    (
        Category::Utilities,
        "💡 Review monthly bills and look for subscription plans you no longer use.",
    ),
    (
        Category::Other,
        "📂 Review 'Other' expenses to categorize them properly and find hidden costs.",
    ),
];

const GENERAL_TIPS: &[&str] = &[
    "✅ Keep 20% of your monthly income as savings buffer.",
    "📈 Try reducing expenses in your highest-spending category by 10% next month.",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySpending {
    pub category: Category,
    pub amount: Amount,
    /// Whole percent of the grand total.
    pub percentage: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_expenses: Amount,
    pub expense_count: usize,
    pub member_share: Amount,
    pub member_share_percentage: Percentage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Forecast {
    pub lower: Amount,
    pub upper: Amount,
}

/// Sum the expenses by category, biggest first.
///
/// Expenses saved without a category are categorized from their description.
pub fn category_breakdown(expenses: &[SavedExpense]) -> Vec<CategorySpending> {
    let mut by_category: HashMap<Category, Amount> = HashMap::new();
    for expense in expenses {
        let category = expense
            .category
            .unwrap_or_else(|| categorize(&expense.description));
        *by_category.entry(category).or_insert(0) += expense.total_amount;
    }

    let total: Amount = by_category.values().sum();

    let mut result: Vec<_> = by_category
        .into_iter()
        .map(|(category, amount)| CategorySpending {
            category,
            amount,
            percentage: div_round(amount as i128 * 100, total as i128),
        })
        .collect();

    result.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });
    result
}

/// The figures shown on the dashboard for one member.
pub fn dashboard_stats(expenses: &[SavedExpense], member: &str) -> DashboardStats {
    let total_expenses: Amount = expenses.iter().map(|e| e.total_amount).sum();
    let member_share: Amount = expenses
        .iter()
        .flat_map(|e| e.splits.iter())
        .filter(|s| s.participant_id == member)
        .map(|s| s.amount)
        .sum();

    DashboardStats {
        total_expenses,
        expense_count: expenses.len(),
        member_share,
        member_share_percentage: percentage_from_amount(member_share, total_expenses),
    }
}

/// Estimate the range of the next expenses from the most recent ones:
/// the mean plus or minus one standard deviation, never below zero.
pub fn forecast_next_two_days(expenses: &[SavedExpense]) -> Option<Forecast> {
    let mut recent: Vec<_> = expenses.iter().collect();
    recent.sort_by_key(|e| (e.date, e.id));

    let window = recent.len().saturating_sub(FORECAST_WINDOW);
    let amounts: Vec<f64> = recent[window..]
        .iter()
        .map(|e| amount_to_f64(e.total_amount))
        .collect();

    let (mean, std) = mean_and_std(&amounts)?;

    Some(Forecast {
        lower: amount_from_f64(round2((mean - std).max(0.0))).ok()?,
        upper: amount_from_f64(round2(mean + std)).ok()?,
    })
}

/// Personalized advice from the spending so far: a few figures, a tip for
/// each category with expenses, then general tips.
pub fn suggestions(expenses: &[SavedExpense]) -> Vec<String> {
    if expenses.is_empty() {
        return vec!["No data yet to analyze.".to_string()];
    }

    let total = saturating_sum(expenses.iter().map(|e| e.total_amount));
    let average = div_round(total as i128, expenses.len() as i128);
    let breakdown = category_breakdown(expenses);

    let mut result = vec![format!(
        "💡 Your average expense so far is {}.",
        format_amount(average)
    )];
    if let Some(top) = breakdown.first() {
        result.push(format!("📊 You've spent the most on {}.", top.category.label()));
    }
    result.push(format!(
        "📅 Your total tracked spending is {}.",
        format_amount(total)
    ));

    result.extend(
        CATEGORY_ADVICE
            .iter()
            .filter(|(category, _)| breakdown.iter().any(|c| c.category == *category))
            .map(|(_, advice)| advice.to_string()),
    );
    result.extend(GENERAL_TIPS.iter().map(|tip| tip.to_string()));
    result
}

/// Mean and sample standard deviation. One value has no deviation.
fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() < 2 {
        0.0
    } else {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    };

    Some((mean, std))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::types::ExpenseSplit;

    fn make_expense(
        id: i64,
        description: &str,
        category: Option<Category>,
        total_amount: Amount,
        day: u32,
    ) -> SavedExpense {
        let half = total_amount / 2;
        SavedExpense {
            id,
            group_name: "roommates".to_string(),
            total_amount,
            description: description.to_string(),
            category,
            date: NaiveDate::from_ymd_opt(2024, 1, day).expect("test"),
            payer_id: "john".to_string(),
            splits: vec![
                ExpenseSplit::new("john", half, None),
                ExpenseSplit::new("you", total_amount - half, None),
            ],
        }
    }

    fn make_expenses() -> Vec<SavedExpense> {
        vec![
            make_expense(1, "Dinner at Restaurant", None, 12050, 15),
            make_expense(2, "Grocery Shopping", Some(Category::Groceries), 8520, 14),
            make_expense(3, "Movie Tickets", None, 4500, 13),
            make_expense(4, "Lunch", None, 3000, 12),
        ]
    }

    #[test]
    fn test_category_breakdown() {
        let breakdown = category_breakdown(&make_expenses());

        assert_eq!(
            breakdown,
            vec![
                CategorySpending {
                    category: Category::FoodAndDining,
                    amount: 15050,
                    percentage: 54,
                },
                CategorySpending {
                    category: Category::Groceries,
                    amount: 8520,
                    percentage: 30,
                },
                CategorySpending {
                    category: Category::Entertainment,
                    amount: 4500,
                    percentage: 16,
                },
            ]
        );
    }

    #[test]
    fn test_category_breakdown_empty() {
        assert!(category_breakdown(&[]).is_empty());

        let breakdown = category_breakdown(&[make_expense(1, "Rent", None, 0, 1)]);
        assert_eq!(breakdown[0].category, Category::Other);
        assert_eq!(breakdown[0].percentage, 0);
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = dashboard_stats(&make_expenses(), "you");
        assert_eq!(stats.total_expenses, 28070);
        assert_eq!(stats.expense_count, 4);
        assert_eq!(stats.member_share, 6025 + 4260 + 2250 + 1500);
        assert_eq!(stats.member_share_percentage, 5000);

        let stats = dashboard_stats(&make_expenses(), "nobody");
        assert_eq!(stats.member_share, 0);
        assert_eq!(stats.member_share_percentage, 0);

        let stats = dashboard_stats(&[], "you");
        assert_eq!(stats.total_expenses, 0);
        assert_eq!(stats.member_share_percentage, 0);
    }

    #[test]
    fn test_mean_and_std() {
        assert_eq!(mean_and_std(&[]), None);

        let (mean, std) = mean_and_std(&[1000.0, 2000.0, 3000.0]).expect("test");
        assert_abs_diff_eq!(mean, 2000.0);
        assert_abs_diff_eq!(std, 1000.0);

        let (mean, std) = mean_and_std(&[42.0]).expect("test");
        assert_abs_diff_eq!(mean, 42.0);
        assert_abs_diff_eq!(std, 0.0);
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(suggestions(&[]), vec!["No data yet to analyze."]);

        assert_eq!(
            suggestions(&make_expenses()),
            vec![
                "💡 Your average expense so far is 70.18.",
                "📊 You've spent the most on Food & Dining.",
                "📅 Your total tracked spending is 280.70.",
                "🍽 Try planning meals weekly to reduce frequent small food purchases.",
                "🎬 Set a monthly entertainment budget to avoid overspending on leisure.",
                "✅ Keep 20% of your monthly income as savings buffer.",
                "📈 Try reducing expenses in your highest-spending category by 10% next month.",
            ]
        );
    }

    #[test]
    fn test_forecast() {
        assert_eq!(forecast_next_two_days(&[]), None);

        let expenses = vec![
            make_expense(1, "a", None, 3000, 3),
            make_expense(2, "b", None, 1000, 1),
            make_expense(3, "c", None, 2000, 2),
        ];
        assert_eq!(
            forecast_next_two_days(&expenses),
            Some(Forecast {
                lower: 1000,
                upper: 3000
            })
        );

        // Only the last seven expenses by date count, and the lower bound
        // never goes below zero.
        let mut expenses: Vec<_> = (1..=7)
            .map(|day| make_expense(day as i64, "x", None, if day % 2 == 0 { 10000 } else { 0 }, day + 1))
            .collect();
        expenses.push(make_expense(99, "old", None, 1_000_000, 1));
        let forecast = forecast_next_two_days(&expenses).expect("test");
        assert_eq!(forecast.lower, 0);
        assert!(forecast.upper < 10000);
    }
}
