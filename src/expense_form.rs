//! The state of an expense being entered.
//!
//! The form is an ordinary value owned by whoever drives the input (the
//! command loop, a test). Each setter is one input event: it updates the
//! field and recomputes the split through the calculator.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{
    calculator::{
        change_method, check_submittable, edit_participant, initialize_equal, reconcile,
        recompute_on_amount_change,
    },
    categorizer::{categorize, Category},
    error::SplitError,
    parser::parse_hundredths,
    types::{Amount, ExpenseSubmission, Participant, SplitField, SplitMethod, SplitSet},
    validator::{validate_description, validate_payer, validate_total_for_submission},
};

#[derive(Clone, Debug)]
pub struct ExpenseForm {
    participants: Vec<Participant>,
    description: String,
    category: Option<Category>,
    date: NaiveDate,
    payer: Option<String>,
    method: SplitMethod,
    split_set: SplitSet,
}

impl ExpenseForm {
    pub fn new(date: NaiveDate) -> ExpenseForm {
        ExpenseForm {
            participants: vec![],
            description: String::new(),
            category: None,
            date,
            payer: None,
            method: SplitMethod::Equal,
            split_set: SplitSet::empty(),
        }
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The explicit category, or the one guessed from the description.
    pub fn category(&self) -> Category {
        self.category
            .unwrap_or_else(|| categorize(&self.description))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn payer(&self) -> Option<&str> {
        self.payer.as_deref()
    }

    pub fn method(&self) -> SplitMethod {
        self.method
    }

    pub fn split_set(&self) -> &SplitSet {
        &self.split_set
    }

    pub fn total_amount(&self) -> Amount {
        self.split_set.total_amount
    }

    /// Replace the participants. The split starts over with equal shares.
    pub fn set_participants(&mut self, participants: Vec<Participant>) -> Result<(), SplitError> {
        let total_amount = self.split_set.total_amount;
        self.split_set = if participants.is_empty() {
            SplitSet::new(total_amount, vec![])
        } else {
            let ids: Vec<_> = participants.iter().map(|p| p.id.as_str()).collect();
            initialize_equal(&ids, total_amount)?
        };

        if let Some(payer) = &self.payer {
            if !participants.iter().any(|p| &p.id == payer) {
                self.payer = None;
            }
        }
        self.participants = participants;
        Ok(())
    }

    /// Set the total from user input. Unlike per-participant fields, the total
    /// must be a valid non-negative number.
    pub fn set_total(&mut self, raw_value: &str) -> Result<(), SplitError> {
        let total_amount = parse_hundredths(raw_value)?;
        if total_amount < 0 {
            return Err(SplitError::invalid_amount(raw_value.trim().to_string()));
        }

        self.split_set = if self.split_set.splits.is_empty() {
            SplitSet::new(total_amount, vec![])
        } else {
            recompute_on_amount_change(self.split_set.clone(), total_amount, self.method)?
        };
        Ok(())
    }

    pub fn set_method(&mut self, method: SplitMethod) -> Result<(), SplitError> {
        if !self.split_set.splits.is_empty() {
            self.split_set = change_method(self.split_set.clone(), method)?;
        }
        self.method = method;
        Ok(())
    }

    /// Apply a value typed for one participant.
    ///
    /// Editing a participant of an equal split switches the form to the
    /// method matching the edited field.
    pub fn edit(&mut self, index: usize, field: SplitField, raw_value: &str) -> Result<(), SplitError> {
        self.split_set = edit_participant(self.split_set.clone(), index, field, raw_value)?;
        if self.method == SplitMethod::Equal {
            self.method = match field {
                SplitField::Percentage => SplitMethod::Percentage,
                SplitField::Amount => SplitMethod::FixedAmount,
            };
            debug!("Switched split method to {}", self.method.name());
        }
        Ok(())
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.trim().to_string();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_payer(&mut self, payer: &str) {
        self.payer = Some(payer.to_string());
    }

    /// Check the form, settle the rounding drift and produce the expense to save.
    ///
    /// On success the form is reset, keeping participants and date.
    pub fn submit(&mut self) -> anyhow::Result<ExpenseSubmission> {
        validate_description(&self.description)?;
        validate_total_for_submission(self.split_set.total_amount)?;
        validate_payer(self.payer.as_deref(), &self.participants)?;

        if let Err(e) = check_submittable(&self.split_set, self.method) {
            warn!("Rejecting expense '{}': {e}", self.description);
            return Err(e.into());
        }

        let mut splits = reconcile(self.split_set.clone()).splits;
        if self.method == SplitMethod::FixedAmount {
            for split in &mut splits {
                split.percentage = None;
            }
        }

        let submission = ExpenseSubmission {
            total_amount: self.split_set.total_amount,
            description: self.description.clone(),
            category: self.category(),
            date: self.date,
            payer_id: self.payer.clone().unwrap_or_default(),
            method: self.method,
            splits,
        };

        self.reset()?;
        Ok(submission)
    }

    /// Clear everything about the current expense, keeping participants and date.
    pub fn reset(&mut self) -> Result<(), SplitError> {
        self.description.clear();
        self.category = None;
        self.payer = None;
        self.method = SplitMethod::Equal;
        self.split_set = SplitSet::empty();
        let participants = std::mem::take(&mut self.participants);
        self.set_participants(participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_form() -> anyhow::Result<ExpenseForm> {
        let mut form = ExpenseForm::new(NaiveDate::from_ymd_opt(2024, 1, 15).expect("test"));
        form.set_participants(vec![
            Participant::new("you", "You"),
            Participant::new("john", "John"),
            Participant::new("sarah", "Sarah"),
        ])?;
        Ok(form)
    }

    fn amounts(form: &ExpenseForm) -> Vec<Amount> {
        form.split_set().splits.iter().map(|s| s.amount).collect()
    }

    #[test]
    fn test_submit_equal_split() -> anyhow::Result<()> {
        let mut form = make_form()?;
        form.set_total("100")?;
        form.set_description("Dinner at restaurant");
        form.set_payer("john");

        assert_eq!(amounts(&form), vec![3333, 3333, 3333]);

        let submission = form.submit()?;
        assert_eq!(submission.total_amount, 10000);
        assert_eq!(submission.category, Category::FoodAndDining);
        assert_eq!(submission.payer_id, "john");
        assert_eq!(submission.method, SplitMethod::Equal);
        let amounts: Vec<_> = submission.splits.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![3333, 3333, 3334]);

        // The form is ready for the next expense.
        assert_eq!(form.description(), "");
        assert_eq!(form.payer(), None);
        assert_eq!(form.total_amount(), 0);
        assert_eq!(form.participants().len(), 3);
        Ok(())
    }

    #[test]
    fn test_submit_percentage_split() -> anyhow::Result<()> {
        let mut form = make_form()?;
        form.set_total("85.20")?;
        form.set_description("Weekly groceries");
        form.set_category(Category::Groceries);
        form.set_payer("you");
        form.set_method(SplitMethod::Percentage)?;
        form.edit(0, SplitField::Percentage, "50")?;
        form.edit(1, SplitField::Percentage, "25")?;

        let e = form.submit().expect_err("percentages add up to 83.33");
        assert!(matches!(
            e.downcast_ref::<SplitError>(),
            Some(SplitError::SplitMismatch { actual: 8333, .. })
        ));

        form.edit(2, SplitField::Percentage, "25")?;
        let submission = form.submit()?;
        assert_eq!(submission.category, Category::Groceries);
        let amounts: Vec<_> = submission.splits.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![4260, 2130, 2130]);
        assert!(submission.splits.iter().all(|s| s.percentage.is_some()));
        Ok(())
    }

    #[test]
    fn test_submit_fixed_split() -> anyhow::Result<()> {
        let mut form = make_form()?;
        form.set_total("45")?;
        form.set_description("Movie Tickets");
        form.set_payer("sarah");
        form.edit(0, SplitField::Amount, "15")?;
        assert_eq!(form.method(), SplitMethod::FixedAmount);
        form.edit(1, SplitField::Amount, "10")?;
        form.edit(2, SplitField::Amount, "20")?;

        let submission = form.submit()?;
        let amounts: Vec<_> = submission.splits.iter().map(|s| s.amount).collect();
        assert_eq!(amounts, vec![1500, 1000, 2000]);
        assert!(submission.splits.iter().all(|s| s.percentage.is_none()));
        Ok(())
    }

    #[test]
    fn test_submit_checks_the_form() -> anyhow::Result<()> {
        let mut form = make_form()?;
        form.set_payer("john");
        form.set_total("10")?;
        assert!(form.submit().is_err());

        form.set_description("Taxi");
        form.set_total("0")?;
        assert!(form.submit().is_err());

        form.set_total("10")?;
        form.set_payer("nobody");
        assert!(form.submit().is_err());

        form.set_payer("john");
        assert!(form.submit().is_ok());
        Ok(())
    }

    #[test]
    fn test_set_total() -> anyhow::Result<()> {
        let mut form = make_form()?;
        assert_eq!(
            form.set_total("abc"),
            Err(SplitError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            form.set_total("-5"),
            Err(SplitError::InvalidAmount("-5".to_string()))
        );
        assert_eq!(form.total_amount(), 0);

        let mut form = ExpenseForm::new(form.date());
        form.set_total("12")?;
        assert_eq!(form.total_amount(), 1200);
        form.set_participants(vec![Participant::new("a", "A"), Participant::new("b", "B")])?;
        assert_eq!(amounts(&form), vec![600, 600]);
        Ok(())
    }

    #[test]
    fn test_set_participants_drops_unknown_payer() -> anyhow::Result<()> {
        let mut form = make_form()?;
        form.set_payer("sarah");
        form.set_participants(vec![Participant::new("you", "You")])?;
        assert_eq!(form.payer(), None);
        Ok(())
    }
}
