//! The core of the expense logic: computing how an expense is split among
//! participants and keeping the split consistent while the user edits it.
//!
//! Every function takes the current split set by value and returns the new
//! one, so the caller owns the state and decides when it is recomputed.
//!
//! Amounts are in cents and percentages in hundredths of a percent. Whenever
//! a value has to be rounded, it is rounded half away from zero (see
//! [`crate::money`]).
//!
//! Per-participant rounding means that the amounts of a split do not always
//! add up to the total: three people sharing 100.00 get 33.33 each, one cent
//! short. This drift is tolerated while the user is editing, and removed by
//! [`reconcile`] right before the split is submitted.

use log::debug;

use crate::{
    error::SplitError,
    money::{amount_from_percentage, clamp_to_i64, div_round, percentage_from_amount},
    parser::parse_hundredths_or_zero,
    types::{Amount, ExpenseSplit, SplitField, SplitMethod, SplitSet, FULL_PERCENTAGE},
};

/// Split the total in equal parts among the participants.
///
/// Each participant gets `round2(total / n)` and `round2(100 / n)` percent.
/// The amounts may not add up to the total: call [`reconcile`] before using
/// the result as final.
pub fn initialize_equal<T: AsRef<str>>(
    participants: &[T],
    total_amount: Amount,
) -> Result<SplitSet, SplitError> {
    check_total(total_amount)?;
    if participants.is_empty() {
        return Err(SplitError::NoParticipants);
    }

    let n = participants.len() as i128;
    let amount = div_round(total_amount as i128, n);
    let percentage = div_round(FULL_PERCENTAGE as i128, n);

    let splits = participants
        .iter()
        .map(|p| ExpenseSplit::new(p.as_ref(), amount, Some(percentage)))
        .collect();

    Ok(SplitSet::new(total_amount, splits))
}

/// Update the split after the total amount of the expense changed.
///
/// Fixed amounts are left as the user entered them.
pub fn recompute_on_amount_change(
    split_set: SplitSet,
    new_total_amount: Amount,
    method: SplitMethod,
) -> Result<SplitSet, SplitError> {
    check_total(new_total_amount)?;
    debug!(
        "Recomputing {} split of {} participants for new total {}",
        method.name(),
        split_set.splits.len(),
        new_total_amount
    );

    match method {
        SplitMethod::Equal => initialize_equal(&split_set.participant_ids(), new_total_amount),
        SplitMethod::Percentage => {
            let splits = split_set
                .splits
                .into_iter()
                .map(|mut s| {
                    s.amount = amount_from_percentage(new_total_amount, s.percentage.unwrap_or(0));
                    s
                })
                .collect();
            Ok(SplitSet::new(new_total_amount, splits))
        }
        SplitMethod::FixedAmount => Ok(SplitSet::new(new_total_amount, split_set.splits)),
    }
}

/// Apply a value typed by the user to one participant and derive the other
/// field from it.
///
/// Text that is not a number counts as zero, so half-typed input never
/// fails. The other participants are not rebalanced.
pub fn edit_participant(
    mut split_set: SplitSet,
    index: usize,
    field: SplitField,
    raw_value: &str,
) -> Result<SplitSet, SplitError> {
    let total_amount = split_set.total_amount;
    let split = split_set
        .splits
        .get_mut(index)
        .ok_or(SplitError::UnknownParticipant(index))?;

    let value = parse_hundredths_or_zero(raw_value);
    match field {
        SplitField::Percentage => {
            split.percentage = Some(value);
            split.amount = amount_from_percentage(total_amount, value);
        }
        SplitField::Amount => {
            split.amount = value;
            split.percentage = Some(percentage_from_amount(value, total_amount));
        }
    }

    Ok(split_set)
}

/// Check whether the split is consistent with its method.
///
/// - equal splits are always valid
/// - percentages must add up to 100.00
/// - fixed amounts must add up to the total
///
/// Both sides are in hundredths, so the one-cent tolerance is an exact match.
pub fn validate(split_set: &SplitSet, method: SplitMethod) -> bool {
    match method {
        SplitMethod::Equal => true,
        SplitMethod::Percentage => split_set.total_percentage() == FULL_PERCENTAGE,
        SplitMethod::FixedAmount => split_set.total_split_amount() == split_set.total_amount,
    }
}

/// Like [`validate`], but tells the user what the split adds up to.
pub fn check_submittable(split_set: &SplitSet, method: SplitMethod) -> Result<(), SplitError> {
    if split_set.splits.is_empty() {
        return Err(SplitError::NoParticipants);
    }
    if validate(split_set, method) {
        return Ok(());
    }

    let (expected, actual) = match method {
        SplitMethod::Percentage => (FULL_PERCENTAGE, split_set.total_percentage()),
        _ => (split_set.total_amount, split_set.total_split_amount()),
    };
    Err(SplitError::split_mismatch(method, expected, actual))
}

/// Make the amounts add up to the total to the cent.
///
/// The whole rounding drift goes to the last participant in list order,
/// regardless of who was edited. A split that already adds up is returned
/// unchanged.
pub fn reconcile(mut split_set: SplitSet) -> SplitSet {
    let split_amount: i128 = split_set.splits.iter().map(|s| i128::from(s.amount)).sum();
    let drift = i128::from(split_set.total_amount) - split_amount;
    if drift != 0 {
        if let Some(last) = split_set.splits.last_mut() {
            debug!(
                "Assigning a drift of {} cents to {}",
                drift, last.participant_id
            );
            last.amount = clamp_to_i64(i128::from(last.amount) + drift);
        }
    }
    split_set
}

/// Switch the split to another method.
///
/// Equal splits start over, percentage splits re-derive the amounts from the
/// current percentages and fixed splits keep the current amounts.
pub fn change_method(split_set: SplitSet, method: SplitMethod) -> Result<SplitSet, SplitError> {
    let total_amount = split_set.total_amount;
    match method {
        SplitMethod::Equal | SplitMethod::Percentage => {
            recompute_on_amount_change(split_set, total_amount, method)
        }
        SplitMethod::FixedAmount => Ok(split_set),
    }
}

fn check_total(total_amount: Amount) -> Result<(), SplitError> {
    if total_amount < 0 {
        Err(SplitError::invalid_amount(total_amount.to_string()))
    } else {
        Ok(())
    }
}
