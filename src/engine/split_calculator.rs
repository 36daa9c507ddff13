//! Exact-cent expense splitting.
//!
//! Every successful split adds up to its total to the cent. Rounding leftovers
//! follow a fixed rule: an equal split hands the extra cents to the first
//! participants in input order, every other method puts the leftover on the
//! last input row.

use crate::constants::{EXACT_SPLIT_TOLERANCE_CENTS, PERCENT_SCALE, PERCENTAGE_TOLERANCE};
use crate::error::SplitError;
use crate::models::{Money, ParticipantId, ResolvedSplit, SplitInput, SplitMethod, SplitShare};
use log::{debug, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashSet;

/// Splits `total` between `participants` using `method`.
///
/// `inputs` is ignored for [`SplitMethod::Equal`]. For the other methods the
/// resolved rows follow `inputs` order and each input must name a member of
/// `participants`.
pub fn compute_split(
    method: SplitMethod,
    total: Money,
    participants: &[ParticipantId],
    inputs: &[SplitInput],
) -> Result<ResolvedSplit, SplitError> {
    if participants.is_empty() {
        warn!("Rejecting {} split of {} without participants", method, total);
        return Err(SplitError::NoMembers);
    }
    ensure_distinct(participants)?;

    let shares = match method {
        SplitMethod::Equal => split_equal(total, participants)?,
        SplitMethod::Exact => split_exact(total, checked_inputs(participants, inputs)?)?,
        SplitMethod::Percentage => {
            split_percentage(total, checked_inputs(participants, inputs)?)?
        }
        SplitMethod::Shares => split_shares(total, checked_inputs(participants, inputs)?)?,
    };

    debug_assert_eq!(
        checked_total(shares.iter().map(|share| share.amount)).ok(),
        Some(total)
    );
    debug!(
        "Resolved {} split of {} into {} shares",
        method,
        total,
        shares.len()
    );
    Ok(ResolvedSplit::new(method, total, shares))
}

/// Divides `total` into `count` amounts differing by at most one cent. The
/// first `total % count` amounts carry the extra cent. Zero `count` yields an
/// empty list.
pub fn equal_amounts(total: Money, count: usize) -> Vec<Money> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as i64;
    let base = total.cents().div_euclid(n);
    let remainder = total.cents().rem_euclid(n) as usize;

    (0..count)
        .map(|index| {
            if index < remainder {
                Money::from_cents(base + 1)
            } else {
                Money::from_cents(base)
            }
        })
        .collect()
}

fn split_equal(total: Money, participants: &[ParticipantId]) -> Result<Vec<SplitShare>, SplitError> {
    let amounts = equal_amounts(total, participants.len());
    let percentages = if total.is_zero() {
        let weights = vec![Decimal::ONE; participants.len()];
        display_percentages(&weights, Decimal::from(participants.len()))?
    } else {
        let weights: Vec<Decimal> = amounts.iter().map(|amount| cents(*amount)).collect();
        display_percentages(&weights, cents(total))?
    };

    Ok(zip_shares(participants.iter().cloned(), amounts, percentages))
}

fn split_exact(total: Money, inputs: &[SplitInput]) -> Result<Vec<SplitShare>, SplitError> {
    let mut amounts = inputs
        .iter()
        .map(|input| Money::from_decimal(input.value))
        .collect::<Result<Vec<_>, _>>()?;

    let actual = checked_total(amounts.iter().copied())?;
    let gap = total
        .checked_sub(actual)
        .and_then(Money::checked_abs)
        .ok_or(SplitError::AmountOutOfRange)?;
    if gap > Money::from_cents(EXACT_SPLIT_TOLERANCE_CENTS) {
        warn!("Exact amounts add up to {}, expected {}", actual, total);
        return Err(SplitError::AmountMismatch {
            expected: total,
            actual,
        });
    }
    if !gap.is_zero() {
        debug!("Absorbing {} exact split gap into the last share", gap);
        absorb_leftover(&mut amounts, total)?;
    }

    let weights: Vec<Decimal> = amounts.iter().map(|amount| cents(*amount)).collect();
    let percentages = display_percentages(&weights, cents(total))?;

    Ok(zip_shares(
        inputs.iter().map(|input| input.participant.clone()),
        amounts,
        percentages,
    ))
}

fn split_percentage(total: Money, inputs: &[SplitInput]) -> Result<Vec<SplitShare>, SplitError> {
    let actual = checked_sum(inputs.iter().map(|input| input.value))?;
    if (actual - Decimal::ONE_HUNDRED).abs() > PERCENTAGE_TOLERANCE {
        warn!("Percentages add up to {}, expected 100", actual);
        return Err(SplitError::PercentageMismatch { actual });
    }

    let mut amounts = inputs
        .iter()
        .map(|input| proportion_of(total, input.value, Decimal::ONE_HUNDRED))
        .collect::<Result<Vec<_>, _>>()?;
    absorb_leftover(&mut amounts, total)?;

    Ok(zip_shares(
        inputs.iter().map(|input| input.participant.clone()),
        amounts,
        inputs.iter().map(|input| input.value).collect(),
    ))
}

fn split_shares(total: Money, inputs: &[SplitInput]) -> Result<Vec<SplitShare>, SplitError> {
    if inputs.iter().any(|input| input.value < Decimal::ZERO) {
        warn!("Rejecting shares split with a negative weight");
        return Err(SplitError::NegativeShares);
    }
    let total_shares = checked_sum(inputs.iter().map(|input| input.value))?;
    if total_shares.is_zero() {
        warn!("Rejecting shares split whose weights are all zero");
        return Err(SplitError::ZeroShares);
    }

    let mut amounts = inputs
        .iter()
        .map(|input| proportion_of(total, input.value, total_shares))
        .collect::<Result<Vec<_>, _>>()?;
    absorb_leftover(&mut amounts, total)?;

    let weights: Vec<Decimal> = inputs.iter().map(|input| input.value).collect();
    let percentages = display_percentages(&weights, total_shares)?;

    Ok(zip_shares(
        inputs.iter().map(|input| input.participant.clone()),
        amounts,
        percentages,
    ))
}

fn ensure_distinct(participants: &[ParticipantId]) -> Result<(), SplitError> {
    let mut seen: HashSet<&ParticipantId> = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !seen.insert(participant) {
            warn!("Rejecting split that lists {} twice", participant);
            return Err(SplitError::DuplicateParticipant(participant.clone()));
        }
    }
    Ok(())
}

/// Rejects empty, unknown or repeated inputs.
fn checked_inputs<'a>(
    participants: &[ParticipantId],
    inputs: &'a [SplitInput],
) -> Result<&'a [SplitInput], SplitError> {
    if inputs.is_empty() {
        warn!("Rejecting split without per-participant inputs");
        return Err(SplitError::NoMembers);
    }

    let allowed: HashSet<&ParticipantId> = participants.iter().collect();
    let mut seen: HashSet<&ParticipantId> = HashSet::with_capacity(inputs.len());
    for input in inputs {
        if !allowed.contains(&input.participant) {
            return Err(SplitError::UnknownParticipant(input.participant.clone()));
        }
        if !seen.insert(&input.participant) {
            return Err(SplitError::DuplicateParticipant(input.participant.clone()));
        }
    }
    Ok(inputs)
}

/// `round(total * part / whole)` to the cent, half away from zero.
fn proportion_of(total: Money, part: Decimal, whole: Decimal) -> Result<Money, SplitError> {
    cents(total)
        .checked_mul(part)
        .and_then(|scaled| scaled.checked_div(whole))
        .map(|exact| exact.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .map(Money::from_cents)
        .ok_or(SplitError::AmountOutOfRange)
}

/// Puts whatever keeps `amounts` from adding up to `total` on the last entry.
fn absorb_leftover(amounts: &mut [Money], total: Money) -> Result<(), SplitError> {
    let leftover = checked_total(amounts.iter().copied())
        .and_then(|sum| total.checked_sub(sum).ok_or(SplitError::AmountOutOfRange))?;
    if let Some(last) = amounts.last_mut() {
        *last = last
            .checked_add(leftover)
            .ok_or(SplitError::AmountOutOfRange)?;
    }
    Ok(())
}

fn checked_total(mut amounts: impl Iterator<Item = Money>) -> Result<Money, SplitError> {
    amounts
        .try_fold(Money::ZERO, Money::checked_add)
        .ok_or(SplitError::AmountOutOfRange)
}

/// Two-decimal percentages of `whole`, nudged on the last entry so they add up
/// to exactly 100. All zero when `whole` is zero.
fn display_percentages(weights: &[Decimal], whole: Decimal) -> Result<Vec<Decimal>, SplitError> {
    if whole.is_zero() {
        return Ok(vec![Decimal::ZERO; weights.len()]);
    }

    let mut percentages = weights
        .iter()
        .map(|weight| {
            weight
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(whole))
                .map(|pct| {
                    pct.round_dp_with_strategy(PERCENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
                })
                .ok_or(SplitError::AmountOutOfRange)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let leftover = Decimal::ONE_HUNDRED - checked_sum(percentages.iter().copied())?;
    if let Some(last) = percentages.last_mut() {
        *last += leftover;
    }
    Ok(percentages)
}

fn checked_sum(values: impl Iterator<Item = Decimal>) -> Result<Decimal, SplitError> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, value| acc.checked_add(value))
        .ok_or(SplitError::AmountOutOfRange)
}

fn cents(amount: Money) -> Decimal {
    Decimal::from(amount.cents())
}

fn zip_shares(
    participants: impl Iterator<Item = ParticipantId>,
    amounts: Vec<Money>,
    percentages: Vec<Decimal>,
) -> Vec<SplitShare> {
    participants
        .zip(amounts)
        .zip(percentages)
        .map(|((participant, amount), percentage)| SplitShare {
            participant,
            amount,
            percentage,
        })
        .collect()
}
