//! Random draw engine.
//!
//! Pure functions over a caller-supplied `DrawRng`. Nothing here touches
//! storage; the presentation layer runs these on the dispatch boundary
//! together with whatever repository reads they need.

use crate::{
    error::{RaffleError, RaffleResult},
    rng::DrawRng,
};
use rand::seq::{index, SliceRandom};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Draw `to_draw` distinct numbers from `[1, available]`.
///
/// Every number in the range is equally likely and no number repeats.
pub fn draw_lottery_numbers(
    available: u32,
    to_draw: u32,
    rng: &mut DrawRng,
) -> RaffleResult<BTreeSet<u32>> {
    if available == 0 {
        return Err(RaffleError::validation("quantity available", "must be greater than zero"));
    }
    if to_draw == 0 {
        return Err(RaffleError::validation("quantity to raffle", "must be greater than zero"));
    }
    if to_draw > available {
        return Err(RaffleError::validation(
            "quantity to raffle",
            format!("cannot draw {to_draw} numbers out of {available}"),
        ));
    }

    let numbers = index::sample(rng, available as usize, to_draw as usize)
        .into_iter()
        .map(|i| i as u32 + 1)
        .collect::<BTreeSet<_>>();
    log::debug!("draw: lottery {to_draw} of {available} -> {numbers:?}");
    Ok(numbers)
}

/// Pick one element with uniform probability.
pub fn pick_random<'a, T>(items: &'a [T], rng: &mut DrawRng) -> RaffleResult<&'a T> {
    items.choose(rng).ok_or(RaffleError::EmptyInput)
}

/// Draw `quantity` distinct items, in the order they were drawn.
pub fn draw_winners<T: Clone>(
    items: &[T],
    quantity: usize,
    rng: &mut DrawRng,
) -> RaffleResult<Vec<T>> {
    if items.is_empty() {
        return Err(RaffleError::EmptyInput);
    }
    if quantity == 0 || quantity > items.len() {
        return Err(RaffleError::validation(
            "quantity",
            format!("must be between 1 and {}", items.len()),
        ));
    }
    Ok(index::sample(rng, items.len(), quantity)
        .into_iter()
        .map(|i| items[i].clone())
        .collect())
}

/// Shuffle `items` and deal them round-robin into `groups` groups.
///
/// Group sizes differ by at most one.
pub fn split_into_groups<T: Clone>(
    items: &[T],
    groups: usize,
    rng: &mut DrawRng,
) -> RaffleResult<Vec<Vec<T>>> {
    if items.is_empty() {
        return Err(RaffleError::EmptyInput);
    }
    if groups == 0 || groups > items.len() {
        return Err(RaffleError::validation(
            "group count",
            format!("must be between 1 and {}", items.len()),
        ));
    }

    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);

    let mut dealt: Vec<Vec<T>> = vec![Vec::new(); groups];
    for (i, item) in shuffled.into_iter().enumerate() {
        dealt[i % groups].push(item);
    }
    Ok(dealt)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CoinSide {
    Heads,
    Tails,
}

pub fn flip_coin(rng: &mut DrawRng) -> CoinSide {
    if rng.chance(0.5) { CoinSide::Heads } else { CoinSide::Tails }
}
