use super::Messages;
use crate::config::LotteryBounds;

/// Parse a positive integer field no larger than `max`.
///
/// Returns the message to show under the field on failure.
pub(crate) fn parse_quantity(
    input: &str,
    max: u32,
    invalid: &'static str,
    too_large: &'static str,
) -> Result<u32, &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid);
    }
    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid),
        Ok(n) if n > max => Err(too_large),
        Ok(n) => Ok(n),
    }
}

/// Upper bound for the quantity to raffle, with the message shown when it
/// is exceeded. The configured maximum wins when it is the tighter bound.
pub(crate) fn to_raffle_bound(
    available: u32,
    bounds: &LotteryBounds,
    messages: &Messages,
) -> (u32, &'static str) {
    if available <= bounds.max_to_raffle {
        (available, messages.exceeds_available)
    } else {
        (bounds.max_to_raffle, messages.above_maximum)
    }
}
