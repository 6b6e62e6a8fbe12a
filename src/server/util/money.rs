use rust_decimal::{Decimal, RoundingStrategy};
use crate::server::controller::error::CustomError;

const PRICE_DECIMAL_PLACES: u32 = 2;

/// Round a price to cents, midpoints away from zero (10.005 -> 10.01).
pub(crate) fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn ensure_positive(value: &Decimal, field: &str) -> Result<(), CustomError> {
    if value.is_sign_positive() && !value.is_zero() {
        return Ok(());
    }
    Err(CustomError::bad_request(format!("{} must be greater than zero", field)))
}

pub(crate) fn ensure_non_negative(value: &Decimal, field: &str) -> Result<(), CustomError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CustomError::bad_request(format!("{} must not be negative", field)));
    }
    Ok(())
}
