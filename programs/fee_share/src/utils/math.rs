//! Checked u128 helpers; every step fails closed with `MathOverflow`.

use crate::error::FeeShareError;

/// floor(a * b / denominator).
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128, FeeShareError> {
    a.checked_mul(b)
        .ok_or(FeeShareError::MathOverflow)?
        .checked_div(denominator)
        .ok_or(FeeShareError::MathOverflow)
}

pub fn to_u64(v: u128) -> Result<u64, FeeShareError> {
    u64::try_from(v).map_err(|_| FeeShareError::MathOverflow)
}

/// floor(amount * bps / 10_000).
pub fn bps_of(amount: u64, bps: u16) -> Result<u64, FeeShareError> {
    let v = mul_div_floor(
        amount as u128,
        bps as u128,
        crate::constants::BPS_DENOMINATOR as u128,
    )?;
    to_u64(v)
}
