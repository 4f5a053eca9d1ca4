//! Unix-second helpers for the vesting window.
//! - elapsed = max(0, now - start)
//! - a deposit is matured once elapsed >= window

use crate::constants::SECONDS_PER_DAY;
use crate::error::FeeShareError;

/// Seconds elapsed since `start`, clamped at zero for `now < start`.
pub fn elapsed_since(now_ts: i64, start_ts: i64) -> Result<i64, FeeShareError> {
    if now_ts <= start_ts {
        return Ok(0);
    }
    now_ts
        .checked_sub(start_ts)
        .ok_or(FeeShareError::MathOverflow)
}

/// True if `now` is at or after `start + window` (inclusive).
pub fn is_window_over(now_ts: i64, start_ts: i64, window_secs: i64) -> Result<bool, FeeShareError> {
    Ok(elapsed_since(now_ts, start_ts)? >= window_secs)
}

/// Smallest multiple of `bucket_secs` at or after `now_ts`.
pub fn bucket_end(now_ts: i64, bucket_secs: i64) -> Result<i64, FeeShareError> {
    if bucket_secs <= 0 {
        return Err(FeeShareError::InvalidConfig);
    }
    let rem = now_ts.rem_euclid(bucket_secs);
    if rem == 0 {
        return Ok(now_ts);
    }
    now_ts
        .checked_sub(rem)
        .and_then(|start| start.checked_add(bucket_secs))
        .ok_or(FeeShareError::MathOverflow)
}

/// `n` whole days in seconds.
pub fn days(n: i64) -> Result<i64, FeeShareError> {
    n.checked_mul(SECONDS_PER_DAY)
        .ok_or(FeeShareError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_775_865_600; // 2026-04-11 00:00:00 UTC

    #[test]
    fn elapsed_clamps_before_start() {
        assert_eq!(elapsed_since(START - 10, START).unwrap(), 0);
        assert_eq!(elapsed_since(START, START).unwrap(), 0);
        assert_eq!(elapsed_since(START + 10, START).unwrap(), 10);
    }

    #[test]
    fn window_boundary_inclusive() {
        let window = days(31).unwrap();
        assert!(!is_window_over(START + window - 1, START, window).unwrap());
        assert!(is_window_over(START + window, START, window).unwrap());
        assert!(is_window_over(START + days(365).unwrap(), START, window).unwrap());
    }

    #[test]
    fn bucket_end_rounds_up_to_day_boundary() {
        let day = days(1).unwrap();
        assert_eq!(bucket_end(START, day).unwrap(), START);
        assert_eq!(bucket_end(START + 1, day).unwrap(), START + day);
        assert_eq!(bucket_end(START + day - 1, day).unwrap(), START + day);
        assert!(matches!(bucket_end(START, 0), Err(FeeShareError::InvalidConfig)));
    }

    #[test]
    fn elapsed_overflow_fails_closed() {
        assert!(matches!(
            elapsed_since(i64::MAX, i64::MIN),
            Err(FeeShareError::MathOverflow)
        ));
    }
}
