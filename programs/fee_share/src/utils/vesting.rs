//! Linear release ramp of a single deposit's holder share.
//!
//! released(t) = holder_share * min(1, max(0, t - vests_from) / window),
//! floored, and exactly `holder_share` once the window is over.

use crate::error::FeeShareError;
use crate::utils::math::{mul_div_floor, to_u64};
use crate::utils::time;

pub fn released_amount(
    holder_share: u64,
    vests_from: i64,
    now_ts: i64,
    window_secs: i64,
) -> Result<u64, FeeShareError> {
    if window_secs <= 0 {
        return Err(FeeShareError::InvalidConfig);
    }
    let elapsed = time::elapsed_since(now_ts, vests_from)?;
    if elapsed >= window_secs {
        return Ok(holder_share);
    }
    let v = mul_div_floor(holder_share as u128, elapsed as u128, window_secs as u128)?;
    to_u64(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::days;

    const T0: i64 = 1_700_000_000;
    const UNIT: u64 = 1_000_000_000;

    #[test]
    fn zero_at_and_before_start() {
        let w = days(31).unwrap();
        assert_eq!(released_amount(100, T0, T0, w).unwrap(), 0);
        assert_eq!(released_amount(100, T0, T0 - 5, w).unwrap(), 0);
    }

    #[test]
    fn linear_in_between() {
        // 31 units, half to holders, 10 of 31 days
        let w = days(31).unwrap();
        let share = 31 * UNIT / 2;
        assert_eq!(
            released_amount(share, T0, T0 + days(10).unwrap(), w).unwrap(),
            5 * UNIT
        );
    }

    #[test]
    fn capped_after_window() {
        let w = days(31).unwrap();
        assert_eq!(released_amount(UNIT / 2, T0, T0 + w, w).unwrap(), UNIT / 2);
        assert_eq!(
            released_amount(UNIT / 2, T0, T0 + days(32).unwrap(), w).unwrap(),
            UNIT / 2
        );
    }

    #[test]
    fn monotone_and_bounded() {
        let w = days(31).unwrap();
        let share = 7_777_777_777u64;
        let mut prev = 0;
        let mut t = T0 - 3_600;
        while t <= T0 + w + 3_600 {
            let r = released_amount(share, T0, t, w).unwrap();
            assert!(r >= prev);
            assert!(r <= share);
            prev = r;
            t += 3_571;
        }
        assert_eq!(prev, share);
    }

    #[test]
    fn rejects_empty_window() {
        assert!(matches!(
            released_amount(1, T0, T0, 0),
            Err(FeeShareError::InvalidConfig)
        ));
    }
}
